use std::io;
use thiserror::Error;
use toastnotify_lib::AppId;

#[cfg_attr(target_os = "windows", allow(dead_code))]
mod markup;
#[cfg_attr(target_os = "windows", allow(unused_imports))]
pub use markup::MarkupDocument;

#[cfg(target_os = "windows")]
mod winrt;
#[cfg(target_os = "windows")]
pub use winrt::WinRtNotificationPlatform as OsNotificationPlatform;

#[cfg(not(target_os = "windows"))]
mod freedesktop;
#[cfg(not(target_os = "windows"))]
pub use freedesktop::NotifyRustNotificationPlatform as OsNotificationPlatform;

/// Stock toast layouts, named after their WinRT `ToastTemplateType` counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTemplate {
    Text02,
    ImageAndText02,
}

impl ToastTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            ToastTemplate::Text02 => "ToastText02",
            ToastTemplate::ImageAndText02 => "ToastImageAndText02",
        }
    }
}

#[derive(Error, Debug)]
pub enum ToastError {
    #[error("The toast template has no <{tag}> element at index {index}")]
    MissingElement { tag: String, index: usize },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[cfg(target_os = "windows")]
    #[error("{0}")]
    Platform(#[from] windows::core::Error),
    #[cfg(not(target_os = "windows"))]
    #[error("{0}")]
    Notify(#[from] notify_rust::error::Error),
}

impl ToastError {
    pub fn missing_element(tag: &str, index: usize) -> Self {
        ToastError::MissingElement {
            tag: tag.to_owned(),
            index,
        }
    }

    /// Process exit code for this error. WinRT failures exit with their HRESULT.
    pub fn exit_code(&self) -> i32 {
        match self {
            #[cfg(target_os = "windows")]
            ToastError::Platform(err) => err.code().0,
            _ => 1,
        }
    }
}

/// Called with the OS error code if a submitted toast fails to show. May run on
/// a platform thread after `show` has returned.
pub type FailureHandler = Box<dyn Fn(i32) + Send + 'static>;

/// A mutable toast markup document. Elements are addressed by tag name and
/// their index among elements with that tag, in document order.
pub trait ToastContent {
    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), ToastError>;
    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), ToastError>;
    fn to_xml(&self) -> Result<String, ToastError>;
}

#[cfg_attr(test, mockall::automock(type Content = MarkupDocument;))]
pub trait NotificationPlatform {
    type Content: ToastContent;

    fn template_content(&self, template: ToastTemplate) -> Result<Self::Content, ToastError>;

    fn show(
        &self,
        app_id: &AppId,
        content: Self::Content,
        on_failed: FailureHandler,
    ) -> Result<(), ToastError>;
}

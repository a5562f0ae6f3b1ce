use enum_iterator::Sequence;
use nutype::nutype;
use std::fmt;
use std::path::{Path, PathBuf};

pub use enum_iterator;

// See https://stackoverflow.com/a/46817674/21567.
pub const DEFAULT_APP_ID: &str =
    r"{1AC14E77-02E7-4E5D-B744-2EB1AE5198B7}\WindowsPowerShell\v1.0\powershell.exe";

pub const DEFAULT_TITLE: &str = "Notification";

// Showing a toast is asynchronous and exiting before it is rendered drops it.
// Even 10ms looked sufficient in informal tests, 500ms is still barely noticeable.
pub const DEFAULT_WAIT_MILLISECONDS: u64 = 500;

#[nutype(derive(Debug, Clone, PartialEq, Eq, Deref, Display))]
pub struct AppId(String);

impl Default for AppId {
    fn default() -> Self {
        AppId::new(DEFAULT_APP_ID.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Scenario {
    Alarm,
    Reminder,
}

impl Scenario {
    /// Value of the `scenario` attribute on the toast root element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Alarm => "alarm",
            Scenario::Reminder => "reminder",
        }
    }

    pub fn flag(&self) -> String {
        format!("-{}", self.as_str())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub app_id: AppId,
    pub title: String,
    pub message: String,
    pub image: Option<PathBuf>,
    pub scenario: Option<Scenario>,
    pub wait_milliseconds: u64,
    pub verbose: bool,
}

impl NotificationRequest {
    pub fn new(message: String) -> Self {
        Self {
            message,
            ..Default::default()
        }
    }

    /// The image to show, treating an empty path as no image.
    pub fn image(&self) -> Option<&Path> {
        self.image
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self {
            app_id: Default::default(),
            title: DEFAULT_TITLE.to_owned(),
            message: String::new(),
            image: None,
            scenario: None,
            wait_milliseconds: DEFAULT_WAIT_MILLISECONDS,
            verbose: false,
        }
    }
}

/// Prefixes the raw path with `file:///`. No normalization or escaping is done
/// and the file does not have to exist.
pub fn file_uri(path: &Path) -> String {
    format!("file:///{}", path.to_string_lossy())
}

use super::{FailureHandler, NotificationPlatform, ToastContent, ToastError, ToastTemplate};
use log::debug;
use toastnotify_lib::AppId;
use windows::core::{ComInterface, HSTRING};
use windows::Data::Xml::Dom::{IXmlNode, XmlDocument, XmlElement};
use windows::Foundation::TypedEventHandler;
use windows::UI::Notifications::{
    ToastFailedEventArgs, ToastNotification, ToastNotificationManager, ToastTemplateType,
};

pub struct WinRtNotificationPlatform;

pub struct WinRtToastContent {
    xml: XmlDocument,
}

impl WinRtToastContent {
    fn element(&self, tag: &str, index: usize) -> Result<IXmlNode, ToastError> {
        let elements = self.xml.GetElementsByTagName(&HSTRING::from(tag))?;
        let position = u32::try_from(index).map_err(|_| ToastError::missing_element(tag, index))?;
        if position >= elements.Length()? {
            return Err(ToastError::missing_element(tag, index));
        }
        Ok(elements.Item(position)?)
    }
}

impl ToastContent for WinRtToastContent {
    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), ToastError> {
        let element = self.element(tag, index)?;
        let text_node = self.xml.CreateTextNode(&HSTRING::from(text))?;
        element.AppendChild(&text_node.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), ToastError> {
        let element: XmlElement = self.element(tag, index)?.cast()?;
        element.SetAttribute(&HSTRING::from(name), &HSTRING::from(value))?;
        Ok(())
    }

    fn to_xml(&self) -> Result<String, ToastError> {
        Ok(self.xml.GetXml()?.to_string())
    }
}

impl NotificationPlatform for WinRtNotificationPlatform {
    type Content = WinRtToastContent;

    fn template_content(&self, template: ToastTemplate) -> Result<Self::Content, ToastError> {
        let template_type = match template {
            ToastTemplate::Text02 => ToastTemplateType::ToastText02,
            ToastTemplate::ImageAndText02 => ToastTemplateType::ToastImageAndText02,
        };
        Ok(WinRtToastContent {
            xml: ToastNotificationManager::GetTemplateContent(template_type)?,
        })
    }

    fn show(
        &self,
        app_id: &AppId,
        content: Self::Content,
        on_failed: FailureHandler,
    ) -> Result<(), ToastError> {
        let toast = ToastNotification::CreateToastNotification(&content.xml)?;
        toast.Failed(&TypedEventHandler::<ToastNotification, ToastFailedEventArgs>::new(
            move |_, args| {
                let code = match args {
                    Some(args) => match args.ErrorCode() {
                        Ok(code) => code.0,
                        Err(err) => err.code().0,
                    },
                    None => 0,
                };
                on_failed(code);
                Ok(())
            },
        ))?;

        let notifier = ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(
            app_id.as_str(),
        ))?;
        debug!("Submitting toast through notifier for {}", app_id);
        notifier.Show(&toast)?;
        Ok(())
    }
}

use super::{FailureHandler, MarkupDocument, NotificationPlatform, ToastError, ToastTemplate};
use log::debug;
use notify_rust::Notification;
use toastnotify_lib::AppId;

/// Shows toasts through `notify-rust`. Delivery problems are reported
/// synchronously by `show`, so the failure handler is never called.
pub struct NotifyRustNotificationPlatform;

impl NotificationPlatform for NotifyRustNotificationPlatform {
    type Content = MarkupDocument;

    fn template_content(&self, template: ToastTemplate) -> Result<Self::Content, ToastError> {
        Ok(MarkupDocument::from_template(template))
    }

    fn show(
        &self,
        app_id: &AppId,
        content: Self::Content,
        _on_failed: FailureHandler,
    ) -> Result<(), ToastError> {
        let mut notification = Notification::new();
        notification
            .appname(app_id.as_str())
            .summary(&content.text("text", 0).unwrap_or_default())
            .body(&content.text("text", 1).unwrap_or_default());

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            use notify_rust::{Timeout, Urgency};

            if let Some(src) = content
                .attribute("image", 0, "src")
                .filter(|src| !src.is_empty())
            {
                notification.image_path(src);
            }
            // Alarms and reminders stay on screen until dismissed.
            if content.attribute("toast", 0, "scenario").is_some() {
                notification.urgency(Urgency::Critical).timeout(Timeout::Never);
            }
        }

        debug!("Submitting notification as {}", app_id);
        notification.show()?;
        Ok(())
    }
}

use crate::notification::{
    FailureHandler, NotificationPlatform, ToastContent, ToastError, ToastTemplate,
};
use log::{debug, error};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use toastnotify_lib::{file_uri, NotificationRequest};

const TOAST_BEGIN: &str = "---------------- TOAST_BEGIN ----------------";
const TOAST_END: &str = "---------------- TOAST_END ----------------";

/// Renders the request into a toast, submits it and then blocks for the
/// request's wait period. Verbose output goes to `out`.
pub fn show_toast<P: NotificationPlatform>(
    platform: &P,
    request: &NotificationRequest,
    out: &mut impl Write,
) -> Result<(), ToastError> {
    let template = match request.image() {
        Some(_) => ToastTemplate::ImageAndText02,
        None => ToastTemplate::Text02,
    };
    debug!("Using template {}", template.name());

    let mut content = platform.template_content(template)?;
    content.append_text("text", 0, &request.title)?;
    if !request.message.is_empty() {
        content.append_text("text", 1, &request.message)?;
    }
    if let Some(image) = request.image() {
        content.set_attribute("image", 0, "src", &file_uri(image))?;
    }
    if let Some(scenario) = request.scenario {
        content.set_attribute("toast", 0, "scenario", scenario.as_str())?;
    }

    if request.verbose {
        writeln!(out, "{}", TOAST_BEGIN)?;
        writeln!(out, "{}", content.to_xml()?)?;
        writeln!(out, "{}", TOAST_END)?;
        writeln!(out, "Using App ID: {}", request.app_id)?;
        out.flush()?;
    }

    platform.show(&request.app_id, content, failure_reporter())?;

    if request.wait_milliseconds > 0 {
        debug!("Waiting {}ms for the toast to be delivered", request.wait_milliseconds);
        thread::sleep(Duration::from_millis(request.wait_milliseconds));
    }

    Ok(())
}

fn failure_reporter() -> FailureHandler {
    Box::new(|code| {
        if let Err(err) = report_failure(&mut io::stdout(), code) {
            error!("Could not report notification failure {}: {}", code, err);
        }
    })
}

fn report_failure(out: &mut impl Write, code: i32) -> io::Result<()> {
    writeln!(out, "error: notification failed: {}", code)
}

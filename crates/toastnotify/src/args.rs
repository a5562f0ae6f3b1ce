use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;
use toastnotify_lib::enum_iterator::all;
use toastnotify_lib::{AppId, NotificationRequest, Scenario};

const APP_ID_PREFIX: &str = "-appId:";
const IMAGE_PREFIX: &str = "-image:";
const TITLE_PREFIX: &str = "-title:";
const WAIT_PREFIX: &str = "-wait:";

#[derive(Debug, PartialEq)]
pub enum ParsedArgs {
    Notify(NotificationRequest),
    ShowUsage,
}

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("missing message")]
    MissingMessage,
    #[error("invalid -wait value '{value}': {source}")]
    InvalidWait {
        value: String,
        source: ParseIntError,
    },
}

impl ArgsError {
    pub fn shows_usage(&self) -> bool {
        !matches!(self, ArgsError::InvalidWait { .. })
    }
}

pub fn usage() -> String {
    format!(
        r#"
Usage: {} [OPTIONS] MESSAGE

Produce a toast notification with MESSAGE.

Options:
-title:STR         Set the notification title to STR.
-image:FILE        Set the notification image from FILE.
-alarm             Set the notification scenario to alarm.
-reminder          Set the notification scenario to reminder.
-verbose           Enable verbose output.

Advanced Options:
-wait:MILLISECONDS Wait MILLISECONDS after issuing notification.
                   Might be required for notification to show.
-appId:APPID       Issue notification with APPID. The default APPID
                   being used, is that of Windows PowerShell.

"#,
        env!("CARGO_PKG_NAME")
    )
}

/// Scans options left to right. Scanning stops at `--` or the first token not
/// starting with `-`, and that token plus everything after it is the message.
pub fn parse_args<I, S>(args: I) -> Result<ParsedArgs, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut request = NotificationRequest::default();

    let mut message_start = args.len();
    for (i, arg) in args.iter().enumerate() {
        if arg.eq_ignore_ascii_case("-h") || arg.eq_ignore_ascii_case("-help") {
            return Ok(ParsedArgs::ShowUsage);
        } else if let Some(app_id) = strip_prefix_ignore_case(arg, APP_ID_PREFIX) {
            request.app_id = AppId::new(app_id.to_owned());
        } else if let Some(scenario) = scenario_flag(arg) {
            request.scenario = Some(scenario);
        } else if arg.eq_ignore_ascii_case("-verbose") {
            request.verbose = true;
        } else if let Some(image) = strip_prefix_ignore_case(arg, IMAGE_PREFIX) {
            request.image = Some(PathBuf::from(image));
        } else if let Some(title) = strip_prefix_ignore_case(arg, TITLE_PREFIX) {
            request.title = title.to_owned();
        } else if let Some(wait) = strip_prefix_ignore_case(arg, WAIT_PREFIX) {
            request.wait_milliseconds = parse_wait(wait)?;
        } else if arg == "--" || !arg.starts_with('-') {
            message_start = i;
            break;
        } else {
            return Err(ArgsError::UnknownOption(arg.clone()));
        }
    }

    if message_start >= args.len() {
        return Err(ArgsError::MissingMessage);
    }
    request.message = args[message_start..].join(" ");

    Ok(ParsedArgs::Notify(request))
}

fn strip_prefix_ignore_case<'a>(arg: &'a str, prefix: &str) -> Option<&'a str> {
    let head = arg.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&arg[prefix.len()..])
    } else {
        None
    }
}

fn scenario_flag(arg: &str) -> Option<Scenario> {
    all::<Scenario>().find(|scenario| arg.eq_ignore_ascii_case(&scenario.flag()))
}

// Negative waits are accepted and mean "don't wait".
fn parse_wait(value: &str) -> Result<u64, ArgsError> {
    let milliseconds = value
        .trim()
        .parse::<i32>()
        .map_err(|source| ArgsError::InvalidWait {
            value: value.to_owned(),
            source,
        })?;
    Ok(u64::try_from(milliseconds).unwrap_or(0))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use lazy_static::lazy_static;
    use toastnotify_lib::{DEFAULT_APP_ID, DEFAULT_TITLE, DEFAULT_WAIT_MILLISECONDS};

    lazy_static! {
        static ref CUSTOM_APP_ID: AppId = AppId::new("Contoso.Build.Agent".to_owned());
    }

    fn parse_request(args: &[&str]) -> NotificationRequest {
        match parse_args(args.iter().copied()) {
            Ok(ParsedArgs::Notify(request)) => request,
            other => panic!("expected a notification request, got {:?}", other),
        }
    }

    #[test]
    pub fn parse_given_only_message_tokens_uses_defaults() {
        let request = parse_request(&["Build", "finished"]);

        assert_eq!(DEFAULT_APP_ID, request.app_id.as_str());
        assert_eq!(DEFAULT_TITLE, request.title);
        assert_eq!(None, request.scenario);
        assert_eq!(None, request.image);
        assert_eq!(DEFAULT_WAIT_MILLISECONDS, request.wait_milliseconds);
        assert!(!request.verbose);
        assert_eq!("Build finished", request.message);
    }

    #[test]
    pub fn parse_joins_message_tokens_with_single_spaces() {
        let request = parse_request(&["-verbose", "a", "", "b  c", "d"]);

        assert_eq!("a  b  c d", request.message);
    }

    #[test]
    pub fn parse_given_alert_scenario_example_builds_expected_request() {
        let request =
            parse_request(&["-title:Alert", "-alarm", "-wait:0", "Pipe", "is", "leaking"]);

        assert_eq!(
            NotificationRequest {
                title: "Alert".to_owned(),
                scenario: Some(Scenario::Alarm),
                wait_milliseconds: 0,
                message: "Pipe is leaking".to_owned(),
                ..Default::default()
            },
            request
        );
    }

    #[test]
    pub fn parse_given_repeated_options_last_one_wins() {
        let request = parse_request(&[
            "-title:first",
            "-appId:first",
            "-image:first.png",
            "-title:second",
            "-appId:Contoso.Build.Agent",
            "-image:second.png",
            "msg",
        ]);

        assert_eq!("second", request.title);
        assert_eq!(*CUSTOM_APP_ID, request.app_id);
        assert_eq!(Some(PathBuf::from("second.png")), request.image);
    }

    #[test]
    pub fn parse_given_both_scenarios_last_one_wins() {
        let request = parse_request(&["-alarm", "-reminder", "msg"]);
        assert_eq!(Some(Scenario::Reminder), request.scenario);

        let request = parse_request(&["-reminder", "-alarm", "msg"]);
        assert_eq!(Some(Scenario::Alarm), request.scenario);
    }

    #[test]
    pub fn parse_matches_options_case_insensitively() {
        let request = parse_request(&[
            "-TITLE:Loud",
            "-APPID:Contoso.Build.Agent",
            "-Reminder",
            "-VERBOSE",
            "-Wait:25",
            "-IMAGE:C:\\img.png",
            "msg",
        ]);

        assert_eq!("Loud", request.title);
        assert_eq!(*CUSTOM_APP_ID, request.app_id);
        assert_eq!(Some(Scenario::Reminder), request.scenario);
        assert!(request.verbose);
        assert_eq!(25, request.wait_milliseconds);
        assert_eq!(Some(PathBuf::from("C:\\img.png")), request.image);
    }

    #[test]
    pub fn parse_keeps_option_value_case_and_colons() {
        let request = parse_request(&["-title:Re: MixedCase", "msg"]);

        assert_eq!("Re: MixedCase", request.title);
    }

    #[test]
    pub fn parse_given_help_flag_shows_usage() {
        assert_matches!(parse_args(["-h"]), Ok(ParsedArgs::ShowUsage));
        assert_matches!(parse_args(["-HELP", "message"]), Ok(ParsedArgs::ShowUsage));
        assert_matches!(parse_args(["-title:x", "-Help"]), Ok(ParsedArgs::ShowUsage));
    }

    #[test]
    pub fn parse_given_help_flag_after_message_start_treats_it_as_message() {
        let request = parse_request(&["hello", "-h"]);

        assert_eq!("hello -h", request.message);
    }

    #[test]
    pub fn parse_given_double_dash_keeps_it_in_message() {
        let request = parse_request(&["-title:x", "--", "-alarm", "now"]);

        assert_eq!("-- -alarm now", request.message);
        assert_eq!(None, request.scenario);
    }

    #[test]
    pub fn parse_given_unknown_option_reports_token() {
        assert_matches!(
            parse_args(["-bogus", "msg"]),
            Err(ArgsError::UnknownOption(token)) if token == "-bogus"
        );
        assert_matches!(
            parse_args(["-"]),
            Err(ArgsError::UnknownOption(token)) if token == "-"
        );
    }

    #[test]
    pub fn parse_given_scenario_with_suffix_is_unknown_option() {
        assert_matches!(
            parse_args(["-alarms", "msg"]),
            Err(ArgsError::UnknownOption(token)) if token == "-alarms"
        );
    }

    #[test]
    pub fn parse_given_no_message_reports_missing_message() {
        assert_matches!(
            parse_args(Vec::<String>::new()),
            Err(ArgsError::MissingMessage)
        );
        assert_matches!(
            parse_args(["-title:x", "-alarm", "-verbose"]),
            Err(ArgsError::MissingMessage)
        );
    }

    #[test]
    pub fn parse_given_non_integer_wait_fails_without_usage() {
        let err = parse_args(["-wait:abc", "msg"]).unwrap_err();

        assert_matches!(&err, ArgsError::InvalidWait { value, .. } if value == "abc");
        assert!(!err.shows_usage());
    }

    #[test]
    pub fn parse_given_wait_out_of_i32_range_fails() {
        assert_matches!(
            parse_args(["-wait:3000000000", "msg"]),
            Err(ArgsError::InvalidWait { .. })
        );
    }

    #[test]
    pub fn parse_given_negative_wait_disables_waiting() {
        let request = parse_request(&["-wait:-20", "msg"]);

        assert_eq!(0, request.wait_milliseconds);
    }

    #[test]
    pub fn parse_given_padded_wait_trims_whitespace() {
        let request = parse_request(&["-wait: +75 ", "msg"]);

        assert_eq!(75, request.wait_milliseconds);
    }

    #[test]
    pub fn usage_errors_show_usage() {
        assert!(ArgsError::MissingMessage.shows_usage());
        assert!(ArgsError::UnknownOption("-x".to_owned()).shows_usage());
    }

    #[test]
    pub fn usage_lists_every_option() {
        let text = usage();

        let options = [
            "-title:", "-image:", "-alarm", "-reminder", "-verbose", "-wait:", "-appId:",
        ];
        for option in options {
            assert!(text.contains(option), "usage is missing {}", option);
        }
        assert!(text.contains("Usage: toastnotify [OPTIONS] MESSAGE"));
    }

    #[test]
    pub fn usage_is_framed_by_blank_lines() {
        let text = usage();

        assert!(text.starts_with("\nUsage:"));
        assert!(text.ends_with("Windows PowerShell.\n\n"));
    }
}

#![warn(clippy::all, rust_2018_idioms)]

use crate::args::{parse_args, usage, ArgsError, ParsedArgs};
use crate::dispatcher::show_toast;
use crate::notification::OsNotificationPlatform;
use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use std::io;
use std::process;

mod args;
mod dispatcher;
mod notification;

fn main() {
    let code = run();
    process::exit(code);
}

fn run() -> i32 {
    let _logger = init_logging();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let request = match parse_args(args) {
        Ok(ParsedArgs::Notify(request)) => request,
        Ok(ParsedArgs::ShowUsage) => {
            eprint!("{}", usage());
            return 1;
        }
        Err(err) => return report_args_error(&err),
    };
    debug!("Parsed {:?}", request);

    match show_toast(&OsNotificationPlatform, &request, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err);
            err.exit_code()
        }
    }
}

fn report_args_error(err: &ArgsError) -> i32 {
    eprintln!("error: {}", err);
    if err.shows_usage() {
        eprint!("{}", usage());
    }
    1
}

// Log to stderr, `RUST_LOG=debug` for details.
fn init_logging() -> Option<LoggerHandle> {
    match Logger::try_with_env_or_str("warn").and_then(|logger| logger.start()) {
        Ok(handle) => {
            log_panics::init();
            Some(handle)
        }
        Err(err) => {
            eprintln!("warning: logging disabled: {}", err);
            None
        }
    }
}

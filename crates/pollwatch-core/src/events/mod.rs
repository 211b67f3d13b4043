//! Application lifecycle events shared by the CLI commands.

use tracing::{error, info, warn};

use crate::errors::PollwatchError;

pub fn log_app_startup(command: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = command
    );
}

pub fn log_app_shutdown(command: &str, interrupted: bool) {
    info!(
        event = "core.app.shutdown_started",
        command = command,
        interrupted = interrupted
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

/// Log a typed error at the level its kind calls for.
///
/// User errors (bad input, bad config) are warnings; everything else is an error.
pub fn log_typed_error(error: &dyn PollwatchError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error = %error,
            error_code = error.error_code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code()
        );
    }
}

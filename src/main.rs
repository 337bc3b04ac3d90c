//! attach-to-desktop
//!
//! Reparents the window whose handle is given on the command line beneath
//! the desktop icon layer.
//!
//! Usage:
//!   attach-to-desktop <hwnd>
//!
//! Set `DESKTOP_ATTACH_LOG__LEVEL=debug` to see why an attach failed.

use std::process::ExitCode;

use desktop_attach::core::AppConfig;
use desktop_attach::logging::LoggingSystem;
use desktop_attach::os::NativeWindowSystem;

fn main() -> ExitCode {
    // A malformed logging variable must not add output or change the status
    let config = AppConfig::from_env().unwrap_or_default();

    if config.log.is_enabled() {
        if let Err(e) = LoggingSystem::init(&config.log) {
            eprintln!("Failed to initialize logging system: {}", e);
        }
    }

    tracing::debug!("Starting attach-to-desktop");

    let status = desktop_attach::cli::run(
        std::env::args_os().skip(1),
        NativeWindowSystem::new(),
        &mut std::io::stderr(),
    );

    tracing::debug!("Exiting with status {}", status.code());
    status.into()
}

//! Command line front end
//!
//! Usage: `attach-to-desktop <hwnd>`
//!
//! The handle is a base-10 integer. Exit codes:
//! - 0: attached
//! - 2: no handle given (usage printed to stderr)
//! - 3: handle is not an integer (`invalid hwnd` printed to stderr)
//! - 4: attach failed for any reason (nothing printed)


use std::ffi::OsStr;
use std::io::Write;

use crate::attach::WindowAttacher;
use crate::core::error::{CliError, ExitStatus};
use crate::core::types::WindowHandle;
use crate::os::WindowSystem;

/// Read the target handle from the arguments following the program name.
/// Only the first argument is used.
pub fn parse_target<I, S>(args: I) -> Result<WindowHandle, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let first = args.into_iter().next().ok_or(CliError::MissingArgument)?;
    let value = first.as_ref().to_string_lossy();
    value.parse().map_err(|_| CliError::InvalidHandle {
        value: value.into_owned(),
    })
}

/// Parse the arguments, attach on `system`, and map the outcome to an exit
/// status. Usage diagnostics go to `stderr`.
pub fn run<W, I, S>(args: I, system: W, stderr: &mut dyn Write) -> ExitStatus
where
    W: WindowSystem,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let target = match parse_target(args) {
        Ok(target) => target,
        Err(e) => {
            tracing::debug!("Rejected arguments: {:?}", e);
            // A closed stderr must not change the exit status
            let _ = writeln!(stderr, "{}", e);
            return ExitStatus::from(&e);
        }
    };

    match WindowAttacher::new(system).try_attach(target) {
        Ok(report) => {
            tracing::debug!(?report, "Attach succeeded");
            ExitStatus::Success
        }
        Err(e) => {
            tracing::info!("Attach of {} failed: {}", target, e);
            ExitStatus::from(&e)
        }
    }
}

//! Error types for desktop-attach
//!
//! Library operations report a rich `AttachError`; the command line collapses
//! every platform failure into a single exit status.

use std::process::ExitCode;

use thiserror::Error;

use super::types::WindowHandle;

/// Result type alias for attach operations
pub type Result<T> = std::result::Result<T, AttachError>;

/// Failures while locating the desktop host or reparenting into it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    #[error("Shell window of class {class} not found")]
    ShellNotFound { class: String },

    #[error("No {host_class} window with a {view_class} child found")]
    HostNotFound {
        host_class: String,
        view_class: String,
    },

    #[error("Failed to reparent {target} under {host}")]
    ReparentFailed {
        target: WindowHandle,
        host: WindowHandle,
    },

    #[error("Platform not supported: {platform}")]
    PlatformNotSupported { platform: String },
}

/// Command line usage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("usage: attach-to-desktop <hwnd>")]
    MissingArgument,

    #[error("invalid hwnd")]
    InvalidHandle { value: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config load failed: {0}")]
    Load(#[from] config::ConfigError),
}

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Usage = 2,
    InvalidHandle = 3,
    AttachFailed = 4,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&CliError> for ExitStatus {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::MissingArgument => ExitStatus::Usage,
            CliError::InvalidHandle { .. } => ExitStatus::InvalidHandle,
        }
    }
}

impl From<&AttachError> for ExitStatus {
    /// Every attach failure shares one code
    fn from(_: &AttachError) -> Self {
        ExitStatus::AttachFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Usage.code(), 2);
        assert_eq!(ExitStatus::InvalidHandle.code(), 3);
        assert_eq!(ExitStatus::AttachFailed.code(), 4);
    }

    #[test]
    fn test_cli_error_mapping() {
        assert_eq!(ExitStatus::from(&CliError::MissingArgument), ExitStatus::Usage);
        assert_eq!(
            ExitStatus::from(&CliError::InvalidHandle { value: "x".into() }),
            ExitStatus::InvalidHandle
        );
    }

    #[test]
    fn test_attach_errors_collapse() {
        let errors = [
            AttachError::ShellNotFound { class: "Progman".into() },
            AttachError::HostNotFound {
                host_class: "WorkerW".into(),
                view_class: "SHELLDLL_DefView".into(),
            },
            AttachError::ReparentFailed {
                target: WindowHandle::from_raw(1),
                host: WindowHandle::from_raw(2),
            },
            AttachError::PlatformNotSupported { platform: "linux".into() },
        ];
        for err in &errors {
            assert_eq!(ExitStatus::from(err), ExitStatus::AttachFailed);
        }
    }

    #[test]
    fn test_diagnostic_text() {
        assert_eq!(CliError::MissingArgument.to_string(), "usage: attach-to-desktop <hwnd>");
        assert_eq!(
            CliError::InvalidHandle { value: "abc".into() }.to_string(),
            "invalid hwnd"
        );
    }
}

//! desktop-attach Core Module
//!
//! This module contains the core functionality shared by the library and
//! the command line:
//! - Configuration and the well-known shell window classes
//! - Error types and exit status mapping
//! - The window handle type

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use self::config::{AppConfig, ShellProfile};
pub use self::error::{AttachError, CliError, ConfigError, ExitStatus, Result};
pub use self::types::{HandleParseError, WindowHandle};

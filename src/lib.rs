//! desktop-attach - place a window behind the Windows desktop icons
//!
//! The desktop shell draws its icons in a `SHELLDLL_DefView` hosted by a
//! `WorkerW` window. Reparenting another top-level window under that
//! `WorkerW` makes it render as part of the desktop background layer.
//!
//! This crate provides:
//! - `WindowAttacher`, the find-host-and-reparent operation
//! - `WindowSystem`, the window manager binding, with a Win32 implementation
//!   and an in-memory `MockDesktop` for tests (`mock` feature)
//! - the `attach-to-desktop` command line front end

pub mod attach;
pub mod cli;
pub mod core;
pub mod logging;
pub mod os;

// Re-export commonly used items
pub use crate::attach::{AttachReport, WindowAttacher};
pub use crate::core::config::{AppConfig, ShellProfile};
pub use crate::core::error::{AttachError, CliError, ExitStatus, Result};
pub use crate::core::types::WindowHandle;
pub use crate::os::{NativeWindowSystem, WindowSystem};

//! Windows-specific OS integration
//!
//! Binds `WindowSystem` to the `user32` window functions.

pub mod user32;

pub use user32::Win32WindowSystem;

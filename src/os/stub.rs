//! Stub window system for non-Windows platforms
//!
//! There is no desktop icon layer to attach to outside Windows. The stub
//! reports itself unsupported and every lookup fails.

use crate::core::types::WindowHandle;
use crate::os::{WindowSystem, WindowVisitor};

/// Stub window system for non-Windows platforms
#[derive(Debug, Default, Clone, Copy)]
pub struct StubWindowSystem;

impl StubWindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for StubWindowSystem {
    fn is_supported(&self) -> bool {
        false
    }

    fn find_window(&self, class_name: &str, _title: Option<&str>) -> Option<WindowHandle> {
        tracing::warn!(
            "Window lookup for {} not supported on {}",
            class_name,
            std::env::consts::OS
        );
        None
    }

    fn send_message(&self, _window: WindowHandle, _message: u32, _wparam: usize, _lparam: isize) {
        // No-op
    }

    fn enum_windows(&self, _visitor: &mut WindowVisitor<'_>) {
        // No windows to visit
    }

    fn class_name(&self, _window: WindowHandle, buf: &mut [u16]) -> usize {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        0
    }

    fn find_child(&self, _parent: WindowHandle, _class_name: &str) -> Option<WindowHandle> {
        None
    }

    fn set_parent(&self, _child: WindowHandle, _new_parent: WindowHandle) -> Option<WindowHandle> {
        tracing::warn!("Reparenting not supported on {}", std::env::consts::OS);
        None
    }

    fn parent_of(&self, _window: WindowHandle) -> Option<WindowHandle> {
        None
    }
}

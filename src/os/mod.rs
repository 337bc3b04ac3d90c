//! OS Integration Layer for desktop-attach
//!
//! The `WindowSystem` trait is the binding to the host window manager. It
//! exposes the handful of primitives needed to find the desktop host window
//! and reparent into it:
//! - top-level lookup by class name
//! - sending a message to a window
//! - top-level enumeration with early stop
//! - reading a window's class name into a caller buffer
//! - child lookup by class name
//! - changing and querying a window's parent

#[cfg(windows)]
pub mod windows;

#[cfg(windows)]
pub use self::windows::Win32WindowSystem as NativeWindowSystem;

#[cfg(not(windows))]
pub mod stub;

#[cfg(not(windows))]
pub use self::stub::StubWindowSystem as NativeWindowSystem;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


use std::ops::ControlFlow;

use crate::core::types::WindowHandle;

/// Visitor invoked once per top-level window during enumeration.
/// Returning `ControlFlow::Break` stops the enumeration.
pub type WindowVisitor<'a> = dyn FnMut(WindowHandle) -> ControlFlow<()> + 'a;

/// Window manager binding
///
/// Every call is synchronous and returns before the next one begins. Failures
/// are reported as `None` (the platform's null handle); no call retries.
pub trait WindowSystem {
    /// Whether this binding can reach a desktop at all. Bindings for
    /// platforms without a desktop icon layer return `false`.
    fn is_supported(&self) -> bool {
        true
    }

    /// Find a top-level window by class name and, optionally, title
    fn find_window(&self, class_name: &str, title: Option<&str>) -> Option<WindowHandle>;

    /// Send a message to a window and wait for it to be processed.
    /// The result value carries no meaning for the caller.
    fn send_message(&self, window: WindowHandle, message: u32, wparam: usize, lparam: isize);

    /// Enumerate top-level windows in the window manager's native order,
    /// calling `visitor` for each one until it breaks
    fn enum_windows(&self, visitor: &mut WindowVisitor<'_>);

    /// Copy a window's class name into `buf`.
    ///
    /// At most `buf.len() - 1` units are copied, followed by a terminating
    /// zero; longer names are truncated. Returns the number of units copied,
    /// excluding the terminator, or 0 on failure.
    fn class_name(&self, window: WindowHandle, buf: &mut [u16]) -> usize;

    /// Find the first child of `parent` with the given class name
    fn find_child(&self, parent: WindowHandle, class_name: &str) -> Option<WindowHandle>;

    /// Make `new_parent` the parent of `child`.
    /// Returns the previous parent, or `None` if the platform refused.
    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> Option<WindowHandle>;

    /// Current parent of a window, `None` for top-level or unknown windows
    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle>;
}

impl<W: WindowSystem + ?Sized> WindowSystem for &W {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn find_window(&self, class_name: &str, title: Option<&str>) -> Option<WindowHandle> {
        (**self).find_window(class_name, title)
    }

    fn send_message(&self, window: WindowHandle, message: u32, wparam: usize, lparam: isize) {
        (**self).send_message(window, message, wparam, lparam)
    }

    fn enum_windows(&self, visitor: &mut WindowVisitor<'_>) {
        (**self).enum_windows(visitor)
    }

    fn class_name(&self, window: WindowHandle, buf: &mut [u16]) -> usize {
        (**self).class_name(window, buf)
    }

    fn find_child(&self, parent: WindowHandle, class_name: &str) -> Option<WindowHandle> {
        (**self).find_child(parent, class_name)
    }

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> Option<WindowHandle> {
        (**self).set_parent(child, new_parent)
    }

    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        (**self).parent_of(window)
    }
}

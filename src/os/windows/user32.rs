//! Win32 window manager binding
//!
//! Thin wrappers over the `user32` window functions. Strings are converted to
//! null-terminated UTF-16 on each call; handles cross the boundary unchanged.

use std::ops::ControlFlow;

use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowExW, FindWindowW, GetClassNameW, GetParent, SendMessageW, SetParent,
};

use crate::core::types::WindowHandle;
use crate::os::{WindowSystem, WindowVisitor};

/// `WindowSystem` backed by the live Windows desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }

    /// Callback for EnumWindows; `lparam` carries the caller's visitor
    unsafe extern "system" fn visit_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let visitor = &mut *(lparam.0 as *mut &mut WindowVisitor<'_>);
        match visitor(WindowHandle::from_raw(hwnd.0)) {
            ControlFlow::Continue(()) => BOOL(1),
            ControlFlow::Break(()) => BOOL(0), // Stop enumeration
        }
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.as_raw())
}

fn pcwstr(s: Option<&HSTRING>) -> PCWSTR {
    s.map_or(PCWSTR::null(), |s| PCWSTR(s.as_ptr()))
}

impl WindowSystem for Win32WindowSystem {
    fn find_window(&self, class_name: &str, title: Option<&str>) -> Option<WindowHandle> {
        let class = HSTRING::from(class_name);
        let title = title.map(HSTRING::from);
        let found = unsafe { FindWindowW(pcwstr(Some(&class)), pcwstr(title.as_ref())) };
        WindowHandle::non_null(found.0)
    }

    fn send_message(&self, window: WindowHandle, message: u32, wparam: usize, lparam: isize) {
        let result = unsafe { SendMessageW(hwnd(window), message, WPARAM(wparam), LPARAM(lparam)) };
        tracing::trace!(window = %window, message, result = result.0, "Message sent");
    }

    fn enum_windows(&self, visitor: &mut WindowVisitor<'_>) {
        let mut visitor = visitor;
        let data = &mut visitor as *mut &mut WindowVisitor<'_>;
        // EnumWindows also reports failure when the visitor stops early, so
        // the result says nothing useful here.
        let result = unsafe { EnumWindows(Some(Self::visit_window), LPARAM(data as isize)) };
        if let Err(e) = result {
            tracing::trace!("EnumWindows ended early: {}", e);
        }
    }

    fn class_name(&self, window: WindowHandle, buf: &mut [u16]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let copied = unsafe { GetClassNameW(hwnd(window), buf) };
        usize::try_from(copied).unwrap_or(0)
    }

    fn find_child(&self, parent: WindowHandle, class_name: &str) -> Option<WindowHandle> {
        let class = HSTRING::from(class_name);
        let found = unsafe { FindWindowExW(hwnd(parent), HWND(0), pcwstr(Some(&class)), PCWSTR::null()) };
        WindowHandle::non_null(found.0)
    }

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> Option<WindowHandle> {
        let previous = unsafe { SetParent(hwnd(child), hwnd(new_parent)) };
        WindowHandle::non_null(previous.0)
    }

    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        let parent = unsafe { GetParent(hwnd(window)) };
        WindowHandle::non_null(parent.0)
    }
}

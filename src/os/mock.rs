//! In-memory window manager
//!
//! `MockDesktop` keeps a window tree behind a lock and implements
//! `WindowSystem` over it. It models the parts of the Windows desktop the
//! attach depends on: top-level enumeration order, class-name truncation,
//! the shell creating its `WorkerW` host when asked, and reparenting that can
//! be refused. Every message and successful reparent is recorded so callers
//! can check which mutations happened.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::core::config::ShellProfile;
use crate::core::types::WindowHandle;
use crate::os::{WindowSystem, WindowVisitor};

/// Handle of the desktop root window every top-level window hangs off
pub const DESKTOP_ROOT: WindowHandle = WindowHandle::from_raw(0x10010);

const FIRST_HANDLE: isize = 0x20000;

/// A window in the mock tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockWindow {
    pub handle: WindowHandle,
    pub class_name: String,
    pub title: Option<String>,
    pub parent: WindowHandle,
}

/// A message delivered through `send_message`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub window: WindowHandle,
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
}

/// A successful `set_parent` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reparent {
    pub child: WindowHandle,
    pub new_parent: WindowHandle,
    pub previous: WindowHandle,
}

#[derive(Debug)]
struct ShellSpawn {
    shell: WindowHandle,
    profile: ShellProfile,
    spawned: bool,
}

#[derive(Debug)]
struct DesktopState {
    next_handle: isize,
    /// Creation order doubles as enumeration order
    windows: Vec<MockWindow>,
    messages: Vec<SentMessage>,
    reparents: Vec<Reparent>,
    denied: HashSet<WindowHandle>,
    spawn: Option<ShellSpawn>,
}

impl DesktopState {
    fn insert(&mut self, class_name: &str, title: Option<&str>, parent: WindowHandle) -> WindowHandle {
        let handle = WindowHandle::from_raw(self.next_handle);
        self.next_handle += 0x10;
        self.windows.push(MockWindow {
            handle,
            class_name: class_name.to_string(),
            title: title.map(str::to_string),
            parent,
        });
        handle
    }

    fn get(&self, handle: WindowHandle) -> Option<&MockWindow> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut MockWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    fn is_ancestor(&self, ancestor: WindowHandle, mut window: WindowHandle) -> bool {
        while let Some(w) = self.get(window) {
            if w.parent == ancestor {
                return true;
            }
            window = w.parent;
        }
        false
    }

    /// Explorer's response to the spawn message: the icon view moves from
    /// the shell window into a new `WorkerW`, and an empty `WorkerW` is
    /// created behind it for wallpaper content.
    fn spawn_host(&mut self) {
        let Some(spawn) = self.spawn.as_mut() else {
            return;
        };
        if spawn.spawned {
            return;
        }
        spawn.spawned = true;
        let shell = spawn.shell;
        let profile = spawn.profile.clone();

        let host = self.insert(&profile.host_class, None, DESKTOP_ROOT);
        let view = self
            .windows
            .iter()
            .position(|w| w.parent == shell && w.class_name == profile.view_class);
        match view {
            Some(index) => self.windows[index].parent = host,
            None => {
                self.insert(&profile.view_class, None, host);
            }
        }
        self.insert(&profile.host_class, None, DESKTOP_ROOT);
    }
}

/// In-memory `WindowSystem`
#[derive(Debug)]
pub struct MockDesktop {
    state: Mutex<DesktopState>,
}

impl MockDesktop {
    /// An empty desktop with no windows
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DesktopState {
                next_handle: FIRST_HANDLE,
                windows: Vec::new(),
                messages: Vec::new(),
                reparents: Vec::new(),
                denied: HashSet::new(),
                spawn: None,
            }),
        }
    }

    /// A desktop as Explorer leaves it at login: a `Progman` shell window
    /// holding the icon view, with no `WorkerW` host until the spawn
    /// message arrives.
    pub fn explorer() -> Self {
        let desktop = Self::new();
        let profile = ShellProfile::default();
        let shell = desktop.add_window_titled(&profile.shell_class, "Program Manager");
        desktop.add_child(shell, &profile.view_class);
        desktop.state.lock().spawn = Some(ShellSpawn {
            shell,
            profile,
            spawned: false,
        });
        desktop
    }

    /// Add a top-level window
    pub fn add_window(&self, class_name: &str) -> WindowHandle {
        self.state.lock().insert(class_name, None, DESKTOP_ROOT)
    }

    /// Add a top-level window with a title
    pub fn add_window_titled(&self, class_name: &str, title: &str) -> WindowHandle {
        self.state.lock().insert(class_name, Some(title), DESKTOP_ROOT)
    }

    /// Add a child window
    pub fn add_child(&self, parent: WindowHandle, class_name: &str) -> WindowHandle {
        self.state.lock().insert(class_name, None, parent)
    }

    /// Remove a window and everything below it
    pub fn destroy(&self, handle: WindowHandle) {
        let mut state = self.state.lock();
        let doomed: HashSet<WindowHandle> = state
            .windows
            .iter()
            .filter(|w| w.handle == handle || state.is_ancestor(handle, w.handle))
            .map(|w| w.handle)
            .collect();
        state.windows.retain(|w| !doomed.contains(&w.handle));
    }

    /// Make every future `set_parent` of `handle` fail, as for a window
    /// owned by a process at a higher integrity level
    pub fn deny_reparent(&self, handle: WindowHandle) {
        self.state.lock().denied.insert(handle);
    }

    /// Snapshot of a window
    pub fn window(&self, handle: WindowHandle) -> Option<MockWindow> {
        self.state.lock().get(handle).cloned()
    }

    /// Top-level windows in enumeration order
    pub fn top_level(&self) -> Vec<WindowHandle> {
        self.state
            .lock()
            .windows
            .iter()
            .filter(|w| w.parent == DESKTOP_ROOT)
            .map(|w| w.handle)
            .collect()
    }

    /// Messages delivered so far
    pub fn messages(&self) -> Vec<SentMessage> {
        self.state.lock().messages.clone()
    }

    /// Successful reparents so far
    pub fn reparents(&self) -> Vec<Reparent> {
        self.state.lock().reparents.clone()
    }
}

impl Default for MockDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for MockDesktop {
    fn find_window(&self, class_name: &str, title: Option<&str>) -> Option<WindowHandle> {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .filter(|w| w.parent == DESKTOP_ROOT)
            .filter(|w| w.class_name.eq_ignore_ascii_case(class_name))
            .find(|w| title.map_or(true, |t| w.title.as_deref() == Some(t)))
            .map(|w| w.handle)
    }

    fn send_message(&self, window: WindowHandle, message: u32, wparam: usize, lparam: isize) {
        let mut state = self.state.lock();
        state.messages.push(SentMessage {
            window,
            message,
            wparam,
            lparam,
        });
        let spawn_requested = state
            .spawn
            .as_ref()
            .is_some_and(|s| s.shell == window && s.profile.spawn_message == message);
        if spawn_requested {
            state.spawn_host();
        }
    }

    fn enum_windows(&self, visitor: &mut WindowVisitor<'_>) {
        // The visitor calls back into this desktop, so it must run unlocked
        for handle in self.top_level() {
            if visitor(handle).is_break() {
                break;
            }
        }
    }

    fn class_name(&self, window: WindowHandle, buf: &mut [u16]) -> usize {
        let state = self.state.lock();
        let Some(window) = state.get(window) else {
            return 0;
        };
        let Some(capacity) = buf.len().checked_sub(1) else {
            return 0;
        };
        let mut copied = 0;
        for (slot, unit) in buf.iter_mut().zip(window.class_name.encode_utf16().take(capacity)) {
            *slot = unit;
            copied += 1;
        }
        buf[copied] = 0;
        copied
    }

    fn find_child(&self, parent: WindowHandle, class_name: &str) -> Option<WindowHandle> {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .find(|w| w.parent == parent && w.class_name.eq_ignore_ascii_case(class_name))
            .map(|w| w.handle)
    }

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> Option<WindowHandle> {
        let mut state = self.state.lock();
        if state.denied.contains(&child) {
            return None;
        }
        let new_parent = if new_parent.is_null() { DESKTOP_ROOT } else { new_parent };
        if new_parent != DESKTOP_ROOT && state.get(new_parent).is_none() {
            return None;
        }
        if new_parent == child || state.is_ancestor(child, new_parent) {
            return None;
        }
        let window = state.get_mut(child)?;
        let previous = std::mem::replace(&mut window.parent, new_parent);
        state.reparents.push(Reparent {
            child,
            new_parent,
            previous,
        });
        Some(previous)
    }

    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        let state = self.state.lock();
        state
            .get(window)
            .map(|w| w.parent)
            .filter(|parent| *parent != DESKTOP_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn test_explorer_starts_without_host() {
        let desktop = MockDesktop::explorer();
        let shell = desktop.find_window("Progman", None).unwrap();
        assert!(desktop.find_child(shell, "SHELLDLL_DefView").is_some());
        assert!(desktop.find_window("WorkerW", None).is_none());
    }

    #[test]
    fn test_spawn_message_creates_host_once() {
        let desktop = MockDesktop::explorer();
        let shell = desktop.find_window("Progman", None).unwrap();

        desktop.send_message(shell, 0x052C, 0, 0);
        desktop.send_message(shell, 0x052C, 0, 0);

        let hosts: Vec<_> = desktop
            .top_level()
            .into_iter()
            .filter(|h| desktop.window(*h).unwrap().class_name == "WorkerW")
            .collect();
        assert_eq!(hosts.len(), 2);
        assert!(desktop.find_child(hosts[0], "SHELLDLL_DefView").is_some());
        assert!(desktop.find_child(hosts[1], "SHELLDLL_DefView").is_none());
        assert!(desktop.find_child(shell, "SHELLDLL_DefView").is_none());
        assert_eq!(desktop.messages().len(), 2);
    }

    #[test]
    fn test_other_messages_do_not_spawn() {
        let desktop = MockDesktop::explorer();
        let shell = desktop.find_window("Progman", None).unwrap();
        desktop.send_message(shell, 0x0010, 0, 0);
        assert!(desktop.find_window("WorkerW", None).is_none());
    }

    #[test]
    fn test_find_window_by_title() {
        let desktop = MockDesktop::new();
        let a = desktop.add_window_titled("Notepad", "a.txt");
        let b = desktop.add_window_titled("Notepad", "b.txt");
        assert_eq!(desktop.find_window("Notepad", Some("b.txt")), Some(b));
        assert_eq!(desktop.find_window("notepad", None), Some(a));
        assert_eq!(desktop.find_window("Notepad", Some("c.txt")), None);
    }

    #[test]
    fn test_class_name_truncates_like_get_class_name() {
        let desktop = MockDesktop::new();
        let window = desktop.add_window("WorkerW");

        let mut buf = [0xFFFFu16; 5];
        let copied = desktop.class_name(window, &mut buf);
        assert_eq!(copied, 4);
        assert_eq!(String::from_utf16(&buf[..copied]).unwrap(), "Work");
        assert_eq!(buf[4], 0);

        let mut empty: [u16; 0] = [];
        assert_eq!(desktop.class_name(window, &mut empty), 0);
    }

    #[test]
    fn test_class_name_of_missing_window() {
        let desktop = MockDesktop::new();
        let mut buf = [0u16; 16];
        assert_eq!(desktop.class_name(WindowHandle::from_raw(99), &mut buf), 0);
    }

    #[test]
    fn test_enumeration_is_top_level_only_and_stops() {
        let desktop = MockDesktop::new();
        let a = desktop.add_window("A");
        desktop.add_child(a, "Child");
        let b = desktop.add_window("B");
        desktop.add_window("C");

        let mut seen = Vec::new();
        desktop.enum_windows(&mut |h| {
            seen.push(h);
            if h == b {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, vec![a, b]);
    }

    #[test]
    fn test_set_parent_returns_previous() {
        let desktop = MockDesktop::new();
        let host = desktop.add_window("WorkerW");
        let target = desktop.add_window("App");

        assert_eq!(desktop.set_parent(target, host), Some(DESKTOP_ROOT));
        assert_eq!(desktop.parent_of(target), Some(host));
        assert_eq!(desktop.set_parent(target, host), Some(host));
        assert_eq!(desktop.reparents().len(), 2);
    }

    #[test]
    fn test_set_parent_failures() {
        let desktop = MockDesktop::new();
        let host = desktop.add_window("WorkerW");
        let target = desktop.add_window("App");
        let inner = desktop.add_child(target, "Inner");

        assert_eq!(desktop.set_parent(WindowHandle::from_raw(7), host), None);
        assert_eq!(desktop.set_parent(target, WindowHandle::from_raw(7)), None);
        assert_eq!(desktop.set_parent(target, inner), None);

        desktop.deny_reparent(target);
        assert_eq!(desktop.set_parent(target, host), None);
        assert!(desktop.reparents().is_empty());
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let desktop = MockDesktop::new();
        let top = desktop.add_window("Top");
        let child = desktop.add_child(top, "Child");
        desktop.destroy(top);
        assert!(desktop.window(top).is_none());
        assert!(desktop.window(child).is_none());
    }
}

//! Fixed-capacity class name buffer
//!
//! Class names are read into a stack array of `CLASS_NAME_CAPACITY` UTF-16
//! units, terminator included. Longer names are truncated exactly as the
//! platform truncates them, and comparisons see the truncated text.

use crate::core::types::WindowHandle;
use crate::os::WindowSystem;

/// Buffer size in UTF-16 units, including the terminator
pub const CLASS_NAME_CAPACITY: usize = 256;

/// Caller-owned class name buffer, reused across windows
#[derive(Clone)]
pub struct ClassNameBuf {
    units: [u16; CLASS_NAME_CAPACITY],
    len: usize,
}

impl ClassNameBuf {
    pub fn new() -> Self {
        Self {
            units: [0; CLASS_NAME_CAPACITY],
            len: 0,
        }
    }

    /// Overwrite the buffer with the class name of `window`.
    /// An unreadable window leaves the buffer empty.
    pub fn read<W: WindowSystem + ?Sized>(&mut self, system: &W, window: WindowHandle) -> &Self {
        let copied = system.class_name(window, &mut self.units);
        self.len = copied.min(CLASS_NAME_CAPACITY - 1);
        self
    }

    pub fn as_units(&self) -> &[u16] {
        &self.units[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffer is full, so the real name may have been longer
    pub fn may_be_truncated(&self) -> bool {
        self.len == CLASS_NAME_CAPACITY - 1
    }

    /// Exact, case-sensitive comparison against the buffered text
    pub fn matches(&self, expected: &str) -> bool {
        self.as_units().iter().copied().eq(expected.encode_utf16())
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }
}

impl Default for ClassNameBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassNameBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClassNameBuf")
            .field(&self.to_string_lossy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::mock::MockDesktop;

    #[test]
    fn test_read_and_match() {
        let desktop = MockDesktop::new();
        let window = desktop.add_window("WorkerW");
        let mut buf = ClassNameBuf::new();
        buf.read(&desktop, window);
        assert!(buf.matches("WorkerW"));
        assert!(!buf.matches("workerw"));
        assert!(!buf.matches("WorkerW2"));
        assert!(!buf.matches("Worker"));
        assert_eq!(buf.len(), 7);
        assert!(!buf.may_be_truncated());
    }

    #[test]
    fn test_reuse_clears_previous_name() {
        let desktop = MockDesktop::new();
        let long = desktop.add_window("SHELLDLL_DefView");
        let short = desktop.add_window("A");
        let mut buf = ClassNameBuf::new();
        buf.read(&desktop, long);
        buf.read(&desktop, short);
        assert_eq!(buf.to_string_lossy(), "A");

        buf.read(&desktop, WindowHandle::from_raw(1));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_long_name_is_truncated() {
        let desktop = MockDesktop::new();
        let name = "W".repeat(400);
        let window = desktop.add_window(&name);
        let mut buf = ClassNameBuf::new();
        buf.read(&desktop, window);
        assert_eq!(buf.len(), CLASS_NAME_CAPACITY - 1);
        assert!(buf.may_be_truncated());
        assert!(!buf.matches(&name));
        assert!(buf.matches(&name[..CLASS_NAME_CAPACITY - 1]));
    }

    #[test]
    fn test_non_ascii_class_name() {
        let desktop = MockDesktop::new();
        let window = desktop.add_window("Fenêtre_壁紙");
        let mut buf = ClassNameBuf::new();
        buf.read(&desktop, window);
        assert!(buf.matches("Fenêtre_壁紙"));
        assert_eq!(buf.to_string_lossy(), "Fenêtre_壁紙");
    }
}

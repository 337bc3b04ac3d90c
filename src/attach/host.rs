//! Desktop host window lookup
//!
//! The host is the top-level `WorkerW` that contains the shell's icon view.
//! Explorer only creates it after the shell window receives the spawn
//! message, so the lookup always asks first and then scans.

use std::ops::ControlFlow;

use crate::core::config::ShellProfile;
use crate::core::error::{AttachError, Result};
use crate::core::types::WindowHandle;
use crate::os::WindowSystem;

use super::class_name::ClassNameBuf;

/// Locates the background-hosting window for one attach
pub struct HostLocator<'a, W: WindowSystem + ?Sized> {
    system: &'a W,
    profile: &'a ShellProfile,
}

impl<'a, W: WindowSystem + ?Sized> HostLocator<'a, W> {
    pub fn new(system: &'a W, profile: &'a ShellProfile) -> Self {
        Self { system, profile }
    }

    /// Find the desktop shell window by class name
    pub fn find_shell(&self) -> Result<WindowHandle> {
        self.system
            .find_window(&self.profile.shell_class, None)
            .ok_or_else(|| AttachError::ShellNotFound {
                class: self.profile.shell_class.clone(),
            })
    }

    /// Ask the shell to create the host window if it does not exist yet.
    /// Fire-and-forget; the reply is not inspected.
    pub fn request_host(&self, shell: WindowHandle) {
        self.system.send_message(shell, self.profile.spawn_message, 0, 0);
    }

    /// Scan top-level windows for the first host-class window that has a
    /// view-class child
    pub fn find_host(&self) -> Result<WindowHandle> {
        let mut class_name = ClassNameBuf::new();
        let mut found = None;
        let mut scanned = 0usize;

        self.system.enum_windows(&mut |window| {
            scanned += 1;
            let name = class_name.read(self.system, window);
            if name.may_be_truncated() {
                tracing::trace!("Class name of {} truncated to {} units", window, name.len());
            }
            if !name.matches(&self.profile.host_class) {
                return ControlFlow::Continue(());
            }
            if self
                .system
                .find_child(window, &self.profile.view_class)
                .is_none()
            {
                tracing::trace!(
                    "Skipping {} {}: no {} child",
                    self.profile.host_class,
                    window,
                    self.profile.view_class
                );
                return ControlFlow::Continue(());
            }
            found = Some(window);
            ControlFlow::Break(())
        });

        tracing::debug!(scanned, host = ?found, "Host window scan finished");

        found.ok_or_else(|| AttachError::HostNotFound {
            host_class: self.profile.host_class.clone(),
            view_class: self.profile.view_class.clone(),
        })
    }

    /// Resolve the shell, request the host, then scan for it
    pub fn locate(&self) -> Result<WindowHandle> {
        if !self.system.is_supported() {
            return Err(AttachError::PlatformNotSupported {
                platform: std::env::consts::OS.to_string(),
            });
        }
        let shell = self.find_shell()?;
        tracing::debug!("Found {} window {}", self.profile.shell_class, shell);
        self.request_host(shell);
        self.find_host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::mock::MockDesktop;

    #[test]
    fn test_missing_shell() {
        let desktop = MockDesktop::new();
        let profile = ShellProfile::default();
        let locator = HostLocator::new(&desktop, &profile);
        assert_eq!(
            locator.locate(),
            Err(AttachError::ShellNotFound { class: "Progman".into() })
        );
        assert!(desktop.messages().is_empty());
    }

    #[test]
    fn test_locate_sends_spawn_message() {
        let desktop = MockDesktop::explorer();
        let profile = ShellProfile::default();
        let locator = HostLocator::new(&desktop, &profile);

        let host = locator.locate().unwrap();

        let shell = desktop.find_window("Progman", None).unwrap();
        let messages = desktop.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].window, shell);
        assert_eq!(messages[0].message, 0x052C);
        assert_eq!((messages[0].wparam, messages[0].lparam), (0, 0));
        assert!(desktop.find_child(host, "SHELLDLL_DefView").is_some());
    }

    #[test]
    fn test_find_host_without_request_fails_on_fresh_explorer() {
        let desktop = MockDesktop::explorer();
        let profile = ShellProfile::default();
        let locator = HostLocator::new(&desktop, &profile);
        assert!(matches!(locator.find_host(), Err(AttachError::HostNotFound { .. })));
    }

    #[test]
    fn test_scan_stops_at_first_match() {
        let desktop = MockDesktop::new();
        let first = desktop.add_window("WorkerW");
        desktop.add_child(first, "SHELLDLL_DefView");
        let second = desktop.add_window("WorkerW");
        desktop.add_child(second, "SHELLDLL_DefView");
        let profile = ShellProfile::default();

        let host = HostLocator::new(&desktop, &profile).find_host().unwrap();
        assert_eq!(host, first);
    }

    #[test]
    fn test_view_child_under_other_class_ignored() {
        let desktop = MockDesktop::new();
        let shell = desktop.add_window("Progman");
        desktop.add_child(shell, "SHELLDLL_DefView");
        desktop.add_window("WorkerW");
        let profile = ShellProfile::default();

        let result = HostLocator::new(&desktop, &profile).find_host();
        assert!(matches!(result, Err(AttachError::HostNotFound { .. })));
    }

    #[test]
    fn test_host_class_match_is_case_sensitive() {
        let desktop = MockDesktop::new();
        let lower = desktop.add_window("workerw");
        desktop.add_child(lower, "SHELLDLL_DefView");
        let profile = ShellProfile::default();

        let result = HostLocator::new(&desktop, &profile).find_host();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_profile() {
        let desktop = MockDesktop::new();
        let shell = desktop.add_window("Shell");
        let host = desktop.add_window("Host");
        desktop.add_child(host, "View");
        let profile = ShellProfile {
            shell_class: "Shell".into(),
            host_class: "Host".into(),
            view_class: "View".into(),
            spawn_message: 0x0400,
        };

        assert_eq!(HostLocator::new(&desktop, &profile).locate(), Ok(host));
        assert_eq!(desktop.messages()[0].window, shell);
        assert_eq!(desktop.messages()[0].message, 0x0400);
    }
}

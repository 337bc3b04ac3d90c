//! Window attachment
//!
//! Reparents a top-level window under the desktop host so it renders behind
//! the desktop icons:
//! 1. Find the shell window (`Progman`)
//! 2. Ask it to create the host (`WorkerW`)
//! 3. Scan top-level windows for the host that holds the icon view
//! 4. Make the host the target's parent

pub mod class_name;
pub mod host;


pub use class_name::{ClassNameBuf, CLASS_NAME_CAPACITY};
pub use host::HostLocator;

use crate::core::config::ShellProfile;
use crate::core::error::{AttachError, Result};
use crate::core::types::WindowHandle;
use crate::os::WindowSystem;

/// Outcome of a successful attach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachReport {
    /// Window that was reparented
    pub target: WindowHandle,
    /// Its new parent
    pub host: WindowHandle,
    /// Parent reported by the platform before the change
    pub previous_parent: WindowHandle,
}

/// Attaches windows to the desktop host
pub struct WindowAttacher<W: WindowSystem> {
    system: W,
    profile: ShellProfile,
}

impl<W: WindowSystem> WindowAttacher<W> {
    /// Create an attacher for the standard Explorer shell
    pub fn new(system: W) -> Self {
        Self::with_profile(system, ShellProfile::default())
    }

    /// Create an attacher with custom window classes
    pub fn with_profile(system: W, profile: ShellProfile) -> Self {
        Self { system, profile }
    }

    pub fn system(&self) -> &W {
        &self.system
    }

    pub fn profile(&self) -> &ShellProfile {
        &self.profile
    }

    /// Attach `target`, reporting only success or failure
    pub fn attach(&self, target: WindowHandle) -> bool {
        match self.try_attach(target) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Attach of {} failed: {}", target, e);
                false
            }
        }
    }

    /// Attach `target` and report which step failed, if any.
    ///
    /// The target handle is passed through unchecked; a stale or null handle
    /// surfaces as `ReparentFailed`.
    pub fn try_attach(&self, target: WindowHandle) -> Result<AttachReport> {
        let host = HostLocator::new(&self.system, &self.profile).locate()?;

        let previous_parent = self
            .system
            .set_parent(target, host)
            .ok_or(AttachError::ReparentFailed { target, host })?;

        tracing::info!(
            target_window = %target,
            host = %host,
            previous = %previous_parent,
            "Window attached to desktop host"
        );

        Ok(AttachReport {
            target,
            host,
            previous_parent,
        })
    }

    /// Attach `target`, then confirm the window manager now reports the host
    /// as its parent
    pub fn attach_and_verify(&self, target: WindowHandle) -> Result<AttachReport> {
        let report = self.try_attach(target)?;
        match self.system.parent_of(target) {
            Some(parent) if parent == report.host => Ok(report),
            other => {
                tracing::warn!(
                    "Parent of {} is {:?} after attach, expected {}",
                    target,
                    other,
                    report.host
                );
                Err(AttachError::ReparentFailed {
                    target,
                    host: report.host,
                })
            }
        }
    }
}

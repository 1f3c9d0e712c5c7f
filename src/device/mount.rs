//! Mount point resolution for removable partitions.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{check_output, IoResultExt, Result};

/// The OS mount subsystem as the watcher needs it.
pub trait MountSubsystem {
    /// Where `device` is currently mounted, if anywhere.
    fn find_mount_point(&self, device: &Path) -> Option<PathBuf>;

    /// Ask the OS to mount `device` somewhere of its choosing.
    fn mount(&self, device: &Path) -> Result<()>;
}

/// `findmnt` for lookups, `udisksctl` for unprivileged mounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMounts;

impl MountSubsystem for SystemMounts {
    fn find_mount_point(&self, device: &Path) -> Option<PathBuf> {
        let output = Command::new("findmnt")
            .args(["-n", "-u", "-l", "-o", "TARGET", "-S"])
            .arg(device)
            .output()
            .command_context("findmnt")
            .ok()?;

        // findmnt exits 1 when the source is not mounted
        let stdout = check_output("findmnt", output).ok()?;
        parse_findmnt_target(&stdout)
    }

    fn mount(&self, device: &Path) -> Result<()> {
        let output = Command::new("udisksctl")
            .args(["mount", "--no-user-interaction", "-b"])
            .arg(device)
            .output()
            .command_context("udisksctl mount")?;

        check_output("udisksctl mount", output)?;
        Ok(())
    }
}

fn parse_findmnt_target(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// Resolves a device to a mount point, mounting it first when needed.
pub struct DeviceMounter<M> {
    mounts: M,
    settle: Duration,
}

impl<M: MountSubsystem> DeviceMounter<M> {
    pub fn new(mounts: M, settle: Duration) -> Self {
        Self { mounts, settle }
    }

    /// Existing mount point, or mount and look again after the settle delay.
    /// Mount failures are logged and come back as `None`.
    pub fn resolve_mount_point(&self, device: &Path) -> Option<PathBuf> {
        if let Some(mount_point) = self.mounts.find_mount_point(device) {
            debug!(device = %device.display(), mount_point = %mount_point.display(), "already mounted");
            return Some(mount_point);
        }

        if let Err(e) = self.mounts.mount(device) {
            warn!(device = %device.display(), error = %e, "auto-mount failed");
            return None;
        }

        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
        self.mounts.find_mount_point(device)
    }
}

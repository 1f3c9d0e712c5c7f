//! Removable storage: discovery, mounting and the background watcher.
//!
//! - [`lsblk`]: block device snapshots from `lsblk --json`
//! - [`mount`]: mount point lookup and auto-mount
//! - [`source`]: attach/detach notifications
//! - [`watcher`]: the thread that turns notifications into [`DeviceEvent`]s

pub mod lsblk;
pub mod mount;
pub mod source;
pub mod watcher;

use std::path::PathBuf;

use crate::library::MediaFiles;

/// Bus name reported for USB attached disks.
pub const USB_BUS: &str = "usb";

/// A block device as seen by the notification source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    /// Full device path (e.g., "/dev/sdb1").
    pub path: PathBuf,
    /// Transport of the disk the device lives on (e.g., "usb", "nvme").
    pub bus: Option<String>,
    /// Whether this is a partition rather than a whole disk.
    pub is_partition: bool,
}

impl BlockDevice {
    /// Only partitions on USB disks are treated as media sticks.
    pub fn qualifies(&self) -> bool {
        self.is_partition && self.bus.as_deref() == Some(USB_BUS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub action: DeviceAction,
    pub device: BlockDevice,
}

/// Message sent from the watcher thread to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Inserted {
        mount_point: PathBuf,
        media: MediaFiles,
    },
    Removed,
}

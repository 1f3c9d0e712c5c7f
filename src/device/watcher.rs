use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use snafu::ResultExt;
use tracing::{debug, error, info, warn};

use super::mount::{DeviceMounter, MountSubsystem, SystemMounts};
use super::source::{DeviceSource, HotplugSource};
use super::{BlockDevice, DeviceAction, DeviceEvent};
use crate::error::{Result, ThreadSpawnSnafu};
use crate::library::scanner;

#[derive(Debug, Clone)]
pub struct WatcherSettings {
    /// Directory whose node creation/removal signals hotplug (normally `/dev`).
    pub device_dir: PathBuf,
    /// Pause between a successful auto-mount and re-querying the mount point.
    pub mount_settle: Duration,
}

/// Liveness handle for the watcher thread. It is never joined: the thread
/// lives until the process exits.
pub struct WatcherHandle {
    handle: JoinHandle<()>,
}

impl WatcherHandle {
    pub fn is_alive(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Start the background watcher. Call once at startup.
pub fn spawn_watcher(settings: WatcherSettings, event_tx: Sender<DeviceEvent>) -> Result<WatcherHandle> {
    let handle = std::thread::Builder::new()
        .name("device-watcher".to_string())
        .spawn(move || {
            let mut source = match HotplugSource::open(&settings.device_dir) {
                Ok(source) => source,
                Err(e) => {
                    error!(error = %e, "device watcher unavailable, USB media will not be detected");
                    return;
                }
            };
            let mounter = DeviceMounter::new(SystemMounts, settings.mount_settle);
            run(&mut source, &mounter, &event_tx);
        })
        .context(ThreadSpawnSnafu)?;

    Ok(WatcherHandle { handle })
}

/// Startup sweep followed by the notification loop.
///
/// Returns when the source closes or nobody is listening any more.
pub fn run<S, M>(source: &mut S, mounter: &DeviceMounter<M>, event_tx: &Sender<DeviceEvent>)
where
    S: DeviceSource,
    M: MountSubsystem,
{
    info!("device watcher started");

    if sweep(source, mounter, event_tx).is_err() {
        info!("event receiver gone, device watcher stopping");
        return;
    }

    while let Some(notification) = source.next_notification() {
        let device = notification.device;
        if !device.qualifies() {
            debug!(device = %device.path.display(), action = ?notification.action, "ignoring device");
            continue;
        }

        let sent = match notification.action {
            DeviceAction::Add => {
                info!(device = %device.path.display(), "USB partition attached");
                match inserted(&device, mounter) {
                    Some(event) => event_tx.send(event),
                    None => {
                        warn!(device = %device.path.display(), "could not mount or find mount point");
                        Ok(())
                    }
                }
            }
            DeviceAction::Remove => {
                info!(device = %device.path.display(), "USB partition removed");
                event_tx.send(DeviceEvent::Removed)
            }
        };

        if sent.is_err() {
            info!("event receiver gone, device watcher stopping");
            return;
        }
    }

    warn!("device notification source closed");
}

/// Report the first already-attached stick that yields a mount point.
///
/// Only one volume is active at a time, so the sweep stops there.
fn sweep<S, M>(
    source: &mut S,
    mounter: &DeviceMounter<M>,
    event_tx: &Sender<DeviceEvent>,
) -> std::result::Result<(), crossbeam_channel::SendError<DeviceEvent>>
where
    S: DeviceSource,
    M: MountSubsystem,
{
    let devices = match source.snapshot() {
        Ok(devices) => devices,
        Err(e) => {
            warn!(error = %e, "startup device sweep failed");
            return Ok(());
        }
    };

    for device in devices.iter().filter(|d| d.qualifies()) {
        if let Some(event) = inserted(device, mounter) {
            info!(device = %device.path.display(), "USB partition already attached");
            return event_tx.send(event);
        }
    }
    Ok(())
}

fn inserted<M: MountSubsystem>(device: &BlockDevice, mounter: &DeviceMounter<M>) -> Option<DeviceEvent> {
    let mount_point = mounter.resolve_mount_point(&device.path)?;
    let media = scanner::scan(&mount_point);
    info!(
        mount_point = %mount_point.display(),
        photos = media.photos.len(),
        music = media.music.len(),
        videos = media.videos.len(),
        "USB media scanned"
    );
    Some(DeviceEvent::Inserted { mount_point, media })
}

use std::collections::{HashMap, VecDeque};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use snafu::ResultExt;
use tracing::{debug, warn};

use super::{lsblk, BlockDevice, DeviceAction, Notification};
use crate::error::{DeviceWatchSnafu, Result};

/// Where attach/detach information comes from.
pub trait DeviceSource {
    /// Block devices attached right now.
    fn snapshot(&mut self) -> Result<Vec<BlockDevice>>;

    /// Block until the next attach/detach. `None` once the source is closed.
    fn next_notification(&mut self) -> Option<Notification>;
}

/// How long a freshly created node may take to show up in lsblk with its
/// transport filled in.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(3);
const SETTLE_PERIOD: Duration = Duration::from_millis(100);

/// Watches the device directory for nodes appearing and disappearing and
/// resolves them through lsblk.
///
/// Remove notifications cannot be looked up after the fact, so every device
/// seen by a snapshot or an add is remembered until it goes away.
pub struct HotplugSource {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<notify::Event>>,
    known: HashMap<PathBuf, BlockDevice>,
    pending: VecDeque<Notification>,
}

impl HotplugSource {
    pub fn open(device_dir: &Path) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )
        .context(DeviceWatchSnafu { path: device_dir })?;

        watcher
            .watch(device_dir, RecursiveMode::NonRecursive)
            .context(DeviceWatchSnafu { path: device_dir })?;

        Ok(Self {
            _watcher: watcher,
            rx,
            known: HashMap::new(),
            pending: VecDeque::new(),
        })
    }

    fn handle_event(&mut self, event: notify::Event) {
        match event.kind {
            EventKind::Create(_) => {
                for path in event.paths {
                    if !is_block_device(&path) {
                        continue;
                    }
                    match settle_lookup(&path) {
                        Some(device) => {
                            self.known.insert(path, device.clone());
                            self.pending.push_back(Notification {
                                action: DeviceAction::Add,
                                device,
                            });
                        }
                        None => warn!(device = %path.display(), "new block device not visible in lsblk"),
                    }
                }
            }
            EventKind::Remove(_) => {
                for path in event.paths {
                    if let Some(device) = self.known.remove(&path) {
                        self.pending.push_back(Notification {
                            action: DeviceAction::Remove,
                            device,
                        });
                    }
                }
            }
            _ => {}
        }
    }
}

impl DeviceSource for HotplugSource {
    fn snapshot(&mut self) -> Result<Vec<BlockDevice>> {
        let devices = lsblk::list_block_devices()?;
        for device in &devices {
            self.known.insert(device.path.clone(), device.clone());
        }
        Ok(devices)
    }

    fn next_notification(&mut self) -> Option<Notification> {
        loop {
            if let Some(notification) = self.pending.pop_front() {
                return Some(notification);
            }
            match self.rx.recv() {
                Ok(Ok(event)) => self.handle_event(event),
                Ok(Err(e)) => warn!(error = %e, "device watch error"),
                Err(_) => return None,
            }
        }
    }
}

fn is_block_device(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.file_type().is_block_device())
        .unwrap_or(false)
}

/// Poll lsblk until the node is listed with a transport, or give up.
fn settle_lookup(path: &Path) -> Option<BlockDevice> {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    let mut last_seen = None;

    while Instant::now() < deadline {
        match lsblk::find_block_device(path) {
            Ok(Some(device)) if device.bus.is_some() => return Some(device),
            Ok(Some(device)) => last_seen = Some(device),
            Ok(None) => {}
            Err(e) => debug!(device = %path.display(), error = %e, "lsblk lookup failed"),
        }
        std::thread::sleep(SETTLE_PERIOD);
    }

    last_seen
}

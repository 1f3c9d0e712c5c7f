#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use mediakiosk::device::mount::MountSubsystem;
use mediakiosk::device::source::DeviceSource;
use mediakiosk::device::{BlockDevice, DeviceAction, Notification};
use mediakiosk::error::{Error, Result};
use mediakiosk::host::HostActions;
use mediakiosk::playback::player::{LaunchRequest, MediaPlayer, PlayerProcess};

// ---------------------------------------------------------------------------
// Player

#[derive(Default)]
struct PlayerLog {
    launches: Vec<LaunchRequest>,
    processes: Vec<FakeProcess>,
    fail: bool,
}

/// Records launches and hands out processes the test can end at will.
#[derive(Clone, Default)]
pub struct FakePlayer {
    log: Arc<Mutex<PlayerLog>>,
}

impl FakePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.log.lock().unwrap().fail = fail;
    }

    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.log.lock().unwrap().launches.clone()
    }

    pub fn last_launch(&self) -> Option<LaunchRequest> {
        self.log.lock().unwrap().launches.last().cloned()
    }

    /// Processes started so far and not yet exited or terminated.
    pub fn live_processes(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .processes
            .iter()
            .filter(|p| !p.exited.load(Ordering::SeqCst) && !p.terminated.load(Ordering::SeqCst))
            .count()
    }

    pub fn terminated(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .processes
            .iter()
            .filter(|p| p.terminated.load(Ordering::SeqCst))
            .count()
    }

    /// Simulate the user closing the most recent player window.
    pub fn finish_last(&self) {
        if let Some(p) = self.log.lock().unwrap().processes.last() {
            p.exited.store(true, Ordering::SeqCst);
        }
    }
}

impl MediaPlayer for FakePlayer {
    fn launch(&self, request: &LaunchRequest) -> Result<Box<dyn PlayerProcess>> {
        let mut log = self.log.lock().unwrap();
        if log.fail {
            return Err(Error::PlayerLaunch {
                program: "fake-player".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }
        log.launches.push(request.clone());
        let process = FakeProcess::default();
        log.processes.push(process.clone());
        Ok(Box::new(process))
    }
}

#[derive(Clone, Default)]
pub struct FakeProcess {
    exited: Arc<AtomicBool>,
    terminated: Arc<AtomicBool>,
}

impl PlayerProcess for FakeProcess {
    fn has_exited(&mut self) -> bool {
        self.exited.load(Ordering::SeqCst) || self.terminated.load(Ordering::SeqCst)
    }

    fn terminate(&mut self) {
        self.terminated.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Host

#[derive(Default)]
struct HostLog {
    opened: Vec<String>,
    wifi_attempts: Vec<(String, String)>,
    wifi_fails: bool,
    reaps: usize,
}

#[derive(Clone, Default)]
pub struct FakeHost {
    log: Arc<Mutex<HostLog>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_wifi_failing(&self, fail: bool) {
        self.log.lock().unwrap().wifi_fails = fail;
    }

    pub fn opened(&self) -> Vec<String> {
        self.log.lock().unwrap().opened.clone()
    }

    pub fn wifi_attempts(&self) -> Vec<(String, String)> {
        self.log.lock().unwrap().wifi_attempts.clone()
    }

    pub fn reaps(&self) -> usize {
        self.log.lock().unwrap().reaps
    }
}

impl HostActions for FakeHost {
    fn open_url(&self, url: &str) -> Result<()> {
        self.log.lock().unwrap().opened.push(url.to_string());
        Ok(())
    }

    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.wifi_attempts.push((ssid.to_string(), password.to_string()));
        if log.wifi_fails {
            return Err(Error::CommandExit {
                command: "nmcli device wifi connect".to_string(),
                code: 10,
                stderr: "No network with SSID found.".to_string(),
            });
        }
        Ok(())
    }

    fn reap_finished(&self) {
        self.log.lock().unwrap().reaps += 1;
    }
}

// ---------------------------------------------------------------------------
// Mounts

/// Devices listed in `mounted` are already mounted; devices in `mountable`
/// get mounted on the first `mount` call.
#[derive(Default)]
pub struct FakeMounts {
    pub mounted: RefCell<HashMap<PathBuf, PathBuf>>,
    pub mountable: HashMap<PathBuf, PathBuf>,
    pub mount_calls: Cell<usize>,
}

impl FakeMounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_mounted(self, device: &str, target: &Path) -> Self {
        self.mounted
            .borrow_mut()
            .insert(PathBuf::from(device), target.to_path_buf());
        self
    }

    pub fn mountable(mut self, device: &str, target: &Path) -> Self {
        self.mountable.insert(PathBuf::from(device), target.to_path_buf());
        self
    }
}

impl MountSubsystem for FakeMounts {
    fn find_mount_point(&self, device: &Path) -> Option<PathBuf> {
        self.mounted.borrow().get(device).cloned()
    }

    fn mount(&self, device: &Path) -> Result<()> {
        self.mount_calls.set(self.mount_calls.get() + 1);
        match self.mountable.get(device) {
            Some(target) => {
                self.mounted
                    .borrow_mut()
                    .insert(device.to_path_buf(), target.clone());
                Ok(())
            }
            None => Err(Error::CommandExit {
                command: "udisksctl mount".to_string(),
                code: 1,
                stderr: "Object is not a mountable filesystem.".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Device source

/// Replays a fixed snapshot and notification script, then closes.
#[derive(Default)]
pub struct ScriptedSource {
    pub snapshot: Vec<BlockDevice>,
    pub script: VecDeque<Notification>,
    pub fail_snapshot: bool,
}

impl ScriptedSource {
    pub fn new(snapshot: Vec<BlockDevice>) -> Self {
        Self {
            snapshot,
            script: VecDeque::new(),
            fail_snapshot: false,
        }
    }

    /// The startup listing fails as if `lsblk` were missing.
    pub fn failing_snapshot() -> Self {
        Self {
            fail_snapshot: true,
            ..Self::default()
        }
    }

    pub fn then(mut self, action: DeviceAction, device: BlockDevice) -> Self {
        self.script.push_back(Notification { action, device });
        self
    }
}

impl DeviceSource for ScriptedSource {
    fn snapshot(&mut self) -> Result<Vec<BlockDevice>> {
        if self.fail_snapshot {
            return Err(Error::CommandExecution {
                command: "lsblk".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }
        Ok(self.snapshot.clone())
    }

    fn next_notification(&mut self) -> Option<Notification> {
        self.script.pop_front()
    }
}

pub fn usb_partition(path: &str) -> BlockDevice {
    BlockDevice {
        path: PathBuf::from(path),
        bus: Some("usb".to_string()),
        is_partition: true,
    }
}

pub fn usb_disk(path: &str) -> BlockDevice {
    BlockDevice {
        is_partition: false,
        ..usb_partition(path)
    }
}

pub fn internal_partition(path: &str) -> BlockDevice {
    BlockDevice {
        path: PathBuf::from(path),
        bus: Some("nvme".to_string()),
        is_partition: true,
    }
}

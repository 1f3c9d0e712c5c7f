//! Side effects the menus trigger outside the media pipeline.

use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{check_output, Error, IoResultExt, Result};

/// Pause between starting NetworkManager and asking it to connect.
const NETWORK_MANAGER_SETTLE: Duration = Duration::from_secs(1);

pub trait HostActions {
    /// Open `url` in the kiosk browser without waiting for it.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Join a Wi-Fi network. Blocks until the attempt finishes.
    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<()>;

    /// Collect launched programs that have exited. Called every tick.
    fn reap_finished(&self) {}
}

#[derive(Debug)]
pub struct SystemHost {
    browser: Vec<String>,
    use_sudo: bool,
    /// Browser processes not yet waited on.
    browsers: Mutex<Vec<Child>>,
}

impl SystemHost {
    pub fn new(browser: Vec<String>, use_sudo: bool) -> Self {
        Self {
            browser,
            use_sudo,
            browsers: Mutex::new(Vec::new()),
        }
    }

    /// Browsers still running after exited ones were waited on.
    pub fn running_browsers(&self) -> usize {
        self.reap_finished();
        self.browsers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn privileged(&self, program: &str) -> Command {
        if self.use_sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg(program);
            cmd
        } else {
            Command::new(program)
        }
    }

    fn run(&self, name: &str, mut cmd: Command) -> Result<()> {
        let output = cmd.stdin(Stdio::null()).output().command_context(name)?;
        check_output(name, output)?;
        Ok(())
    }
}

impl HostActions for SystemHost {
    fn open_url(&self, url: &str) -> Result<()> {
        let (program, args) = self.browser.split_first().ok_or(Error::NoBrowser)?;
        info!(%program, %url, "opening streaming service");

        let child = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .command_context(program.as_str())?;
        self.browsers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(child);
        Ok(())
    }

    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<()> {
        let mut start = self.privileged("systemctl");
        start.args(["start", "NetworkManager"]);
        self.run("systemctl start NetworkManager", start)?;

        std::thread::sleep(NETWORK_MANAGER_SETTLE);

        let mut connect = self.privileged("nmcli");
        connect
            .args(["device", "wifi", "connect"])
            .arg(ssid)
            .arg("password")
            .arg(password);
        self.run("nmcli device wifi connect", connect)?;

        info!(%ssid, "connected to Wi-Fi");
        Ok(())
    }

    fn reap_finished(&self) {
        let mut browsers = self.browsers.lock().unwrap_or_else(PoisonError::into_inner);
        browsers.retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "browser exited");
                false
            }
            Err(e) => {
                warn!(pid = child.id(), error = %e, "could not poll browser process");
                false
            }
        });
    }
}

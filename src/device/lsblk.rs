//! Block device listing using lsblk.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use super::BlockDevice;
use crate::error::{check_output, Error, IoResultExt, Result};

/// Raw JSON structure from lsblk output.
#[derive(Debug, Deserialize)]
struct LsblkOutput {
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Debug, Deserialize)]
struct LsblkDevice {
    name: String,
    #[serde(default)]
    tran: Option<String>,
    #[serde(rename = "type")]
    device_type: Option<String>,
    #[serde(default)]
    children: Option<Vec<LsblkDevice>>,
}

/// Lists all block devices on the system.
///
/// Calls `lsblk --json --output NAME,TRAN,TYPE` and parses the output.
pub fn list_block_devices() -> Result<Vec<BlockDevice>> {
    let output = Command::new("lsblk")
        .args(["--json", "--output", "NAME,TRAN,TYPE"])
        .output()
        .command_context("lsblk")?;

    let stdout = check_output("lsblk", output)?;
    parse(&stdout)
}

/// Looks up a single device in a fresh listing.
pub fn find_block_device(path: &Path) -> Result<Option<BlockDevice>> {
    Ok(list_block_devices()?.into_iter().find(|d| d.path == path))
}

fn parse(json: &str) -> Result<Vec<BlockDevice>> {
    let lsblk_output: LsblkOutput = serde_json::from_str(json).map_err(|e| Error::LsblkParse {
        message: e.to_string(),
    })?;

    let mut devices = Vec::new();
    collect_devices(&lsblk_output.blockdevices, None, &mut devices);
    Ok(devices)
}

/// Recursively collect devices, including partitions.
///
/// lsblk only reports TRAN on the whole disk, so partitions inherit the
/// transport of their parent.
fn collect_devices(
    lsblk_devices: &[LsblkDevice],
    parent_tran: Option<&str>,
    devices: &mut Vec<BlockDevice>,
) {
    for dev in lsblk_devices {
        let tran = dev
            .tran
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(parent_tran);

        devices.push(BlockDevice {
            path: PathBuf::from(format!("/dev/{}", dev.name)),
            bus: tran.map(str::to_string),
            is_partition: dev.device_type.as_deref() == Some("part"),
        });

        if let Some(children) = &dev.children {
            collect_devices(children, tran, devices);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LSBLK_JSON: &str = r#"{
        "blockdevices": [
            {
                "name": "nvme0n1",
                "tran": "nvme",
                "type": "disk",
                "children": [
                    {"name": "nvme0n1p1", "tran": null, "type": "part"},
                    {"name": "nvme0n1p2", "tran": null, "type": "part"}
                ]
            },
            {
                "name": "sda",
                "tran": "usb",
                "type": "disk",
                "children": [
                    {"name": "sda1", "tran": null, "type": "part"}
                ]
            },
            {
                "name": "sr0",
                "tran": "sata",
                "type": "rom"
            }
        ]
    }"#;

    #[test]
    fn test_parse_lsblk_json() {
        let devices = parse(SAMPLE_LSBLK_JSON).unwrap();
        assert_eq!(devices.len(), 6);

        let stick = devices
            .iter()
            .find(|d| d.path == Path::new("/dev/sda1"))
            .unwrap();
        assert_eq!(stick.bus.as_deref(), Some("usb"));
        assert!(stick.is_partition);
        assert!(stick.qualifies());

        let disk = devices
            .iter()
            .find(|d| d.path == Path::new("/dev/sda"))
            .unwrap();
        assert!(!disk.is_partition);
        assert!(!disk.qualifies());
    }

    #[test]
    fn test_internal_partitions_do_not_qualify() {
        let devices = parse(SAMPLE_LSBLK_JSON).unwrap();
        let internal: Vec<_> = devices
            .iter()
            .filter(|d| d.bus.as_deref() == Some("nvme"))
            .collect();
        assert_eq!(internal.len(), 3);
        assert!(internal.iter().all(|d| !d.qualifies()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse("not json"), Err(Error::LsblkParse { .. })));
    }
}

mod common;

use std::fs;
use std::time::Duration;

use common::{internal_partition, usb_disk, usb_partition, FakeMounts, ScriptedSource};
use mediakiosk::device::mount::DeviceMounter;
use mediakiosk::device::watcher::run;
use mediakiosk::device::{DeviceAction, DeviceEvent};
use tempfile::TempDir;

fn collect(mut source: ScriptedSource, mounts: FakeMounts) -> Vec<DeviceEvent> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let mounter = DeviceMounter::new(mounts, Duration::ZERO);
    run(&mut source, &mounter, &tx);
    drop(tx);
    rx.iter().collect()
}

fn stick_with(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in files {
        fs::write(tmp.path().join(name), b"").unwrap();
    }
    tmp
}

#[test]
fn sweep_reports_only_the_first_mountable_stick() {
    let first = stick_with(&["a.jpg"]);
    let second = stick_with(&["b.mp3"]);
    let source = ScriptedSource::new(vec![usb_partition("/dev/sdb1"), usb_partition("/dev/sdc1")]);
    let mounts = FakeMounts::new()
        .already_mounted("/dev/sdb1", first.path())
        .already_mounted("/dev/sdc1", second.path());

    let events = collect(source, mounts);
    assert_eq!(events.len(), 1);
    match &events[0] {
        DeviceEvent::Inserted { mount_point, media } => {
            assert_eq!(mount_point, first.path());
            assert_eq!(media.photos, vec![first.path().join("a.jpg")]);
            assert!(media.music.is_empty());
        }
        other => panic!("expected Inserted, got {:?}", other),
    }
}

#[test]
fn sweep_skips_sticks_that_cannot_be_mounted() {
    let stick = stick_with(&["clip.mp4"]);
    let source = ScriptedSource::new(vec![usb_partition("/dev/sdb1"), usb_partition("/dev/sdc1")]);
    let mounts = FakeMounts::new().mountable("/dev/sdc1", stick.path());

    let events = collect(source, mounts);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        DeviceEvent::Inserted { mount_point, media }
            if mount_point == stick.path() && media.videos.len() == 1
    ));
}

#[test]
fn unmountable_add_emits_nothing() {
    let source = ScriptedSource::new(Vec::new()).then(DeviceAction::Add, usb_partition("/dev/sdb1"));
    let mounts = FakeMounts::new();

    assert!(collect(source, mounts).is_empty());
}

#[test]
fn add_mounts_and_scans() {
    let stick = stick_with(&["song.ogg", "readme.txt"]);
    let source = ScriptedSource::new(Vec::new()).then(DeviceAction::Add, usb_partition("/dev/sdb1"));
    let mounts = FakeMounts::new().mountable("/dev/sdb1", stick.path());

    let events = collect(source, mounts);
    assert_eq!(events.len(), 1);
    match &events[0] {
        DeviceEvent::Inserted { media, .. } => {
            assert_eq!(media.music, vec![stick.path().join("song.ogg")]);
            assert!(media.photos.is_empty() && media.videos.is_empty());
        }
        other => panic!("expected Inserted, got {:?}", other),
    }
}

#[test]
fn non_usb_and_whole_disks_are_ignored() {
    let stick = stick_with(&["a.png"]);
    let source = ScriptedSource::new(vec![internal_partition("/dev/nvme0n1p2"), usb_disk("/dev/sdb")])
        .then(DeviceAction::Add, internal_partition("/dev/nvme0n1p3"))
        .then(DeviceAction::Add, usb_disk("/dev/sdb"))
        .then(DeviceAction::Remove, internal_partition("/dev/nvme0n1p3"))
        .then(DeviceAction::Remove, usb_disk("/dev/sdb"));
    let mounts = FakeMounts::new()
        .already_mounted("/dev/nvme0n1p2", stick.path())
        .already_mounted("/dev/nvme0n1p3", stick.path())
        .already_mounted("/dev/sdb", stick.path());

    assert!(collect(source, mounts).is_empty());
}

#[test]
fn remove_emits_removed_in_order() {
    let stick = stick_with(&["a.gif"]);
    let source = ScriptedSource::new(Vec::new())
        .then(DeviceAction::Add, usb_partition("/dev/sdb1"))
        .then(DeviceAction::Remove, usb_partition("/dev/sdb1"))
        .then(DeviceAction::Remove, usb_partition("/dev/sdc1"));
    let mounts = FakeMounts::new().already_mounted("/dev/sdb1", stick.path());

    let events = collect(source, mounts);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], DeviceEvent::Inserted { .. }));
    assert_eq!(events[1], DeviceEvent::Removed);
    assert_eq!(events[2], DeviceEvent::Removed);
}

#[test]
fn failed_sweep_keeps_watching() {
    let stick = stick_with(&["clip.webm"]);
    let source = ScriptedSource::failing_snapshot()
        .then(DeviceAction::Add, usb_partition("/dev/sdb1"))
        .then(DeviceAction::Remove, usb_partition("/dev/sdb1"));
    let mounts = FakeMounts::new().mountable("/dev/sdb1", stick.path());

    let events = collect(source, mounts);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        DeviceEvent::Inserted { mount_point, media }
            if mount_point == stick.path() && media.videos == vec![stick.path().join("clip.webm")]
    ));
    assert_eq!(events[1], DeviceEvent::Removed);
}

#[test]
fn watcher_stops_when_receiver_is_gone() {
    let stick = stick_with(&["a.gif"]);
    let mut source = ScriptedSource::new(vec![usb_partition("/dev/sdb1")])
        .then(DeviceAction::Remove, usb_partition("/dev/sdb1"))
        .then(DeviceAction::Remove, usb_partition("/dev/sdb1"));
    let mounter = DeviceMounter::new(
        FakeMounts::new().already_mounted("/dev/sdb1", stick.path()),
        Duration::ZERO,
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    drop(rx);
    run(&mut source, &mounter, &tx);

    // The sweep's send failed, so no notification was consumed
    assert_eq!(source.script.len(), 2);
}

//! Unit tests for settings_watcher module.

use promptboard::settings::default_settings_path;
use promptboard::settings_watcher::SettingsWatcher;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_fresh_watcher_is_quiet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let mut watcher = SettingsWatcher::new(path).expect("watch a real directory");
    assert_eq!(watcher.poll(), None);
    assert_eq!(watcher.poll(), None);
}

#[test]
fn test_watcher_needs_parent_directory() {
    // A bare root has no watchable parent.
    let watcher = SettingsWatcher::new(PathBuf::from("/"));
    assert!(watcher.is_err());
}

#[test]
fn test_default_path() {
    // Should resolve on any system with a config directory
    let settings = default_settings_path();
    assert!(settings.is_some() || cfg!(target_os = "unknown"));
    if let Some(path) = settings {
        assert!(path.ends_with("promptboard/settings.json"));
    }
}

/// Real file-system events are delivered on the OS's schedule, so asserting
/// on them is flaky in CI. Run manually when touching the watcher:
///
/// ```text
/// cargo test test_edit_eventually_surfaces -- --ignored
/// ```
#[test]
#[ignore]
fn test_edit_eventually_surfaces() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let mut watcher = SettingsWatcher::new(path.clone()).unwrap();
    fs::write(&path, "{\"reduce_motion\": true}").unwrap();

    // Mostly a does-not-crash check; the event may or may not have landed
    // within one poll on this platform.
    let _event = watcher.poll();
}

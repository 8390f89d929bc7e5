//! Unit tests for notifications module.

use promptboard::notifications::{Toast, ToastManager, ToastVariant};
use std::time::Duration;

#[test]
fn test_toast_creation() {
    let toast = Toast::success("Image generated");
    assert_eq!(toast.message, "Image generated");
    assert_eq!(toast.variant, ToastVariant::Success);
    assert_eq!(toast.source, None);
}

#[test]
fn test_toast_source() {
    let toast = Toast::error("Request timed out").with_source("generation");
    assert_eq!(toast.source.as_deref(), Some("generation"));
}

#[test]
fn test_uniform_default_duration() {
    // All variants dismiss after the same interval.
    let success = Toast::success("a");
    let error = Toast::error("b");
    let info = Toast::info("c");
    assert_eq!(success.duration, error.duration);
    assert_eq!(error.duration, info.duration);
    assert_eq!(success.duration, Duration::from_millis(4000));
}

#[test]
fn test_custom_duration_overrides_default() {
    let toast = Toast::info("slow burn").with_duration(Duration::from_secs(42));
    assert_eq!(toast.duration, Duration::from_secs(42));
}

#[test]
fn test_manager_stacks_in_push_order() {
    let mut manager = ToastManager::new();
    assert!(manager.is_empty());

    manager.push(Toast::success("API key saved"));
    manager.push(Toast::error("Failed to edit image"));
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.toasts()[0].message, "API key saved");
    assert_eq!(manager.toasts()[1].message, "Failed to edit image");

    manager.clear();
    assert!(manager.is_empty());
}

#[test]
fn test_click_dismissal_targets_one_toast() {
    let mut manager = ToastManager::new();
    manager.push(Toast::success("saved"));
    manager.push(Toast::info("catalog refreshed"));
    manager.push(Toast::error("network down"));

    // Clicking the middle toast removes it and only it.
    let clicked = manager.toasts()[1].id;
    manager.remove(clicked);

    let survivors: Vec<_> = manager.toasts().iter().map(|t| t.message.as_str()).collect();
    assert_eq!(survivors, ["saved", "network down"]);
}

#[test]
fn test_prune_removes_expired() {
    let mut manager = ToastManager::new();
    manager.push(Toast::info("gone").with_duration(Duration::ZERO));
    manager.push(Toast::info("stays"));

    assert!(manager.prune(), "Prune should report a removal");
    assert_eq!(manager.count(), 1);
    assert_eq!(manager.toasts()[0].message, "stays");
}

#[test]
fn test_prune_keeps_fresh() {
    let mut manager = ToastManager::new();
    manager.push(Toast::info("fresh"));

    assert!(!manager.prune(), "Nothing expired, nothing to repaint");
    assert_eq!(manager.count(), 1);
}

#[test]
fn test_fresh_toast_lifecycle_state() {
    let toast = Toast::success("just arrived").with_duration(Duration::from_secs(10));
    assert!(!toast.is_expired());
    assert!(toast.remaining_percent() > 0.99);
    assert_eq!(toast.opacity(false), 1.0);
}

#[test]
fn test_remaining_percent_zero_duration() {
    let toast = Toast::success("instant").with_duration(Duration::ZERO);
    assert_eq!(toast.remaining_percent(), 0.0);
}

#[test]
fn test_reduce_motion_disables_fade() {
    // An expired toast would normally be fading out.
    let toast = Toast::success("still solid").with_duration(Duration::ZERO);
    assert_eq!(toast.opacity(true), 1.0);
}

#[test]
fn test_variant_presentation() {
    assert_eq!(ToastVariant::Success.icon(), "✓");
    assert_eq!(ToastVariant::Error.icon(), "✗");
    assert_eq!(ToastVariant::Info.icon(), "ℹ");
    assert_eq!(ToastVariant::Success.label(), "Success");
    assert_eq!(ToastVariant::Error.label(), "Error");
    assert_eq!(ToastVariant::Info.label(), "Info");
}

/// Needs wall-clock time to pass, so it stays out of the default run.
/// Run with: cargo test test_toast_expiration -- --ignored
#[test]
#[ignore]
fn test_toast_expiration() {
    let toast = Toast::success("short lived").with_duration(Duration::from_millis(1));
    std::thread::sleep(Duration::from_millis(10));
    assert!(toast.is_expired());
}

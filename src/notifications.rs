//! Toast notifications.
//!
//! Every user-visible outcome funnels through here: generation failures,
//! credential problems, backend errors, copy confirmations. A toast carries
//! its message, a variant, and the subsystem that raised it, and dismisses
//! itself after a fixed interval.

use crate::constants::{TOAST_DURATION_MS, TOAST_FADE_FRACTION};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Error,
    Success,
    Info,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Error => "✗",
            ToastVariant::Success => "✓",
            ToastVariant::Info => "ℹ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToastVariant::Error => "Error",
            ToastVariant::Success => "Success",
            ToastVariant::Info => "Info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
    /// Subsystem that raised the toast ("generation", "auth", ...). Shown in
    /// logs, not in the UI.
    pub source: Option<String>,
    pub duration: Duration,
    pub created: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            variant,
            source: None,
            duration: Duration::from_millis(TOAST_DURATION_MS),
            created: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= self.duration
    }

    /// Fraction of lifetime left, 1.0 for a fresh toast down to 0.0.
    pub fn remaining_percent(&self) -> f32 {
        let elapsed = self.created.elapsed().as_secs_f32();
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 0.0;
        }
        (1.0 - elapsed / total).clamp(0.0, 1.0)
    }

    /// Render opacity. Fades over the tail of the lifetime unless the user
    /// prefers reduced motion, in which case toasts stay opaque until removal.
    pub fn opacity(&self, reduce_motion: bool) -> f32 {
        if reduce_motion {
            return 1.0;
        }
        let remaining = self.remaining_percent();
        if remaining >= TOAST_FADE_FRACTION {
            1.0
        } else {
            (remaining / TOAST_FADE_FRACTION).clamp(0.0, 1.0)
        }
    }
}

#[derive(Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(
            variant = toast.variant.label(),
            source = toast.source.as_deref().unwrap_or("app"),
            message = %toast.message,
            "Toast"
        );
        self.toasts.push(toast);
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop expired toasts. Returns true if anything was removed, so the
    /// caller knows to repaint.
    pub fn prune(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired());
        self.toasts.len() != before
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

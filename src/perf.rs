//! Frame timing and slow-operation instrumentation.
//!
//! The freeform canvas redraws on every pointer move during a drag, so the
//! render pass and image hit testing are the paths worth watching. The app
//! entity owns a [`PerfMonitor`] that it feeds from its frame tick; hot paths
//! wrap themselves in [`profile_scope!`], which expands to nothing in normal
//! builds and to a [`ScopedTimer`] under the `profiling` feature.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::warn;

/// Frame budget at 60 FPS, in milliseconds.
pub const TARGET_FRAME_MS: f64 = 16.67;

/// How many recent frames the rolling statistics cover.
const FRAME_WINDOW: usize = 60;

/// A frame counts as slow past this multiple of the budget.
const SLOW_FRAME_FACTOR: f64 = 2.0;

/// How many samples each operation keeps.
const OP_WINDOW: usize = 100;

/// Time the enclosing block when the `profiling` feature is on; free
/// otherwise. The variant without a threshold reports past 1ms.
///
/// ```ignore
/// fn resolve_snap() {
///     profile_scope!("snap_resolve");
///     // ... snap math ...
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
    ($name:expr) => {
        $crate::profile_scope!($name, 1.0);
    };
}

pub use profile_scope;

/// Rolling frame statistics plus per-operation timing windows.
pub struct PerfMonitor {
    frames: VecDeque<f64>,
    current: Option<Instant>,
    slow_frames: u64,
    frames_seen: u64,
    ops: HashMap<&'static str, OperationStats>,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(FRAME_WINDOW),
            current: None,
            slow_frames: 0,
            frames_seen: 0,
            ops: HashMap::new(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.current = Some(Instant::now());
    }

    /// Close the frame opened by `begin_frame` and fold its duration into the
    /// window. Returns the frame time in milliseconds, or `None` when no
    /// frame was open.
    pub fn end_frame(&mut self) -> Option<f64> {
        let ms = self.current.take()?.elapsed().as_secs_f64() * 1000.0;

        while self.frames.len() >= FRAME_WINDOW {
            self.frames.pop_front();
        }
        self.frames.push_back(ms);
        self.frames_seen += 1;

        if ms > TARGET_FRAME_MS * SLOW_FRAME_FACTOR {
            self.slow_frames += 1;
            warn!("slow frame: {:.2}ms against a {:.2}ms budget", ms, TARGET_FRAME_MS);
        }

        Some(ms)
    }

    pub fn record_operation(&mut self, name: &'static str, elapsed_ms: f64) {
        self.ops.entry(name).or_default().record(elapsed_ms);
    }

    pub fn get_operation_stats(&self, name: &str) -> Option<&OperationStats> {
        self.ops.get(name)
    }

    pub fn average_frame_time(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.frames.iter().sum::<f64>() / self.frames.len() as f64
    }

    pub fn max_frame_time(&self) -> f64 {
        self.frames.iter().copied().fold(0.0, f64::max)
    }

    /// Share of all frames, not just the window, that blew the budget.
    pub fn slow_frame_percentage(&self) -> f64 {
        if self.frames_seen == 0 {
            return 0.0;
        }
        self.slow_frames as f64 * 100.0 / self.frames_seen as f64
    }

    pub fn estimated_fps(&self) -> f64 {
        match self.average_frame_time() {
            avg if avg > 0.0 => 1000.0 / avg,
            _ => 0.0,
        }
    }

    /// One consolidated warning when the rolling average is over budget,
    /// with the worst offending operations attached.
    pub fn log_summary_if_slow(&self) {
        let avg = self.average_frame_time();
        if avg <= TARGET_FRAME_MS {
            return;
        }

        let mut worst: Vec<(&str, f64)> = self
            .ops
            .iter()
            .map(|(name, stats)| (*name, stats.average()))
            .filter(|(_, ms)| *ms > 0.1)
            .collect();
        worst.sort_by(|a, b| b.1.total_cmp(&a.1));
        worst.truncate(3);
        let culprits: Vec<String> = worst
            .iter()
            .map(|(name, ms)| format!("{} {:.2}ms", name, ms))
            .collect();

        warn!(
            avg_frame_ms = format!("{:.2}", avg),
            max_frame_ms = format!("{:.2}", self.max_frame_time()),
            slow_frames = format!("{:.1}%", self.slow_frame_percentage()),
            fps = format!("{:.1}", self.estimated_fps()),
            culprits = culprits.join(", "),
            "Frame budget exceeded"
        );
    }
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing window for one named operation.
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    peak_ms: f64,
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        while self.samples.len() >= OP_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(ms);
        self.peak_ms = self.peak_ms.max(ms);
    }

    /// Mean over the retained window.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// 95th percentile over the retained window.
    pub fn p95(&self) -> f64 {
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        if sorted.is_empty() {
            return 0.0;
        }
        sorted.sort_unstable_by(f64::total_cmp);
        let idx = (sorted.len() as f64 * 0.95).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    pub fn peak(&self) -> f64 {
        self.peak_ms
    }
}

/// Times a block from construction to drop. Drops past the threshold warn,
/// or trace under the `profiling` feature, which is chattier and meant for
/// watching a single interaction.
pub struct ScopedTimer {
    name: &'static str,
    threshold_ms: f64,
    started: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            threshold_ms,
            started: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if ms <= self.threshold_ms {
            return;
        }
        #[cfg(feature = "profiling")]
        tracing::trace!(scope = self.name, "{:.2}ms", ms);
        #[cfg(not(feature = "profiling"))]
        warn!(
            operation = self.name,
            "slow operation: {:.2}ms over a {:.2}ms threshold",
            ms,
            self.threshold_ms
        );
    }
}

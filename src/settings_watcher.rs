//! Settings file watcher.
//!
//! Watches the settings file's parent directory (editors save-by-replace, so
//! watching the file itself misses the rename) and surfaces a coalesced
//! event when the file changes. The app polls once per frame.

use anyhow::{Context as _, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, Instant};
use tracing::debug;

/// Minimum gap between emitted events. Editors often fire several
/// notifications per save.
const DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    last_emit: Option<Instant>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> Result<Self> {
        let watch_dir = path
            .parent()
            .context("settings path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
            let _ = tx.send(event);
        })?;
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", watch_dir.display()))?;

        debug!(path = %path.display(), "Watching settings file");
        Ok(Self {
            path,
            rx,
            last_emit: None,
            _watcher: watcher,
        })
    }

    /// Drain queued filesystem events and collapse them into at most one
    /// settings event. Non-blocking.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut pending = None;
        while let Ok(event) = self.rx.try_recv() {
            let event = match event {
                Ok(event) => event,
                Err(error) => return Some(SettingsEvent::Error(error.to_string())),
            };
            if !event.paths.iter().any(|p| p == &self.path) {
                continue;
            }
            match event.kind {
                EventKind::Create(_) => pending = Some(SettingsEvent::Created),
                EventKind::Modify(_) => pending = Some(SettingsEvent::Modified),
                EventKind::Remove(_) => {
                    // Save-by-replace emits a remove mid-sequence; any create
                    // or modify in the same drain wins over it.
                    if pending.is_none() {
                        pending = Some(SettingsEvent::Deleted);
                    }
                }
                _ => {}
            }
        }

        let event = pending?;
        if let Some(last) = self.last_emit {
            if last.elapsed() < DEBOUNCE {
                return None;
            }
        }
        self.last_emit = Some(Instant::now());
        Some(event)
    }
}

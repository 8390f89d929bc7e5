//! Unit tests for Promptboard.

mod background_tests;
mod notifications_tests;
mod perf_tests;
mod settings_watcher_tests;
mod snapshot_tests;
mod storage_tests;

//! Single test binary entry point.
//!
//! All tests compile into one binary (matklad's layout) so the suite
//! links once instead of once per file.
//!
//! - helpers: Shared builders, the mock HTTP server, and assertions
//! - integration: Multi-component workflow tests
//! - unit: Single-component unit tests

mod helpers;
mod integration;
mod unit;

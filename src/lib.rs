//! Promptboard - a prompt-driven image board.
//!
//! Generations go through a hosted image API; results land on a canvas
//! with single, grid, and free-form layouts. The crate splits into the
//! application object (`app`), the board model (`board`), drag and zoom
//! input (`input`, `snap`), rendering (`render`), and the service layer
//! (`api`, `background`, `credentials`, `storage`).

pub mod api;
pub mod app;
pub mod background;
pub mod board;
pub mod constants;
pub mod credentials;
pub mod crypto;
pub mod image_cache;
pub mod input;
pub mod notifications;
pub mod perf;
pub mod render;
pub mod settings;
pub mod settings_watcher;
pub mod snap;
pub mod storage;
pub mod types;

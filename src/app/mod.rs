//! Application module - the main Promptboard application state and logic.
//!
//! This module is organized into several submodules:
//! - `types` - Events, enums, and pipeline result types
//! - `state` - The Promptboard struct definition and sub-structs
//! - `lifecycle` - Initialization, frame tick, settings hot-reload
//! - `chat` - Prompt submission, templates, reference image
//! - `pipeline` - Generation branches and result application
//! - `canvas_controls` - View mode, zoom, per-image actions
//! - `account` - API key modal, model catalog, backend session
//! - `settings_handlers` - Settings modal and theme application

mod account;
mod canvas_controls;
mod chat;
mod lifecycle;
mod pipeline;
mod settings_handlers;
mod state;
mod types;

pub use pipeline::{PipelineBranch, run_branch, storyboard_prompts};
pub use state::Promptboard;
pub use types::*;

// Re-export sub-structs for use in other modules
pub use state::{AccountState, CanvasState, ChatState, SettingsState, SystemState, UiState};

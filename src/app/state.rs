//! Application state - the Promptboard struct definition and sub-structs.

use super::{AppEvent, SettingsTab};
use crate::api::models::{ImageSize, ModelInfo, User};
use crate::api::{BackendClient, GenerationClient};
use crate::background::BackgroundExecutor;
use crate::board::Board;
use crate::credentials::CredentialStore;
use crate::image_cache::ImageCache;
use crate::input::InputState as CanvasInputState;
use crate::notifications::ToastManager;
use crate::perf::PerfMonitor;
use crate::settings::Settings;
use crate::settings_watcher::SettingsWatcher;
use crate::snap::GuideSet;
use crate::types::{ChatMessage, Template};
use gpui::*;
use gpui_component::input::InputState;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

// =============================================================================
// Sub-structs composing the main application state
// =============================================================================

/// Chat panel state - conversation, prompt input, generation options
pub struct ChatState {
    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,
    /// The prompt input; recreated to clear it after a send
    pub prompt_input: Entity<InputState>,
    /// Recreate the prompt input on the next frame (clears its text)
    pub pending_input_reset: bool,
    /// Refocus the prompt input on the next frame (set when a modal closes)
    pub pending_focus_prompt: bool,
    /// Selected model id
    pub model: String,
    /// Selected output size
    pub size: ImageSize,
    /// Templates currently offered in the panel
    pub templates: Vec<Template>,
    /// Selected template id, if any
    pub active_template: Option<String>,
    /// Reference image for image-to-image, dropped in from disk
    pub reference_image: Option<PathBuf>,
    /// A generation is in flight; sends are ignored until it resolves
    pub generating: bool,
    /// Scroll handle for the message list
    pub scroll: ScrollHandle,
}

/// Canvas interaction state - board data, drag machine, snap guides
pub struct CanvasState {
    /// Placed images, view mode, zoom, selection
    pub board: Board,
    /// Input state machine for the drag gesture
    pub input_state: CanvasInputState,
    /// Alignment guides for the drag in progress
    pub active_guides: GuideSet,
}

/// Settings state - settings data and modal UI state
pub struct SettingsState {
    /// Parsed settings.json contents
    pub data: Settings,
    /// Whether the modal is open
    pub show: bool,
    /// Set on backdrop mouse-down, checked on mouse-up
    pub backdrop_clicked: bool,
    /// Tab the modal last showed
    pub tab: SettingsTab,
}

/// Account state - credentials, API clients, key modal
pub struct AccountState {
    /// Encrypted key + session token persistence
    pub credentials: CredentialStore,
    /// Image API client, rebuilt when the key or base URL changes
    pub generation: GenerationClient,
    /// Companion backend client
    pub backend: BackendClient,
    /// Signed-in backend user, if any
    pub user: Option<User>,
    /// Model catalog from GET /models, refreshed at startup
    pub catalog: Vec<ModelInfo>,
    /// Show the API key modal
    pub show_key_modal: bool,
    /// Input for the API key (created when the modal opens)
    pub key_input: Option<Entity<InputState>>,
    /// Backdrop clicked flag for the key modal
    pub key_backdrop_clicked: bool,
}

/// UI state - toasts and transient overlay state
pub struct UiState {
    /// Toast notification manager
    pub toast_manager: ToastManager,
}

/// Performance and system state
pub struct SystemState {
    /// Total frame count, drives the periodic perf summary
    pub frame_count: u64,
    /// Frame timings and per-operation stats
    pub perf_monitor: PerfMonitor,
    /// Worker pool for network and disk jobs
    pub background: BackgroundExecutor,
    /// Watches settings.json so edits apply without a restart
    pub settings_watcher: Option<SettingsWatcher>,
    /// Local image cache; None if no writable directory was found
    pub image_cache: Option<Arc<ImageCache>>,
    /// Jobs report back through this channel, drained once per frame
    pub events_rx: Receiver<AppEvent>,
    /// Cloned into each job's completion callback
    pub events_tx: Sender<AppEvent>,
}

/// Main application state - composed of focused sub-structs
pub struct Promptboard {
    /// Chat panel state
    pub chat: ChatState,
    /// Canvas interaction state
    pub canvas: CanvasState,
    /// Settings state
    pub settings: SettingsState,
    /// Account and API client state
    pub account: AccountState,
    /// UI state
    pub ui: UiState,
    /// System and performance state
    pub system: SystemState,
}

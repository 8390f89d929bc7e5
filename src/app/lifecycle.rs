//! Application lifecycle - initialization and per-frame bookkeeping.

use super::{AppEvent, Promptboard, SettingsTab};
use crate::api::{BackendClient, GenerationClient};
use crate::app::state::{
    AccountState, CanvasState, ChatState, SettingsState, SystemState, UiState,
};
use crate::background::BackgroundExecutor;
use crate::board::Board;
use crate::credentials::CredentialStore;
use crate::image_cache::ImageCache;
use crate::input::InputState as CanvasInputState;
use crate::notifications::{Toast, ToastManager};
use crate::perf::PerfMonitor;
use crate::profile_scope;
use crate::settings::Settings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::snap::GuideSet;
use crate::types::Template;
use gpui::*;
use gpui_component::input::{InputEvent, InputState};
use std::sync::Arc;
use std::sync::mpsc::channel;
use std::time::Instant;

/// Placeholder shown in the empty prompt input.
const PROMPT_PLACEHOLDER: &str = "Describe the image you want...";

impl Promptboard {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let settings = Settings::load();
        let credentials = CredentialStore::load();
        let mut toast_manager = ToastManager::new();

        // A stored-but-undecryptable key is an error, never silently dropped.
        let api_key = match credentials.api_key() {
            Ok(key) => key,
            Err(error) => {
                tracing::warn!(%error, "Stored API key could not be decrypted");
                toast_manager.push(
                    Toast::error("Stored API key could not be decrypted. Enter it again.")
                        .with_source("auth"),
                );
                None
            }
        };

        let generation = GenerationClient::with_base_url(&settings.image_api_url, api_key);
        let backend =
            BackendClient::with_base_url(&settings.backend_url, credentials.session_token());

        let image_cache = match ImageCache::new() {
            Ok(cache) => Some(Arc::new(cache)),
            Err(error) => {
                tracing::error!(%error, "Image cache unavailable, cannot place generated images");
                toast_manager.push(
                    Toast::error("No writable cache directory found").with_source("storage"),
                );
                None
            }
        };

        let (events_tx, events_rx) = channel();
        let prompt_input = Self::build_prompt_input(None, window, cx);

        let mut app = Self {
            chat: ChatState {
                messages: Vec::new(),
                prompt_input,
                pending_input_reset: false,
                pending_focus_prompt: false,
                model: settings.default_model.clone(),
                size: settings.default_size,
                templates: Template::seed(),
                active_template: None,
                reference_image: None,
                generating: false,
                scroll: ScrollHandle::new(),
            },
            canvas: CanvasState {
                board: Board::new(),
                input_state: CanvasInputState::default(),
                active_guides: GuideSet::default(),
            },
            settings: SettingsState {
                data: settings,
                show: false,
                backdrop_clicked: false,
                tab: SettingsTab::default(),
            },
            account: AccountState {
                credentials,
                generation,
                backend,
                user: None,
                catalog: Vec::new(),
                show_key_modal: false,
                key_input: None,
                key_backdrop_clicked: false,
            },
            ui: UiState { toast_manager },
            system: SystemState {
                frame_count: 0,
                perf_monitor: PerfMonitor::new(),
                background: BackgroundExecutor::with_default_workers(),
                settings_watcher: crate::settings::default_settings_path()
                    .and_then(|p| SettingsWatcher::new(p).ok()),
                image_cache,
                events_rx,
                events_tx,
            },
        };

        app.apply_theme(cx);
        app.refresh_catalog();
        app.refresh_profile();
        app
    }

    /// Create the prompt input and wire Enter to submit. Recreating the
    /// input is also how it gets cleared after a send or prefilled by a
    /// template.
    pub(super) fn build_prompt_input(
        initial: Option<&str>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Entity<InputState> {
        let input = cx.new(|cx| {
            let mut state = InputState::new(window, cx).placeholder(PROMPT_PLACEHOLDER);
            if let Some(text) = initial {
                state = state.default_value(text.to_string());
            }
            state
        });
        cx.subscribe(&input, |this, _input, event: &InputEvent, cx| {
            if let InputEvent::PressEnter { .. } = event {
                this.submit_prompt(cx);
            }
        })
        .detach();
        input
    }

    /// Per-frame bookkeeping, called from the top of render: frame stats,
    /// settings hot-reload, background completions, queued UI work.
    pub fn on_frame(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        profile_scope!("frame_tick");

        // The monitor brackets the bookkeeping tick; the render paths carry
        // their own profile scopes.
        self.system.perf_monitor.begin_frame();
        self.system.frame_count += 1;

        self.check_settings_reload(cx);

        let completed = self.system.background.process_results();
        let mut events = Vec::new();
        while let Ok(event) = self.system.events_rx.try_recv() {
            events.push(event);
        }
        for event in events {
            let started = Instant::now();
            self.apply_event(event, window, cx);
            self.system
                .perf_monitor
                .record_operation("apply_event", started.elapsed().as_secs_f64() * 1000.0);
        }

        if self.chat.pending_input_reset {
            self.chat.pending_input_reset = false;
            self.reset_prompt_input(window, cx);
        }

        if self.chat.pending_focus_prompt {
            self.chat.pending_focus_prompt = false;
            self.chat.prompt_input.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        }

        // The key modal can be requested from paths without window access;
        // its input is created here, before the modal renders this frame.
        if self.account.show_key_modal && self.account.key_input.is_none() {
            self.create_key_input(window, cx);
        }

        let expired = self.ui.toast_manager.prune();

        // Keep frames coming while work is in flight or toasts are fading.
        if completed > 0
            || expired
            || self.system.background.has_pending()
            || !self.ui.toast_manager.is_empty()
        {
            cx.notify();
        }

        self.system.perf_monitor.end_frame();
        if self.system.frame_count % 600 == 0 {
            self.system.perf_monitor.log_summary_if_slow();
        }
    }

    /// Check for settings file changes and reload if needed.
    pub fn check_settings_reload(&mut self, cx: &mut Context<Self>) {
        let Some(watcher) = self.system.settings_watcher.as_mut() else {
            return;
        };
        let Some(event) = watcher.poll() else {
            return;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                let reloaded = Settings::load();
                if reloaded == self.settings.data {
                    return;
                }
                tracing::info!("Settings file changed, reloading");
                let urls_changed = reloaded.image_api_url != self.settings.data.image_api_url
                    || reloaded.backend_url != self.settings.data.backend_url;
                self.settings.data = reloaded;
                self.apply_theme(cx);
                if urls_changed {
                    self.apply_base_urls();
                }
                self.ui.toast_manager
                    .push(Toast::info("Settings reloaded").with_source("settings"));
                cx.notify();
            }
            SettingsEvent::Deleted => {
                tracing::warn!("Settings file deleted, keeping current settings");
                self.ui.toast_manager
                    .push(Toast::info("Settings file deleted").with_source("settings"));
            }
            SettingsEvent::Error(e) => {
                tracing::error!("Settings watch error: {}", e);
            }
        }
    }

    /// Point both API clients at the configured base URLs.
    pub(super) fn apply_base_urls(&mut self) {
        self.account
            .generation
            .set_base_url(&self.settings.data.image_api_url);
        self.account
            .backend
            .set_base_url(&self.settings.data.backend_url);
    }

    /// Route one background-job event to its handler.
    fn apply_event(&mut self, event: AppEvent, window: &mut Window, cx: &mut Context<Self>) {
        match event {
            AppEvent::Generation(outcome) => self.apply_generation(outcome, window, cx),
            AppEvent::Catalog(models) => {
                tracing::info!(count = models.len(), "Model catalog refreshed");
                self.account.catalog = models;
                cx.notify();
            }
            AppEvent::Profile(user) => {
                tracing::info!(username = %user.username, "Signed in from stored session");
                self.account.user = Some(user);
                cx.notify();
            }
            AppEvent::SessionExpired { message } => {
                tracing::warn!(%message, "Stored session token rejected");
                self.sign_out_locally();
                self.ui.toast_manager.push(
                    Toast::info("Backend session expired, sign in again").with_source("auth"),
                );
                cx.notify();
            }
        }
    }
}

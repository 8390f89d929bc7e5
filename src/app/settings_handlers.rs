//! Settings modal handlers and theme application.

use crate::api::models::ImageSize;
use crate::app::{Promptboard, SettingsTab};
use crate::notifications::Toast;
use crate::settings::ThemeMode;
use gpui::{Context, Window};
use tracing::warn;

impl Promptboard {
    pub fn toggle_settings(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.settings.show {
            self.settings.show = false;
            self.settings.backdrop_clicked = false;
            self.chat.prompt_input.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        } else {
            self.settings.show = true;
            self.settings.tab = SettingsTab::default();
        }
        cx.notify();
    }

    pub fn set_settings_tab(&mut self, tab: SettingsTab, cx: &mut Context<Self>) {
        self.settings.tab = tab;
        cx.notify();
    }

    /// Push the configured theme mode into the component theme. System mode
    /// keeps whatever the toolkit detected at startup.
    pub fn apply_theme(&mut self, cx: &mut Context<Self>) {
        let mode = match self.settings.data.theme {
            ThemeMode::Light => Some(gpui_component::theme::ThemeMode::Light),
            ThemeMode::Dark => Some(gpui_component::theme::ThemeMode::Dark),
            ThemeMode::System => None,
        };
        if let Some(mode) = mode {
            gpui_component::theme::Theme::global_mut(cx).mode = mode;
        }
        cx.notify();
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode, cx: &mut Context<Self>) {
        if self.settings.data.theme == mode {
            return;
        }
        self.settings.data.theme = mode;
        self.persist_settings();
        self.apply_theme(cx);
    }

    pub fn toggle_reduce_motion(&mut self, cx: &mut Context<Self>) {
        self.settings.data.reduce_motion = !self.settings.data.reduce_motion;
        self.persist_settings();
        cx.notify();
    }

    pub fn toggle_snap_to_edges(&mut self, cx: &mut Context<Self>) {
        self.settings.data.snap_to_edges = !self.settings.data.snap_to_edges;
        self.persist_settings();
        cx.notify();
    }

    /// Default model for new sessions; also applied to the current chat
    /// selector so the change is visible immediately.
    pub fn set_default_model(&mut self, model: String, cx: &mut Context<Self>) {
        if self.settings.data.default_model == model {
            return;
        }
        self.settings.data.default_model = model.clone();
        self.chat.model = model;
        self.persist_settings();
        cx.notify();
    }

    pub fn set_default_size(&mut self, size: ImageSize, cx: &mut Context<Self>) {
        if self.settings.data.default_size == size {
            return;
        }
        self.settings.data.default_size = size;
        self.chat.size = size;
        self.persist_settings();
        cx.notify();
    }

    fn persist_settings(&mut self) {
        if let Err(err) = self.settings.data.save() {
            warn!(error = %err, "failed to save settings");
            self.ui.toast_manager.push(
                Toast::error(format!("Could not save settings: {err}"))
                    .with_source("settings"),
            );
        }
    }

    // ==================== Modal backdrop handlers ====================

    /// Mouse down on the settings backdrop sets a flag to track where the
    /// click started.
    pub fn settings_backdrop_mouse_down(&mut self) {
        self.settings.backdrop_clicked = true;
    }

    /// Mouse up on the backdrop closes the modal only when the click also
    /// started there.
    pub fn settings_backdrop_mouse_up(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.settings.backdrop_clicked {
            self.settings.backdrop_clicked = false;
            self.toggle_settings(window, cx);
        }
        cx.notify();
    }

    /// Reset the backdrop flag when the click lands on modal content.
    pub fn settings_backdrop_reset(&mut self) {
        self.settings.backdrop_clicked = false;
    }
}

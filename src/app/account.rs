//! Account methods: API key modal, model catalog, backend session.

use crate::app::{AppEvent, Promptboard};
use crate::notifications::Toast;
use gpui::{Context, Entity, Window};
use gpui_component::input::{InputEvent, InputState};
use tracing::{debug, info, warn};

const KEY_PLACEHOLDER: &str = "Enter your API key";

/// Where new users get a key for the image service.
const REGISTRATION_URL: &str = "https://s.qiniu.com/FbMvqa";

/// Profile refresh outcome, split so an expired session can be told apart
/// from a transient network failure.
enum ProfileOutcome {
    Active(crate::api::models::User),
    Expired(String),
}

impl Promptboard {
    // ==================== API key modal ====================

    /// Open the key modal. The input entity is created on the next frame
    /// because some callers (generation callbacks) have no window access.
    pub fn open_key_modal(&mut self, cx: &mut Context<Self>) {
        if self.account.show_key_modal {
            return;
        }
        self.account.show_key_modal = true;
        self.account.key_backdrop_clicked = false;
        cx.notify();
    }

    pub fn close_key_modal(&mut self, cx: &mut Context<Self>) {
        if !self.account.show_key_modal {
            return;
        }
        self.account.show_key_modal = false;
        self.account.key_backdrop_clicked = false;
        // Dropped so the next open starts from an empty field.
        self.account.key_input = None;
        self.chat.pending_focus_prompt = true;
        cx.notify();
    }

    /// Build the masked key input and wire Enter to save. Called from the
    /// frame tick once the modal is requested.
    pub(super) fn create_key_input(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let input: Entity<InputState> = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(KEY_PLACEHOLDER)
                .masked(true)
        });
        cx.subscribe(&input, |this, _input, event: &InputEvent, cx| {
            if let InputEvent::PressEnter { .. } = event {
                this.save_api_key(cx);
            }
        })
        .detach();
        let focus_target = input.clone();
        self.account.key_input = Some(input);
        window.defer(cx, move |window, cx| {
            focus_target.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        });
    }

    /// Validate, encrypt and store the key, then point the generation
    /// client at it.
    pub fn save_api_key(&mut self, cx: &mut Context<Self>) {
        let Some(input) = self.account.key_input.clone() else {
            return;
        };
        let raw = input.read(cx).text().to_string();
        let key = raw.trim().to_string();
        if key.is_empty() {
            self.ui.toast_manager
                .push(Toast::error("API key cannot be empty").with_source("auth"));
            cx.notify();
            return;
        }
        match self.account.credentials.set_api_key(&key) {
            Ok(()) => {
                self.account.generation.set_api_key(Some(key));
                info!("api key updated");
                self.ui.toast_manager
                    .push(Toast::success("API key saved").with_source("auth"));
                self.close_key_modal(cx);
                self.refresh_catalog();
            }
            Err(err) => {
                warn!(error = %err, "failed to store api key");
                self.ui.toast_manager.push(
                    Toast::error(format!("Could not save the API key: {err}"))
                        .with_source("auth"),
                );
            }
        }
        cx.notify();
    }

    pub fn clear_api_key(&mut self, cx: &mut Context<Self>) {
        if let Err(err) = self.account.credentials.clear_api_key() {
            warn!(error = %err, "failed to clear api key");
            self.ui.toast_manager.push(
                Toast::error(format!("Could not remove the API key: {err}"))
                    .with_source("auth"),
            );
            cx.notify();
            return;
        }
        self.account.generation.set_api_key(None);
        self.account.catalog.clear();
        self.ui.toast_manager
            .push(Toast::info("API key removed").with_source("auth"));
        cx.notify();
    }

    pub fn open_registration_page(&mut self, cx: &mut Context<Self>) {
        if let Err(err) = open::that(REGISTRATION_URL) {
            warn!(error = %err, "could not open registration page");
            self.ui.toast_manager
                .push(Toast::error("Could not open the browser").with_source("auth"));
            cx.notify();
        }
    }

    // ==================== Key modal backdrop ====================

    /// Mouse down on the backdrop sets a flag so a drag that starts on the
    /// modal and ends outside does not dismiss it.
    pub fn key_backdrop_mouse_down(&mut self) {
        self.account.key_backdrop_clicked = true;
    }

    pub fn key_backdrop_mouse_up(&mut self, cx: &mut Context<Self>) {
        if self.account.key_backdrop_clicked {
            self.close_key_modal(cx);
        }
        self.account.key_backdrop_clicked = false;
    }

    pub fn key_backdrop_reset(&mut self) {
        self.account.key_backdrop_clicked = false;
    }

    // ==================== Catalog and profile ====================

    /// Fetch the model catalog on a worker. Failures stay quiet; the
    /// selector falls back to the built-in model list.
    pub fn refresh_catalog(&mut self) {
        if !self.account.generation.has_key() {
            debug!("skipping catalog refresh, no api key");
            return;
        }
        let client = self.account.generation.clone();
        let tx = self.system.events_tx.clone();
        self.system.background.spawn(
            "list_models",
            move || client.list_models().map_err(|err| err.to_string()),
            move |result| match result {
                Ok(models) => {
                    let _ = tx.send(AppEvent::Catalog(models));
                }
                Err(err) => debug!(error = %err, "model catalog refresh failed"),
            },
        );
    }

    /// Fetch the signed-in user's profile if a session token is stored. An
    /// auth rejection means the token expired while the app was closed.
    pub fn refresh_profile(&mut self) {
        if !self.account.backend.is_authenticated() {
            return;
        }
        let client = self.account.backend.clone();
        let tx = self.system.events_tx.clone();
        self.system.background.spawn(
            "user_profile",
            move || match client.user_profile() {
                Ok(user) => Ok(ProfileOutcome::Active(user)),
                Err(err) if err.is_auth() => Ok(ProfileOutcome::Expired(err.to_string())),
                Err(err) => Err(err.to_string()),
            },
            move |result| match result {
                Ok(ProfileOutcome::Active(user)) => {
                    let _ = tx.send(AppEvent::Profile(user));
                }
                Ok(ProfileOutcome::Expired(message)) => {
                    let _ = tx.send(AppEvent::SessionExpired { message });
                }
                Err(err) => debug!(error = %err, "profile refresh failed"),
            },
        );
    }

    // ==================== Session ====================

    /// Drop the session without a toast. Used when the backend reports the
    /// token expired.
    pub(super) fn sign_out_locally(&mut self) {
        self.account.backend.logout();
        if let Err(err) = self.account.credentials.clear_session_token() {
            warn!(error = %err, "failed to clear session token");
        }
        self.account.user = None;
    }

    pub fn sign_out(&mut self, cx: &mut Context<Self>) {
        self.sign_out_locally();
        info!("signed out");
        self.ui.toast_manager
            .push(Toast::info("Signed out").with_source("account"));
        cx.notify();
    }
}

//! Chat panel methods - prompt submission, templates, reference images.

use super::{PipelineBranch, Promptboard};
use crate::api::models::ImageSize;
use crate::constants::TEMPLATE_COUNT;
use crate::image_cache::file_to_data_url;
use crate::notifications::Toast;
use crate::types::{ChatMessage, Template, STORYBOARD_TEMPLATE_ID};
use gpui::*;
use std::path::PathBuf;
use tracing::{info, warn};

impl Promptboard {
    /// Send the current prompt. Ignored while a generation is in flight or
    /// when the prompt is empty; without an API key it opens the key modal
    /// instead.
    pub fn submit_prompt(&mut self, cx: &mut Context<Self>) {
        if self.chat.generating {
            return;
        }
        let raw = self.chat.prompt_input.read(cx).text().to_string();
        let prompt = raw.trim().to_string();
        if prompt.is_empty() {
            return;
        }

        if !self.account.generation.has_key() {
            self.ui.toast_manager.push(
                Toast::error("Add your API key to generate images").with_source("auth"),
            );
            self.open_key_modal(cx);
            return;
        }

        let template = self.chat.active_template.clone();
        info!(template = ?template, "Submitting prompt");

        self.chat.messages
            .push(ChatMessage::user(prompt.clone()).with_template(template.clone()));

        let branch = if template.as_deref() == Some(STORYBOARD_TEMPLATE_ID) {
            PipelineBranch::Storyboard
        } else if let Some(path) = self.chat.reference_image.clone() {
            match file_to_data_url(&path) {
                Ok(reference) => PipelineBranch::Edit { reference },
                Err(error) => {
                    warn!(%error, path = %path.display(), "Reference image unreadable");
                    self.ui.toast_manager.push(
                        Toast::error("Could not read the reference image").with_source("chat"),
                    );
                    self.chat.reference_image = None;
                    PipelineBranch::Text
                }
            }
        } else {
            PipelineBranch::Text
        };

        if self.spawn_generation(prompt, branch, template) {
            self.chat.generating = true;
            self.chat.pending_input_reset = true;
        }
        cx.notify();
    }

    /// Replace the prompt input with a fresh empty one and focus it.
    pub(super) fn reset_prompt_input(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.chat.prompt_input = Self::build_prompt_input(None, window, cx);
        let input = self.chat.prompt_input.clone();
        window.defer(cx, move |window, cx| {
            input.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        });
        cx.notify();
    }

    // ==================== Templates ====================

    /// Select a template and prefill the prompt with its text. Clicking the
    /// active template again deselects it, keeping the typed prompt.
    pub fn select_template(
        &mut self,
        template_id: &str,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.chat.active_template.as_deref() == Some(template_id) {
            self.chat.active_template = None;
            cx.notify();
            return;
        }
        let Some(template) = self.chat.templates.iter().find(|t| t.id == template_id) else {
            return;
        };
        self.chat.active_template = Some(template.id.to_string());

        self.chat.prompt_input = Self::build_prompt_input(Some(template.prompt), window, cx);
        let input = self.chat.prompt_input.clone();
        window.defer(cx, move |window, cx| {
            input.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        });
        cx.notify();
    }

    /// Draw a fresh set of templates from the rotating pool.
    pub fn shuffle_templates(&mut self, cx: &mut Context<Self>) {
        self.chat.templates = Template::shuffle(TEMPLATE_COUNT);
        // The selected template may no longer be visible; drop it so a
        // storyboard selection cannot linger invisibly.
        self.chat.active_template = None;
        cx.notify();
    }

    // ==================== Generation options ====================

    pub fn set_model(&mut self, model_id: &str, cx: &mut Context<Self>) {
        if self.chat.model != model_id {
            self.chat.model = model_id.to_string();
            cx.notify();
        }
    }

    pub fn set_size(&mut self, size: ImageSize, cx: &mut Context<Self>) {
        if self.chat.size != size {
            self.chat.size = size;
            cx.notify();
        }
    }

    // ==================== Reference image ====================

    /// Open a file picker and attach the chosen image as the
    /// image-to-image reference.
    pub fn pick_reference_image(&mut self, cx: &mut Context<Self>) {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif"])
            .pick_file();
        if let Some(path) = picked {
            self.attach_reference(path, cx);
        }
    }

    /// Attach a file as the image-to-image reference.
    pub fn attach_reference(&mut self, path: PathBuf, cx: &mut Context<Self>) {
        if !path.is_file() {
            self.ui.toast_manager
                .push(Toast::error("Reference file not found").with_source("chat"));
            return;
        }
        let is_image = matches!(
            path.extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .as_deref(),
            Some("png") | Some("jpg") | Some("jpeg") | Some("webp") | Some("gif")
        );
        if !is_image {
            self.ui.toast_manager
                .push(Toast::error("Reference must be an image file").with_source("chat"));
            return;
        }
        info!(path = %path.display(), "Reference image attached");
        self.chat.reference_image = Some(path);
        self.ui.toast_manager.push(
            Toast::info("Reference attached, next prompt edits this image").with_source("chat"),
        );
        cx.notify();
    }

    pub fn clear_reference(&mut self, cx: &mut Context<Self>) {
        if self.chat.reference_image.take().is_some() {
            cx.notify();
        }
    }
}

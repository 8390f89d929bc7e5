//! Canvas-level controls: view mode, zoom, selection, and the per-image
//! actions on the selected card.

use crate::app::Promptboard;
use crate::notifications::Toast;
use crate::snap::GuideSet;
use crate::types::ViewMode;
use gpui::Context;
use std::path::Path;
use tracing::{info, warn};

impl Promptboard {
    pub fn set_view_mode(&mut self, mode: ViewMode, cx: &mut Context<Self>) {
        if self.canvas.board.view_mode == mode {
            return;
        }
        self.canvas.board.set_view_mode(mode);
        self.canvas.input_state.reset();
        self.canvas.active_guides = GuideSet::default();
        cx.notify();
    }

    pub fn zoom_in(&mut self, cx: &mut Context<Self>) {
        self.canvas.board.zoom_in();
        cx.notify();
    }

    pub fn zoom_out(&mut self, cx: &mut Context<Self>) {
        self.canvas.board.zoom_out();
        cx.notify();
    }

    pub fn reset_zoom(&mut self, cx: &mut Context<Self>) {
        self.canvas.board.reset_zoom();
        cx.notify();
    }

    pub fn select_image(&mut self, id: u64, cx: &mut Context<Self>) {
        self.canvas.board.select(id);
        cx.notify();
    }

    pub fn clear_selection(&mut self, cx: &mut Context<Self>) {
        self.canvas.board.clear_selection();
        cx.notify();
    }

    pub fn remove_image(&mut self, id: u64, cx: &mut Context<Self>) {
        if !self.canvas.board.remove_image(id) {
            return;
        }
        if self.canvas.input_state.dragged_image_id() == Some(id) {
            self.canvas.input_state.reset();
            self.canvas.active_guides = GuideSet::default();
        }
        info!(id, "removed image from board");
        self.ui.toast_manager
            .push(Toast::info("Image removed").with_source("canvas"));
        cx.notify();
    }

    /// Copy the cached file for an image into the user's download directory.
    pub fn download_image(&mut self, id: u64, cx: &mut Context<Self>) {
        let Some(image) = self.canvas.board.image(id) else {
            return;
        };
        let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) else {
            self.ui.toast_manager.push(
                Toast::error("No download directory available").with_source("canvas"),
            );
            cx.notify();
            return;
        };
        let target = dir.join(download_file_name(&image.prompt, id, &image.path));
        match std::fs::copy(&image.path, &target) {
            Ok(_) => {
                info!(path = %target.display(), "downloaded image");
                self.ui.toast_manager.push(
                    Toast::success(format!("Saved to {}", target.display()))
                        .with_source("canvas"),
                );
            }
            Err(err) => {
                warn!(error = %err, "image download failed");
                self.ui.toast_manager.push(
                    Toast::error(format!("Could not save image: {err}"))
                        .with_source("canvas"),
                );
            }
        }
        cx.notify();
    }
}

/// Derive a filesystem-friendly download name from the prompt, keeping the
/// image id so repeated downloads of different images never collide.
fn download_file_name(prompt: &str, id: u64, cached: &Path) -> String {
    let mut slug: String = prompt
        .chars()
        .take(40)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let slug = slug.trim_matches('-');
    let stem = if slug.is_empty() { "image" } else { slug };
    let ext = cached.extension().and_then(|e| e.to_str()).unwrap_or("png");
    format!("{stem}-{id}.{ext}")
}

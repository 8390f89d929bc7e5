//! Canvas transformations - scroll-wheel zoom.

use crate::app::Promptboard;
use crate::types::ViewMode;
use gpui::*;

impl Promptboard {
    pub fn handle_scroll(
        &mut self,
        event: &ScrollWheelEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        // Block canvas scroll when any modal is open
        if self.settings.show || self.account.show_key_modal {
            return;
        }

        // Free-form has no scrollable content; grid and single scroll
        // through their own containers.
        if self.canvas.board.view_mode != ViewMode::FreeForm {
            return;
        }

        // Zoom with Command (platform) or Control key
        if !(event.modifiers.platform || event.modifiers.control) {
            return;
        }

        let delta_y = match event.delta {
            ScrollDelta::Pixels(delta) => f32::from(delta.y),
            ScrollDelta::Lines(delta) => delta.y * 20.0,
        };

        if delta_y > 0.0 && self.canvas.board.can_zoom_in() {
            self.canvas.board.zoom_in();
            cx.notify();
        } else if delta_y < 0.0 && self.canvas.board.can_zoom_out() {
            self.canvas.board.zoom_out();
            cx.notify();
        }
    }
}

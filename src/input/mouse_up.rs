//! Mouse up event handling - drag finalization.
//!
//! Release semantics: a drag that ends snapped keeps its snapped position; a
//! modifier-free drag that ends unsnapped rounds to the layout grid. A click
//! that never moved leaves the image exactly where it was.

use crate::app::Promptboard;
use crate::input::coords::canvas_extent;
use crate::snap::{GuideSet, finalize_position};
use gpui::*;

impl Promptboard {
    pub fn handle_mouse_up(
        &mut self,
        event: &MouseUpEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(image_id) = self.canvas.input_state.dragged_image_id() else {
            return;
        };

        if self.canvas.input_state.drag_moved() {
            let zoom = self.canvas.board.zoom_factor();
            let extent = canvas_extent(window, zoom);
            let snapped = !self.canvas.active_guides.is_empty();
            let modifier_used =
                self.canvas.input_state.drag_used_modifier() || event.modifiers.alt;

            if let Some(image) = self.canvas.board.image(image_id) {
                let final_pos =
                    finalize_position(image.position, image.size, extent, snapped, modifier_used);
                self.canvas.board.move_image(image_id, final_pos);
            }
        }

        self.canvas.input_state.reset();
        self.canvas.active_guides = GuideSet::default();
        cx.notify();
    }
}

//! Mouse move handling - image dragging with edge snapping.
//!
//! ## Performance Notes
//!
//! Mouse move fires very frequently during a drag (60+ times per second).
//! Snap resolution is linear in the number of placed images, which stays
//! small, so every move re-resolves against fresh bounds.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::app::Promptboard;
use crate::input::coords::{CoordinateContext, CoordinateConverter, canvas_extent};
use crate::profile_scope;
use crate::snap::snap_position;
use gpui::*;

impl Promptboard {
    pub fn handle_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        profile_scope!("handle_mouse_move");

        let Some(image_id) = self.canvas.input_state.dragged_image_id() else {
            return;
        };
        let Some(offset) = self.canvas.input_state.drag_offset() else {
            return;
        };

        self.canvas.input_state.mark_moved();
        if event.modifiers.alt {
            self.canvas.input_state.mark_modifier_used();
        }

        let zoom = self.canvas.board.zoom_factor();
        let ctx = CoordinateContext::new(zoom);
        let canvas_pos = CoordinateConverter::screen_to_canvas(event.position, &ctx);
        let proposed = (canvas_pos.0 - offset.0, canvas_pos.1 - offset.1);

        let Some(size) = self.canvas.board.image(image_id).map(|i| i.size) else {
            return;
        };
        let others = self.canvas.board.bounds_except(image_id);
        let extent = canvas_extent(window, zoom);
        // Holding the modifier suppresses snapping for as long as it is held;
        // releasing it mid-drag re-engages.
        let snap_enabled = self.settings.data.snap_to_edges && !event.modifiers.alt;

        profile_scope!("snap_resolve");
        let outcome = snap_position(proposed, size, &others, extent, snap_enabled);
        self.canvas.board.move_image(image_id, outcome.position);
        self.canvas.active_guides = outcome.guides;
        cx.notify();
    }
}

//! Mouse down event handling - selection and drag initiation.

use crate::app::Promptboard;
use crate::input::coords::{CoordinateContext, CoordinateConverter, canvas_left, canvas_top};
use crate::profile_scope;
use crate::snap::GuideSet;
use crate::types::ViewMode;
use gpui::*;

impl Promptboard {
    pub fn handle_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        profile_scope!("handle_mouse_down");

        // Drag interactions only exist in free-form mode; grid and single
        // cards handle their own clicks.
        if self.canvas.board.view_mode != ViewMode::FreeForm {
            return;
        }

        let mouse_pos = event.position;
        if f32::from(mouse_pos.x) < canvas_left() || f32::from(mouse_pos.y) < canvas_top() {
            return;
        }

        let ctx = CoordinateContext::new(self.canvas.board.zoom_factor());
        let canvas_pos = CoordinateConverter::screen_to_canvas(mouse_pos, &ctx);

        profile_scope!("hit_test_images");
        let Some(image_id) = self.canvas.board.hit_test(canvas_pos) else {
            self.canvas.board.clear_selection();
            self.canvas.input_state.reset();
            self.canvas.active_guides = GuideSet::default();
            cx.notify();
            return;
        };

        let Some(origin) = self.canvas.board.image(image_id).map(|i| i.position) else {
            return;
        };
        let drag_offset = (canvas_pos.0 - origin.0, canvas_pos.1 - origin.1);

        self.canvas.board.select(image_id);
        self.canvas.board.bring_to_front(image_id);
        self.canvas.input_state.start_dragging(image_id, drag_offset);
        if event.modifiers.alt {
            self.canvas.input_state.mark_modifier_used();
        }
        self.canvas.active_guides = GuideSet::default();
        cx.notify();
    }
}

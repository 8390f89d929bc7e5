//! Rendering - the full element tree, rebuilt every frame.
//!
//! Layout: the header spans the top, the chat panel takes the left column,
//! and the canvas with its toolbar fills the rest. Overlays and toasts are
//! deferred above everything. The window-level mouse listeners feed the
//! free-form drag machinery; their coordinate math assumes the offsets
//! fixed by `CHAT_PANEL_WIDTH` and the two bar heights.

mod canvas;
mod chat_panel;
mod header;
mod overlays;
mod toasts;

use crate::app::Promptboard;
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{h_flex, v_flex, ActiveTheme as _};

impl Render for Promptboard {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.on_frame(window, cx);

        let bg = cx.theme().background;
        let fg = cx.theme().foreground;
        let show_settings = self.settings.show;
        let key_input = if self.account.show_key_modal {
            self.account.key_input.clone()
        } else {
            None
        };
        let has_key = self.account.credentials.has_api_key();

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(bg)
            .text_color(fg)
            .on_mouse_down(MouseButton::Left, cx.listener(Self::handle_mouse_down))
            .on_mouse_move(cx.listener(Self::handle_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::handle_mouse_up))
            .on_scroll_wheel(cx.listener(Self::handle_scroll))
            .child(header::render_header(cx))
            .child(
                h_flex()
                    .flex_1()
                    .min_h_0()
                    .w_full()
                    .child(chat_panel::render_chat_panel(&self.chat, cx))
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w_0()
                            .h_full()
                            .child(header::render_canvas_toolbar(&self.canvas.board, cx))
                            .child(div().flex_1().min_h_0().w_full().child(
                                canvas::render_canvas_area(
                                    &self.canvas.board,
                                    self.chat.generating,
                                    &self.canvas.active_guides,
                                    cx,
                                ),
                            )),
                    ),
            )
            .child(toasts::render_toasts(
                &self.ui.toast_manager,
                self.settings.data.reduce_motion,
                cx,
            ))
            .when(show_settings, |d| {
                d.child(overlays::render_settings_modal(
                    &self.settings.data,
                    &self.account,
                    self.settings.tab,
                    cx,
                ))
            })
            .when_some(key_input, |d, input| {
                d.child(overlays::render_key_modal(&input, has_key, cx))
            })
    }
}

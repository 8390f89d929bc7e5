//! API key modal component.
//!
//! Collects the personal key for the image API. The input entity is created
//! by the frame tick as soon as the modal is requested, so by the time this
//! renders it always exists. Sits above the settings modal because the
//! Connection tab can open it.

use crate::app::Promptboard;
use crate::constants::MODAL_WIDTH_SM;
use gpui::*;
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::input::{Input, InputState};
use gpui_component::{h_flex, v_flex, ActiveTheme as _, Icon, IconName};

use super::modal_base::{modal_surface_click_guard, render_modal_backdrop};

pub fn render_key_modal(
    key_input: &Entity<InputState>,
    has_key: bool,
    cx: &mut Context<Promptboard>,
) -> impl IntoElement {
    let bg = cx.theme().background;
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    let surface = modal_surface_click_guard(
        v_flex()
            .id("key-modal")
            .w(px(MODAL_WIDTH_SM))
            .bg(bg)
            .border_1()
            .border_color(border)
            .rounded(px(12.0))
            .overflow_hidden()
            .shadow_lg()
            // Header
            .child(
                h_flex()
                    .w_full()
                    .px(px(20.0))
                    .py(px(16.0))
                    .border_b_1()
                    .border_color(border)
                    .justify_between()
                    .child(
                        div()
                            .text_size(px(16.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(fg)
                            .child("API key"),
                    )
                    .child(
                        div()
                            .id("close-key-modal")
                            .cursor_pointer()
                            .p(px(4.0))
                            .rounded(px(4.0))
                            .hover(|s| s.bg(list_hover))
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.close_key_modal(cx);
                            }))
                            .child(
                                Icon::new(IconName::Close)
                                    .size(px(16.0))
                                    .text_color(muted_fg),
                            ),
                    ),
            )
            // Content
            .child(
                v_flex()
                    .w_full()
                    .px(px(20.0))
                    .py(px(16.0))
                    .gap(px(12.0))
                    .child(
                        div().text_sm().text_color(muted_fg).child(
                            "Generations are billed to your personal key. \
                             It is encrypted and stored on this machine only.",
                        ),
                    )
                    .child(
                        div()
                            .w_full()
                            .h(px(32.0))
                            .rounded(px(8.0))
                            .border_1()
                            .border_color(border)
                            .overflow_hidden()
                            .child(Input::new(key_input).appearance(false).size_full()),
                    )
                    .child(
                        h_flex()
                            .items_center()
                            .justify_between()
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(muted_fg)
                                    .child(if has_key {
                                        "Saving replaces the stored key."
                                    } else {
                                        "No key yet?"
                                    }),
                            )
                            .child(
                                div()
                                    .id("key-modal-registration")
                                    .px(px(8.0))
                                    .py(px(4.0))
                                    .rounded(px(6.0))
                                    .bg(list_hover)
                                    .cursor_pointer()
                                    .hover(|s| s.bg(list_active))
                                    .on_click(cx.listener(|this, _, _, cx| {
                                        this.open_registration_page(cx);
                                    }))
                                    .child(
                                        div()
                                            .text_xs()
                                            .font_weight(FontWeight::MEDIUM)
                                            .text_color(fg)
                                            .child("Create an account"),
                                    ),
                            ),
                    ),
            )
            // Footer with buttons
            .child(
                h_flex()
                    .w_full()
                    .px(px(20.0))
                    .py(px(16.0))
                    .border_t_1()
                    .border_color(border)
                    .justify_end()
                    .gap(px(12.0))
                    .child(
                        Button::new("cancel-key")
                            .label("Cancel")
                            .ghost()
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.close_key_modal(cx);
                            })),
                    )
                    .child(
                        Button::new("save-key")
                            .label("Save key")
                            .primary()
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.save_api_key(cx);
                            })),
                    ),
            ),
        cx,
        |this, _, _, _| {
            this.key_backdrop_reset();
        },
        |this, _, _, _| {
            this.key_backdrop_reset();
        },
    );

    render_modal_backdrop(
        "key-modal-backdrop",
        1600,
        cx,
        |this, _, _, cx| {
            this.key_backdrop_mouse_down();
            cx.notify();
        },
        |this, _, _, cx| {
            this.key_backdrop_mouse_up(cx);
        },
        surface,
    )
}

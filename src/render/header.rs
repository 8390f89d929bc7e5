//! Window chrome - the app header and the canvas toolbar.
//!
//! The header spans the whole window and carries the app title plus the
//! API key and settings buttons. The canvas toolbar sits above the canvas
//! only, with the view mode switch and the zoom controls.

use crate::app::Promptboard;
use crate::board::Board;
use crate::constants::{CANVAS_TOOLBAR_HEIGHT, HEADER_HEIGHT};
use crate::types::ViewMode;
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{h_flex, ActiveTheme as _, Icon, IconName};

pub fn render_header(cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let title_bar = cx.theme().title_bar;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    h_flex()
        .h(px(HEADER_HEIGHT))
        .w_full()
        .flex_shrink_0()
        .px(px(12.0))
        .items_center()
        .justify_between()
        .bg(title_bar)
        .border_b_1()
        .border_color(border)
        .child(
            div()
                .text_size(px(13.0))
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(fg)
                .child("Promptboard"),
        )
        .child(
            h_flex()
                .items_center()
                .gap(px(6.0))
                .child(
                    div()
                        .id("open-key-modal")
                        .h(px(26.0))
                        .px(px(10.0))
                        .rounded(px(6.0))
                        .flex()
                        .items_center()
                        .bg(list_hover)
                        .cursor_pointer()
                        .hover(|s| s.bg(list_active))
                        .on_click(cx.listener(|this, _, _, cx| {
                            this.open_key_modal(cx);
                        }))
                        .child(
                            div()
                                .text_size(px(11.0))
                                .font_weight(FontWeight::MEDIUM)
                                .text_color(fg)
                                .child("API key"),
                        ),
                )
                .child(
                    div()
                        .id("open-settings")
                        .w(px(26.0))
                        .h(px(26.0))
                        .rounded(px(6.0))
                        .flex()
                        .items_center()
                        .justify_center()
                        .cursor_pointer()
                        .hover(|s| s.bg(list_hover))
                        .on_click(cx.listener(|this, _, window, cx| {
                            this.toggle_settings(window, cx);
                        }))
                        .child(
                            Icon::new(IconName::Settings)
                                .size(px(14.0))
                                .text_color(muted_fg),
                        ),
                ),
        )
}

/// View mode switch on the left, zoom cluster on the right.
pub fn render_canvas_toolbar(board: &Board, cx: &Context<Promptboard>) -> Div {
    let border = cx.theme().border;

    h_flex()
        .h(px(CANVAS_TOOLBAR_HEIGHT))
        .w_full()
        .flex_shrink_0()
        .px(px(12.0))
        .items_center()
        .justify_between()
        .border_b_1()
        .border_color(border)
        .child(render_view_mode_switch(board.view_mode, cx))
        .child(render_zoom_cluster(board, cx))
}

fn render_view_mode_switch(current: ViewMode, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    h_flex().gap(px(4.0)).children(ViewMode::ALL.iter().map(|&mode| {
        let is_selected = mode == current;
        div()
            .id(ElementId::Name(format!("view-mode-{:?}", mode).into()))
            .px(px(10.0))
            .py(px(4.0))
            .rounded(px(6.0))
            .bg(if is_selected { primary } else { list_hover })
            .text_color(if is_selected { primary_fg } else { fg })
            .text_size(px(11.0))
            .font_weight(if is_selected {
                FontWeight::MEDIUM
            } else {
                FontWeight::NORMAL
            })
            .cursor_pointer()
            .hover(move |s| if is_selected { s } else { s.bg(list_active) })
            .on_click(cx.listener(move |this, _, _, cx| {
                this.set_view_mode(mode, cx);
            }))
            .child(mode.display_name())
    }))
}

/// Zoom out, the current percentage (click resets), zoom in. The step
/// buttons go inert at the zoom bounds.
fn render_zoom_cluster(board: &Board, cx: &Context<Promptboard>) -> Div {
    let muted_fg = cx.theme().muted_foreground;
    let list_hover = cx.theme().list_hover;
    let can_out = board.can_zoom_out();
    let can_in = board.can_zoom_in();

    h_flex()
        .items_center()
        .gap(px(2.0))
        .child(render_zoom_button("zoom-out", "-", can_out, cx, |this, cx| {
            this.zoom_out(cx);
        }))
        .child(
            div()
                .id("reset-zoom")
                .w(px(44.0))
                .py(px(3.0))
                .rounded(px(6.0))
                .flex()
                .justify_center()
                .cursor_pointer()
                .hover(|s| s.bg(list_hover))
                .on_click(cx.listener(|this, _, _, cx| {
                    this.reset_zoom(cx);
                }))
                .child(
                    div()
                        .text_size(px(11.0))
                        .text_color(muted_fg)
                        .child(format!("{}%", board.zoom())),
                ),
        )
        .child(render_zoom_button("zoom-in", "+", can_in, cx, |this, cx| {
            this.zoom_in(cx);
        }))
}

fn render_zoom_button(
    id: &'static str,
    label: &'static str,
    enabled: bool,
    cx: &Context<Promptboard>,
    action: impl Fn(&mut Promptboard, &mut Context<Promptboard>) + 'static,
) -> Stateful<Div> {
    let fg = cx.theme().foreground;
    let muted = cx.theme().muted;
    let list_hover = cx.theme().list_hover;

    div()
        .id(id)
        .w(px(24.0))
        .h(px(24.0))
        .rounded(px(6.0))
        .flex()
        .items_center()
        .justify_center()
        .when(enabled, |d| {
            d.cursor_pointer()
                .hover(|s| s.bg(list_hover))
                .on_click(cx.listener(move |this, _, _, cx| {
                    action(this, cx);
                }))
        })
        .child(
            div()
                .text_size(px(13.0))
                .font_weight(FontWeight::MEDIUM)
                .text_color(if enabled { fg } else { muted })
                .child(label),
        )
}

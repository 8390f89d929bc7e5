//! Building blocks shared by the modal overlays: the dimmed backdrop with
//! click-outside-to-close wiring, and the row layout the settings tabs use.

use crate::app::Promptboard;
use crate::constants::MODAL_BACKDROP_OPACITY;
use gpui::*;
use gpui_component::{h_flex, v_flex, ActiveTheme as _};

/// Dimmed full-window layer that hosts a modal and closes it on a click
/// outside. Deferred so it paints over the canvas; `priority` stacks modals
/// relative to each other (the key modal rides above settings).
///
/// Closing is two-phase: `on_down` fires when a press starts on the backdrop
/// and should arm a flag, `on_up` should close only while the flag is armed.
/// The modal surface disarms the flag via [`modal_surface_click_guard`], so a
/// drag that starts inside the modal and strays outside never closes it.
pub fn render_modal_backdrop(
    id: impl Into<ElementId>,
    priority: usize,
    cx: &mut Context<Promptboard>,
    on_down: impl Fn(&mut Promptboard, &MouseDownEvent, &mut Window, &mut Context<Promptboard>)
        + 'static,
    on_up: impl Fn(&mut Promptboard, &MouseUpEvent, &mut Window, &mut Context<Promptboard>)
        + 'static,
    modal: impl IntoElement,
) -> impl IntoElement {
    let backdrop = div()
        .id(id)
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .bg(hsla(0.0, 0.0, 0.0, MODAL_BACKDROP_OPACITY))
        .on_mouse_down(MouseButton::Left, cx.listener(on_down))
        .on_mouse_up(MouseButton::Left, cx.listener(on_up))
        // The canvas underneath must not scroll while a modal is up.
        .on_scroll_wheel(cx.listener(|_, _, _, _| {}));

    deferred(backdrop.child(modal)).with_priority(priority)
}

/// Attach the disarm side of the two-phase close to the modal surface, so
/// presses and releases inside it never count as backdrop clicks.
pub fn modal_surface_click_guard(
    surface: Stateful<Div>,
    cx: &mut Context<Promptboard>,
    on_down: impl Fn(&mut Promptboard, &MouseDownEvent, &mut Window, &mut Context<Promptboard>)
        + 'static,
    on_up: impl Fn(&mut Promptboard, &MouseUpEvent, &mut Window, &mut Context<Promptboard>)
        + 'static,
) -> Stateful<Div> {
    surface
        .on_mouse_down(MouseButton::Left, cx.listener(on_down))
        .on_mouse_up(MouseButton::Left, cx.listener(on_up))
}

/// Label-and-control row: title over description on the left, the control
/// pinned right.
pub fn render_setting_row(
    title: &str,
    description: &str,
    control: impl IntoElement,
    cx: &Context<Promptboard>,
) -> Div {
    let label = v_flex()
        .flex_1()
        .min_w_0()
        .gap(px(2.0))
        .child(
            div()
                .text_sm()
                .text_color(cx.theme().foreground)
                .child(title.to_string()),
        )
        .child(
            div()
                .text_xs()
                .text_color(cx.theme().muted_foreground)
                .child(description.to_string()),
        );

    h_flex()
        .w_full()
        .py_3()
        .gap_4()
        .items_center()
        .justify_between()
        .child(label)
        .child(div().flex_shrink_0().child(control))
}

/// Uppercased section divider.
pub fn render_section_header(title: &str, cx: &Context<Promptboard>) -> Div {
    div()
        .w_full()
        .mb_2()
        .pb_2()
        .border_b_1()
        .border_color(cx.theme().border)
        .child(
            div()
                .text_xs()
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(cx.theme().muted_foreground)
                .child(title.to_uppercase()),
        )
}

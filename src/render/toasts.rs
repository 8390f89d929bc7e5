//! Toast rendering - the transient notification stack.

use crate::app::Promptboard;
use crate::notifications::{Toast, ToastManager, ToastVariant};
use gpui::*;
use gpui_component::{h_flex, ActiveTheme as _, Icon, IconName};

/// Bottom-right stack of active toasts, painted over everything else.
/// Clicking a toast dismisses it early.
pub fn render_toasts(
    manager: &ToastManager,
    reduce_motion: bool,
    cx: &Context<Promptboard>,
) -> impl IntoElement {
    deferred(
        div()
            .absolute()
            .bottom(px(16.0))
            .right(px(16.0))
            .flex()
            .flex_col()
            .gap(px(8.0))
            .children(
                manager
                    .toasts()
                    .iter()
                    .map(|toast| render_toast(toast, reduce_motion, cx)),
            ),
    )
    .with_priority(1700)
}

fn render_toast(toast: &Toast, reduce_motion: bool, cx: &Context<Promptboard>) -> Stateful<Div> {
    let bg = cx.theme().background;
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let accent = match toast.variant {
        ToastVariant::Error => cx.theme().danger,
        ToastVariant::Success => cx.theme().primary,
        ToastVariant::Info => cx.theme().muted_foreground,
    };
    let id = toast.id;

    h_flex()
        .id(ElementId::Name(format!("toast-{}", id).into()))
        .items_center()
        .gap(px(8.0))
        .px(px(12.0))
        .py(px(8.0))
        .rounded(px(8.0))
        .bg(bg)
        .border_1()
        .border_color(border)
        .shadow_md()
        .opacity(toast.opacity(reduce_motion))
        .cursor_pointer()
        .on_click(cx.listener(move |this, _, _, cx| {
            this.ui.toast_manager.remove(id);
            cx.notify();
        }))
        .child(
            div()
                .text_size(px(12.0))
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(accent)
                .child(toast.variant.icon()),
        )
        .child(
            div()
                .max_w(px(280.0))
                .text_size(px(12.0))
                .text_color(fg)
                .child(toast.message.clone()),
        )
        .child(
            Icon::new(IconName::Close)
                .size(px(12.0))
                .text_color(muted_fg),
        )
}

//! Chat panel rendering - templates, message history, and the prompt bar.
//!
//! The panel is the left column of the window. With an empty conversation it
//! offers prompt templates; once messages exist it becomes a scrollable
//! history. The prompt bar at the bottom carries the reference-image chip,
//! the model and size selectors, and the input row.

use crate::api::models::{model_display_name, ImageSize, MODEL_OPTIONS};
use crate::app::{ChatState, Promptboard};
use crate::constants::CHAT_PANEL_WIDTH;
use crate::types::{ChatMessage, MessageRole, Template};
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::input::Input;
use gpui_component::{h_flex, v_flex, ActiveTheme as _, Icon, IconName};
use std::path::PathBuf;

pub fn render_chat_panel(chat: &ChatState, cx: &Context<Promptboard>) -> Div {
    let border = cx.theme().border;

    v_flex()
        .w(px(CHAT_PANEL_WIDTH))
        .h_full()
        .flex_shrink_0()
        .border_r_1()
        .border_color(border)
        .child(if chat.messages.is_empty() {
            render_template_section(chat, cx)
        } else {
            render_messages(chat, cx)
        })
        .child(render_input_section(chat, cx))
}

// ============================================================================
// Templates
// ============================================================================

/// Template picker shown while the conversation is empty.
fn render_template_section(chat: &ChatState, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let list_hover = cx.theme().list_hover;
    let active = chat.active_template.clone();

    div().flex_1().min_h_0().child(
        v_flex()
            .id("template-section")
            .size_full()
            .overflow_y_scroll()
            .p(px(16.0))
            .gap(px(16.0))
            .child(
                v_flex()
                    .pt(px(24.0))
                    .gap(px(6.0))
                    .child(
                        div()
                            .text_size(px(18.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(fg)
                            .child("What are we designing today?"),
                    )
                    .child(
                        div()
                            .text_size(px(13.0))
                            .text_color(muted_fg)
                            .child("Pick a template or write your own brief below."),
                    ),
            )
            .child(
                h_flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_xs()
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(muted_fg)
                            .child("TEMPLATES"),
                    )
                    .child(
                        div()
                            .id("shuffle-templates")
                            .px(px(8.0))
                            .py(px(4.0))
                            .rounded(px(6.0))
                            .cursor_pointer()
                            .hover(|s| s.bg(list_hover))
                            .text_size(px(11.0))
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(muted_fg)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.shuffle_templates(cx);
                            }))
                            .child("Shuffle"),
                    ),
            )
            .children(chat.templates.iter().map(|template| {
                render_template_card(template, active.as_deref() == Some(template.id), cx)
            })),
    )
}

/// One template card. Clicking toggles it and prefills the prompt input.
fn render_template_card(
    template: &Template,
    is_active: bool,
    cx: &Context<Promptboard>,
) -> Stateful<Div> {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let primary = cx.theme().primary;
    let border = cx.theme().border;
    let list_active = cx.theme().list_active;
    let list_hover = cx.theme().list_hover;
    let id = template.id;

    v_flex()
        .id(ElementId::Name(format!("template-card-{}", id).into()))
        .w_full()
        .p(px(12.0))
        .gap(px(2.0))
        .rounded(px(8.0))
        .border_1()
        .border_color(if is_active { primary } else { border })
        .bg(if is_active {
            list_active
        } else {
            gpui::transparent_black()
        })
        .cursor_pointer()
        .hover(move |s| if is_active { s } else { s.bg(list_hover) })
        .on_click(cx.listener(move |this, _, window, cx| {
            this.select_template(id, window, cx);
        }))
        .child(
            div()
                .text_size(px(13.0))
                .font_weight(FontWeight::MEDIUM)
                .text_color(fg)
                .child(template.title),
        )
        .child(
            div()
                .text_size(px(11.0))
                .text_color(muted_fg)
                .child(template.subtitle),
        )
}

// ============================================================================
// Messages
// ============================================================================

/// Scrollable conversation history, newest at the bottom.
fn render_messages(chat: &ChatState, cx: &Context<Promptboard>) -> Div {
    div().flex_1().min_h_0().child(
        v_flex()
            .id("chat-messages")
            .size_full()
            .overflow_y_scroll()
            .track_scroll(&chat.scroll)
            .p(px(16.0))
            .gap(px(16.0))
            .children(
                chat.messages
                    .iter()
                    .map(|message| render_message(message, cx)),
            )
            .when(chat.generating, |d| {
                d.child(render_generating_block(&chat.model, cx))
            }),
    )
}

fn render_message(message: &ChatMessage, cx: &Context<Promptboard>) -> Div {
    match message.role {
        MessageRole::User => render_user_message(message, cx),
        MessageRole::Assistant => render_assistant_message(message, cx),
    }
}

/// Right-aligned bubble in the accent color.
fn render_user_message(message: &ChatMessage, cx: &Context<Promptboard>) -> Div {
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let muted_fg = cx.theme().muted_foreground;

    h_flex().w_full().justify_end().child(
        v_flex()
            .items_end()
            .gap(px(4.0))
            .max_w(px(280.0))
            .child(
                div()
                    .px(px(12.0))
                    .py(px(8.0))
                    .rounded(px(10.0))
                    .bg(primary)
                    .flex()
                    .flex_col()
                    .children(message.content.lines().map(|line| {
                        div()
                            .text_size(px(13.0))
                            .text_color(primary_fg)
                            .child(if line.is_empty() {
                                " ".to_string()
                            } else {
                                line.to_string()
                            })
                    })),
            )
            .when(!message.images.is_empty(), |d| {
                d.child(render_message_thumbnails(&message.images))
            })
            .child(
                div()
                    .text_size(px(10.0))
                    .text_color(muted_fg)
                    .child(message.formatted_time()),
            ),
    )
}

/// Left-aligned block with the assistant name, text, and result thumbnails.
fn render_assistant_message(message: &ChatMessage, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let list_hover = cx.theme().list_hover;

    v_flex()
        .w_full()
        .items_start()
        .gap(px(4.0))
        .child(
            h_flex()
                .items_center()
                .gap(px(6.0))
                .child(
                    div()
                        .text_size(px(11.0))
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(fg)
                        .child("Assistant"),
                )
                .child(
                    div()
                        .text_size(px(10.0))
                        .text_color(muted_fg)
                        .child(message.formatted_time()),
                ),
        )
        .when(!message.content.is_empty(), |d| {
            d.child(
                div()
                    .px(px(12.0))
                    .py(px(8.0))
                    .rounded(px(10.0))
                    .bg(list_hover)
                    .max_w(px(300.0))
                    .flex()
                    .flex_col()
                    .children(message.content.lines().map(|line| {
                        div()
                            .text_size(px(13.0))
                            .text_color(fg)
                            .child(if line.is_empty() {
                                " ".to_string()
                            } else {
                                line.to_string()
                            })
                    })),
            )
        })
        .when(!message.images.is_empty(), |d| {
            d.child(render_message_thumbnails(&message.images))
        })
}

fn render_message_thumbnails(images: &[PathBuf]) -> Div {
    h_flex().flex_wrap().gap(px(6.0)).children(images.iter().map(|path| {
        div()
            .w(px(72.0))
            .h(px(72.0))
            .rounded(px(6.0))
            .overflow_hidden()
            .child(img(path.clone()).size_full().object_fit(ObjectFit::Contain))
    }))
}

/// Assistant-side placeholder while a generation is in flight.
fn render_generating_block(model: &str, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let muted = cx.theme().muted;

    v_flex()
        .w_full()
        .items_start()
        .gap(px(4.0))
        .child(
            h_flex()
                .items_center()
                .gap(px(6.0))
                .child(
                    div()
                        .text_size(px(11.0))
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(fg)
                        .child("Assistant"),
                )
                .child(
                    div()
                        .text_size(px(10.0))
                        .text_color(muted_fg)
                        .child(format!("Generating with {}...", model_display_name(model))),
                ),
        )
        .child(
            div()
                .w(px(140.0))
                .h(px(90.0))
                .rounded(px(8.0))
                .border_1()
                .border_color(border)
                .bg(muted.opacity(0.4))
                .flex()
                .items_center()
                .justify_center()
                .child(
                    div()
                        .text_size(px(11.0))
                        .text_color(muted_fg)
                        .child("Rendering..."),
                ),
        )
}

// ============================================================================
// Prompt bar
// ============================================================================

/// Bottom section: reference chip, model and size selectors, input row.
fn render_input_section(chat: &ChatState, cx: &Context<Promptboard>) -> Div {
    let border = cx.theme().border;

    v_flex()
        .flex_shrink_0()
        .w_full()
        .p(px(12.0))
        .gap(px(8.0))
        .border_t_1()
        .border_color(border)
        .when_some(chat.reference_image.clone(), |d, path| {
            d.child(render_reference_chip(path, cx))
        })
        .child(render_option_row(
            "Model",
            render_model_pills(&chat.model, cx),
            cx,
        ))
        .child(render_option_row(
            "Size",
            render_size_pills(chat.size, cx),
            cx,
        ))
        .child(render_prompt_row(chat, cx))
}

/// Attached image-to-image reference, with a button to drop it.
fn render_reference_chip(path: PathBuf, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let muted = cx.theme().muted;
    let list_hover = cx.theme().list_hover;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("reference")
        .to_string();

    h_flex()
        .items_center()
        .gap(px(8.0))
        .p(px(6.0))
        .rounded(px(6.0))
        .border_1()
        .border_color(border)
        .bg(muted.opacity(0.3))
        .child(
            div()
                .w(px(28.0))
                .h(px(28.0))
                .rounded(px(4.0))
                .overflow_hidden()
                .flex_shrink_0()
                .child(img(path.clone()).size_full().object_fit(ObjectFit::Contain)),
        )
        .child(
            div()
                .flex_1()
                .min_w_0()
                .overflow_hidden()
                .whitespace_nowrap()
                .text_ellipsis()
                .text_size(px(11.0))
                .text_color(fg)
                .child(name),
        )
        .child(
            div()
                .id("clear-reference")
                .flex_shrink_0()
                .p(px(2.0))
                .rounded(px(4.0))
                .cursor_pointer()
                .hover(|s| s.bg(list_hover))
                .on_click(cx.listener(|this, _, _, cx| {
                    this.clear_reference(cx);
                }))
                .child(Icon::new(IconName::Close).size(px(12.0)).text_color(muted_fg)),
        )
}

fn render_option_row(label: &'static str, pills: Div, cx: &Context<Promptboard>) -> Div {
    let muted_fg = cx.theme().muted_foreground;

    h_flex()
        .items_center()
        .gap(px(8.0))
        .child(
            div()
                .w(px(34.0))
                .flex_shrink_0()
                .text_size(px(10.0))
                .text_color(muted_fg)
                .child(label),
        )
        .child(pills)
}

fn render_model_pills(selected: &str, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    h_flex().gap(px(6.0)).children(MODEL_OPTIONS.iter().map(|option| {
        let is_selected = option.id == selected;
        let id = option.id;
        div()
            .id(ElementId::Name(format!("model-{}", id).into()))
            .px(px(10.0))
            .py(px(5.0))
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
                this.set_model(id, cx);
            }))
            .child(option.name)
    }))
}

fn render_size_pills(selected: ImageSize, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    h_flex().gap(px(6.0)).children(ImageSize::ALL.iter().map(|&size| {
        let is_selected = size == selected;
        div()
            .id(ElementId::Name(format!("size-{:?}", size).into()))
            .px(px(10.0))
            .py(px(5.0))
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
                this.set_size(size, cx);
            }))
            .child(size.display_name())
    }))
}

/// The input itself plus the attach and send buttons. Enter in the input
/// also sends.
fn render_prompt_row(chat: &ChatState, cx: &Context<Promptboard>) -> Div {
    let border = cx.theme().border;
    let muted = cx.theme().muted;
    let muted_fg = cx.theme().muted_foreground;
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;
    let generating = chat.generating;

    h_flex()
        .w_full()
        .items_center()
        .gap(px(8.0))
        .child(
            div()
                .flex_1()
                .min_w_0()
                .h(px(34.0))
                .rounded(px(8.0))
                .border_1()
                .border_color(border)
                .overflow_hidden()
                .child(Input::new(&chat.prompt_input).appearance(false).size_full()),
        )
        .child(
            div()
                .id("attach-reference")
                .w(px(28.0))
                .h(px(28.0))
                .rounded(px(6.0))
                .flex_shrink_0()
                .bg(list_hover)
                .cursor_pointer()
                .hover(|s| s.bg(list_active))
                .flex()
                .items_center()
                .justify_center()
                .on_click(cx.listener(|this, _, _, cx| {
                    this.pick_reference_image(cx);
                }))
                .child(
                    div()
                        .text_size(px(16.0))
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(muted_fg)
                        .child("+"),
                ),
        )
        .child(
            div()
                .id("send-prompt")
                .h(px(28.0))
                .px(px(12.0))
                .rounded(px(6.0))
                .flex_shrink_0()
                .flex()
                .items_center()
                .bg(if generating { muted } else { primary })
                .when(!generating, |d| {
                    d.cursor_pointer()
                        .hover(|s| s.opacity(0.85))
                        .on_click(cx.listener(|this, _, _, cx| {
                            this.submit_prompt(cx);
                        }))
                })
                .child(
                    div()
                        .text_size(px(12.0))
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(if generating { muted_fg } else { primary_fg })
                        .child("Send"),
                ),
        )
}

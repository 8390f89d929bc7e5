//! Settings modal component.

use crate::api::models::{ImageSize, MODEL_OPTIONS};
use crate::app::{AccountState, Promptboard, SettingsTab};
use crate::constants::{MODAL_HEIGHT_MD, MODAL_WIDTH_LG};
use crate::settings::{Settings, ThemeMode};
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{h_flex, v_flex, ActiveTheme as _, Icon, IconName};

use super::modal_base::{
    modal_surface_click_guard, render_modal_backdrop, render_section_header, render_setting_row,
};

/// Colors the sidebar tab buttons draw with.
#[derive(Clone, Copy)]
struct TabPalette {
    fg: Hsla,
    muted: Hsla,
    active: Hsla,
    hover: Hsla,
}

/// One sidebar entry; highlighted while its tab is the visible one.
fn render_sidebar_tab(
    id: impl Into<ElementId>,
    tab: SettingsTab,
    active_tab: SettingsTab,
    icon: IconName,
    palette: TabPalette,
    cx: &mut Context<Promptboard>,
) -> Stateful<Div> {
    let is_active = active_tab == tab;
    let text_color = if is_active { palette.fg } else { palette.muted };
    let select = cx.listener(move |this, _: &MouseDownEvent, _, cx| {
        this.set_settings_tab(tab, cx);
    });

    div()
        .id(id)
        .w_full()
        .rounded(px(4.0))
        .px_2()
        .py_1p5()
        .cursor(CursorStyle::PointingHand)
        .when(is_active, |d| d.bg(palette.active))
        .when(!is_active, |d| d.hover(|s| s.bg(palette.hover)))
        .on_mouse_down(MouseButton::Left, select)
        .child(
            h_flex()
                .items_center()
                .gap_2()
                .child(Icon::new(icon).size(px(14.0)).text_color(text_color))
                .child(
                    div()
                        .text_sm()
                        .text_color(text_color)
                        .child(tab.display_name()),
                ),
        )
}

/// Settings modal: sidebar tabs on the left, the active tab's rows on the right.
pub fn render_settings_modal(
    settings: &Settings,
    account: &AccountState,
    active_tab: SettingsTab,
    cx: &mut Context<Promptboard>,
) -> impl IntoElement {
    let palette = TabPalette {
        fg: cx.theme().foreground,
        muted: cx.theme().muted_foreground,
        active: cx.theme().list_active,
        hover: cx.theme().list_hover,
    };
    let bg = cx.theme().background;
    let border = cx.theme().border;
    let sidebar_bg = cx.theme().title_bar;

    let sidebar = render_settings_sidebar(active_tab, sidebar_bg, border, palette, cx);
    let content = render_settings_content(settings, account, active_tab, cx);

    let surface = modal_surface_click_guard(
        h_flex()
            .id("settings-modal")
            .w(px(MODAL_WIDTH_LG))
            .h(px(MODAL_HEIGHT_MD))
            .bg(bg)
            .border_1()
            .border_color(border)
            .rounded(px(10.0))
            .overflow_hidden()
            .shadow_lg()
            .on_scroll_wheel(|_, _, _| {})
            .child(sidebar)
            .child(content),
        cx,
        |this, _, _, _| {
            this.settings_backdrop_reset();
        },
        |this, _, _, _| {
            this.settings_backdrop_reset();
        },
    );

    render_modal_backdrop(
        "settings-backdrop",
        1500,
        cx,
        |this, _, _, cx| {
            this.settings_backdrop_mouse_down();
            cx.notify();
        },
        |this, _, window, cx| {
            this.settings_backdrop_mouse_up(window, cx);
        },
        surface,
    )
}

fn render_settings_sidebar(
    active_tab: SettingsTab,
    sidebar_bg: Hsla,
    border: Hsla,
    palette: TabPalette,
    cx: &mut Context<Promptboard>,
) -> Div {
    v_flex()
        .w(px(180.0))
        .h_full()
        .p_2()
        .gap_1()
        .bg(sidebar_bg)
        .border_r_1()
        .border_color(border)
        .rounded_l(px(10.0))
        .child(render_sidebar_tab(
            "tab-general",
            SettingsTab::General,
            active_tab,
            IconName::Palette,
            palette,
            cx,
        ))
        .child(render_sidebar_tab(
            "tab-connection",
            SettingsTab::Connection,
            active_tab,
            IconName::Settings,
            palette,
            cx,
        ))
}

fn render_settings_content(
    settings: &Settings,
    account: &AccountState,
    active_tab: SettingsTab,
    cx: &mut Context<Promptboard>,
) -> impl IntoElement {
    v_flex()
        .id("settings-content")
        .flex_1()
        .h_full()
        .overflow_y_scroll()
        .px_6()
        .py_6()
        .when(active_tab == SettingsTab::General, |d| {
            d.child(render_general_tab(settings, cx))
        })
        .when(active_tab == SettingsTab::Connection, |d| {
            d.child(render_connection_tab(settings, account, cx))
        })
}

fn render_general_tab(settings: &Settings, cx: &mut Context<Promptboard>) -> Div {
    v_flex()
        .gap_4()
        .child(render_section_header("Appearance", cx))
        .child(render_setting_row(
            "Theme",
            "Light, dark, or follow the system",
            render_theme_pills(settings.theme, cx),
            cx,
        ))
        .child(render_setting_row(
            "Reduce motion",
            "Skip fades; toasts stay opaque until dismissed",
            render_checkbox("reduce-motion-checkbox", settings.reduce_motion, cx, |this, cx| {
                this.toggle_reduce_motion(cx);
            }),
            cx,
        ))
        .child(render_section_header("Canvas", cx))
        .child(render_setting_row(
            "Snap to edges",
            "Align dragged images to neighbors and the canvas",
            render_checkbox("snap-checkbox", settings.snap_to_edges, cx, |this, cx| {
                this.toggle_snap_to_edges(cx);
            }),
            cx,
        ))
        .child(render_section_header("Generation", cx))
        .child(render_setting_row(
            "Default model",
            "Preselected when the app starts",
            render_default_model_pills(&settings.default_model, cx),
            cx,
        ))
        .child(render_setting_row(
            "Default size",
            "Output size preselected when the app starts",
            render_default_size_pills(settings.default_size, cx),
            cx,
        ))
}

fn render_connection_tab(
    settings: &Settings,
    account: &AccountState,
    cx: &mut Context<Promptboard>,
) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;
    let danger = cx.theme().danger;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;
    let has_key = account.credentials.has_api_key();

    let key_controls = h_flex()
        .gap(px(6.0))
        .child(
            div()
                .id("settings-change-key")
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
                        .text_xs()
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(fg)
                        .child(if has_key { "Change" } else { "Set key" }),
                ),
        )
        .when(has_key, |d| {
            d.child(
                div()
                    .id("settings-clear-key")
                    .h(px(26.0))
                    .px(px(10.0))
                    .rounded(px(6.0))
                    .flex()
                    .items_center()
                    .cursor_pointer()
                    .hover(|s| s.bg(list_hover))
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.clear_api_key(cx);
                    }))
                    .child(
                        div()
                            .text_xs()
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(danger)
                            .child("Remove"),
                    ),
            )
        });

    let catalog_label = if account.catalog.is_empty() {
        "None fetched yet".to_string()
    } else {
        format!("{} available", account.catalog.len())
    };

    let mut tab = v_flex()
        .gap_4()
        .child(render_section_header("Endpoints", cx))
        .child(render_setting_row(
            "Image API",
            "Hosted generation endpoint",
            div()
                .text_xs()
                .text_color(muted_fg)
                .child(settings.image_api_url.clone()),
            cx,
        ))
        .child(render_setting_row(
            "Backend",
            "Companion account service",
            div()
                .text_xs()
                .text_color(muted_fg)
                .child(settings.backend_url.clone()),
            cx,
        ))
        .child(
            div()
                .text_xs()
                .text_color(muted_fg)
                .child("Endpoints come from settings.json; edits apply without a restart."),
        )
        .child(render_section_header("API key", cx))
        .child(render_setting_row(
            "API key",
            if has_key {
                "Stored encrypted on this machine"
            } else {
                "Required before anything can be generated"
            },
            key_controls,
            cx,
        ))
        .child(render_setting_row(
            "Registration",
            "Create an account to get an API key",
            div()
                .id("settings-registration")
                .h(px(26.0))
                .px(px(10.0))
                .rounded(px(6.0))
                .flex()
                .items_center()
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
                        .child("Open page"),
                ),
            cx,
        ))
        .child(render_setting_row(
            "Available models",
            "Fetched from the image API on startup",
            div().text_xs().text_color(muted_fg).child(catalog_label),
            cx,
        ));

    if let Some(user) = &account.user {
        tab = tab.child(render_section_header("Account", cx)).child(
            render_setting_row(
                "Signed in",
                &user.email,
                div()
                    .id("settings-sign-out")
                    .h(px(26.0))
                    .px(px(10.0))
                    .rounded(px(6.0))
                    .flex()
                    .items_center()
                    .cursor_pointer()
                    .hover(|s| s.bg(list_hover))
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.sign_out(cx);
                    }))
                    .child(
                        div()
                            .text_xs()
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(danger)
                            .child("Sign out"),
                    ),
                cx,
            ),
        );
    }

    tab
}

// ============================================================================
// Controls
// ============================================================================

fn render_checkbox(
    id: &'static str,
    checked: bool,
    cx: &mut Context<Promptboard>,
    on_toggle: impl Fn(&mut Promptboard, &mut Context<Promptboard>) + 'static,
) -> Stateful<Div> {
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let border = cx.theme().border;

    div()
        .id(id)
        .w(px(16.0))
        .h(px(16.0))
        .rounded(px(4.0))
        .border_1()
        .border_color(if checked { primary } else { border })
        .bg(if checked {
            primary
        } else {
            gpui::transparent_black()
        })
        .flex()
        .items_center()
        .justify_center()
        .cursor_pointer()
        .on_click(cx.listener(move |this, _, _, cx| {
            on_toggle(this, cx);
        }))
        .when(checked, |d| {
            d.child(
                Icon::new(IconName::Check)
                    .size(px(12.0))
                    .text_color(primary_fg),
            )
        })
}

fn render_pill(
    id: ElementId,
    label: &'static str,
    is_selected: bool,
    cx: &mut Context<Promptboard>,
    on_click: impl Fn(&mut Promptboard, &mut Context<Promptboard>) + 'static,
) -> Stateful<Div> {
    let fg = cx.theme().foreground;
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;
    let list_hover = cx.theme().list_hover;
    let list_active = cx.theme().list_active;

    div()
        .id(id)
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
            on_click(this, cx);
        }))
        .child(label)
}

fn render_theme_pills(current: ThemeMode, cx: &mut Context<Promptboard>) -> Div {
    let mut row = h_flex().gap(px(6.0));
    for mode in ThemeMode::ALL {
        row = row.child(render_pill(
            ElementId::Name(format!("theme-{:?}", mode).into()),
            mode.display_name(),
            mode == current,
            cx,
            move |this, cx| {
                this.set_theme_mode(mode, cx);
            },
        ));
    }
    row
}

fn render_default_model_pills(current: &str, cx: &mut Context<Promptboard>) -> Div {
    let mut row = h_flex().gap(px(6.0));
    for option in MODEL_OPTIONS {
        let id = option.id;
        row = row.child(render_pill(
            ElementId::Name(format!("default-model-{}", id).into()),
            option.name,
            id == current,
            cx,
            move |this, cx| {
                this.set_default_model(id.to_string(), cx);
            },
        ));
    }
    row
}

fn render_default_size_pills(current: ImageSize, cx: &mut Context<Promptboard>) -> Div {
    let mut row = h_flex().gap(px(6.0));
    for size in ImageSize::ALL {
        row = row.child(render_pill(
            ElementId::Name(format!("default-size-{:?}", size).into()),
            size.display_name(),
            size == current,
            cx,
            move |this, cx| {
                this.set_default_size(size, cx);
            },
        ));
    }
    row
}

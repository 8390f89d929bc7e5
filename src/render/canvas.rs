//! Canvas rendering - the three layout modes and their image cards.
//!
//! The canvas sits right of the chat panel, below the header and the canvas
//! toolbar. Single and grid modes are scrollable flows; free-form places
//! images at absolute positions and paints alignment guides for the drag
//! in progress.
//!
//! ## Performance Notes
//!
//! Rendering happens every frame. Guide lines are painted straight to the
//! GPU; image cards lean on the img() element cache keyed by path.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::app::Promptboard;
use crate::board::Board;
use crate::constants::GUIDE_LABEL_OFFSET;
use crate::profile_scope;
use crate::snap::{Guide, GuideSet};
use crate::types::{CanvasImage, ViewMode};
use gpui::prelude::FluentBuilder;
use gpui::{PathBuilder, *};
use gpui_component::{h_flex, v_flex, ActiveTheme as _};

/// Render the canvas area for the current view mode.
///
/// This is the main entry point for canvas rendering. The empty state wins
/// over everything else; otherwise the view mode picks the layout.
pub fn render_canvas_area(
    board: &Board,
    generating: bool,
    guides: &GuideSet,
    cx: &Context<Promptboard>,
) -> Div {
    profile_scope!("render_canvas_area");

    let bg = cx.theme().background;

    let content = if board.is_empty() && !generating {
        render_empty_state(cx)
    } else {
        match board.view_mode {
            ViewMode::Single => render_single_column(board, generating, cx),
            ViewMode::Grid => render_grid(board, generating, cx),
            ViewMode::FreeForm => render_freeform(board, generating, guides, cx),
        }
    };

    div()
        .size_full()
        .relative()
        .overflow_hidden()
        .bg(bg)
        .child(content)
}

/// Placeholder shown before the first generation lands.
fn render_empty_state(cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_fg = cx.theme().muted_foreground;

    v_flex()
        .size_full()
        .items_center()
        .justify_center()
        .gap(px(8.0))
        .child(div().text_size(px(40.0)).child("🎨"))
        .child(
            div()
                .text_size(px(16.0))
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(fg)
                .child("Start creating your design"),
        )
        .child(
            div()
                .text_size(px(13.0))
                .text_color(muted_fg)
                .child("Enter your design brief in the side panel"),
        )
}

/// Display height for a card rendered at `width`, following the image's
/// stored aspect ratio.
fn card_height(image: &CanvasImage, width: f32) -> f32 {
    if image.size.0 <= 0.0 {
        return width;
    }
    width * (image.size.1 / image.size.0)
}

// ============================================================================
// Single column
// ============================================================================

/// One centered column of every image, newest last.
fn render_single_column(board: &Board, generating: bool, cx: &Context<Promptboard>) -> Div {
    let width = board.single_display_size();
    let selected = board.selected();

    div().size_full().child(
        v_flex()
            .id("single-column")
            .size_full()
            .overflow_y_scroll()
            .items_center()
            .py(px(24.0))
            .gap(px(16.0))
            .children(
                board
                    .images()
                    .iter()
                    .map(|image| render_image_card(image, width, selected == Some(image.id), cx)),
            )
            .when(generating, |d| d.child(render_generating_card(width, cx))),
    )
}

// ============================================================================
// Grid
// ============================================================================

/// Wrapping rows of fixed-width cells.
fn render_grid(board: &Board, generating: bool, cx: &Context<Promptboard>) -> Div {
    let cell = board.grid_cell_size();
    let selected = board.selected();

    div().size_full().child(
        div()
            .id("grid-view")
            .size_full()
            .overflow_y_scroll()
            .p(px(24.0))
            .child(
                h_flex()
                    .flex_wrap()
                    .items_start()
                    .gap(px(12.0))
                    .children(
                        board.images().iter().map(|image| {
                            render_image_card(image, cell, selected == Some(image.id), cx)
                        }),
                    )
                    .when(generating, |d| d.child(render_generating_card(cell, cx))),
            ),
    )
}

/// An image card in single or grid mode. Click selects; the selected card
/// grows a border and its action buttons.
fn render_image_card(
    image: &CanvasImage,
    width: f32,
    is_selected: bool,
    cx: &Context<Promptboard>,
) -> Stateful<Div> {
    let id = image.id;
    let height = card_height(image, width);
    let muted = cx.theme().muted;
    let primary = cx.theme().primary;

    div()
        .id(ElementId::Name(format!("image-card-{}", id).into()))
        .relative()
        .flex_shrink_0()
        .w(px(width))
        .h(px(height))
        .rounded(px(6.0))
        .bg(muted.opacity(0.3))
        .cursor_pointer()
        .on_click(cx.listener(move |this, _, _, cx| {
            this.select_image(id, cx);
        }))
        .child(
            div()
                .size_full()
                .overflow_hidden()
                .rounded(px(6.0))
                .child(img(image.path.clone()).size_full().object_fit(ObjectFit::Contain)),
        )
        .when(is_selected, |d| {
            d.border_2()
                .border_color(primary)
                .child(render_card_actions(id, 1.0, cx))
        })
}

/// Save / Remove buttons shown over the selected card's top-right corner.
fn render_card_actions(id: u64, zoom: f32, cx: &Context<Promptboard>) -> Div {
    div()
        .absolute()
        .top(px(6.0 * zoom))
        .right(px(6.0 * zoom))
        .child(render_image_actions(id, zoom, cx))
}

/// Placeholder card appended to the flow while a generation is in flight.
fn render_generating_card(width: f32, cx: &Context<Promptboard>) -> Div {
    let border = cx.theme().border;
    let muted = cx.theme().muted;
    let muted_fg = cx.theme().muted_foreground;

    v_flex()
        .flex_shrink_0()
        .w(px(width))
        .h(px(width))
        .rounded(px(6.0))
        .border_1()
        .border_color(border)
        .bg(muted.opacity(0.3))
        .items_center()
        .justify_center()
        .child(
            div()
                .text_size(px(13.0))
                .text_color(muted_fg)
                .child("Rendering..."),
        )
}

// ============================================================================
// Free-form
// ============================================================================

/// Absolute placement with drag, selection, and alignment guides. Mouse
/// handling lives on the window-level listeners, so images here carry no
/// click handlers of their own; only the action buttons intercept.
fn render_freeform(
    board: &Board,
    generating: bool,
    guides: &GuideSet,
    cx: &Context<Promptboard>,
) -> Div {
    profile_scope!("render_freeform");

    let zoom = board.zoom_factor();
    let selected = board.selected();
    let muted_fg = cx.theme().muted_foreground;
    let border = cx.theme().border;
    let muted = cx.theme().muted;

    let mut area = div().size_full().relative().overflow_hidden();

    for image in board.images() {
        let is_selected = selected == Some(image.id);
        area = area.child(render_freeform_image(image, zoom, is_selected, cx));
        if is_selected {
            area = area.child(render_freeform_toolbar(image, zoom, cx));
        }
    }

    area.when(!guides.is_empty(), |d| {
        d.child(render_guides(*guides, zoom, cx))
    })
    .when(generating, |d| {
        d.child(
            h_flex()
                .absolute()
                .bottom(px(16.0))
                .right(px(16.0))
                .px(px(12.0))
                .py(px(6.0))
                .bg(muted)
                .border_1()
                .border_color(border)
                .rounded(px(6.0))
                .shadow_md()
                .child(
                    div()
                        .text_size(px(12.0))
                        .text_color(muted_fg)
                        .child("Rendering..."),
                ),
        )
    })
}

fn render_freeform_image(
    image: &CanvasImage,
    zoom: f32,
    is_selected: bool,
    cx: &Context<Promptboard>,
) -> Div {
    let primary = cx.theme().primary;
    let x = image.position.0 * zoom;
    let y = image.position.1 * zoom;
    let w = image.size.0 * zoom;
    let h = image.size.1 * zoom;

    div()
        .absolute()
        .left(px(x))
        .top(px(y))
        .w(px(w))
        .h(px(h))
        .child(
            div()
                .size_full()
                .overflow_hidden()
                .rounded(px(6.0 * zoom))
                .child(img(image.path.clone()).size_full().object_fit(ObjectFit::Contain)),
        )
        .when(is_selected, |d| {
            d.border_2()
                .border_color(primary)
                .rounded(px(6.0 * zoom))
                .child(
                    // Resize handle - small corner indicator
                    div()
                        .absolute()
                        .right(px(-2.0))
                        .bottom(px(-2.0))
                        .w(px(10.0 * zoom))
                        .h(px(10.0 * zoom))
                        .bg(primary)
                        .rounded(px(2.0 * zoom))
                        .cursor(CursorStyle::ResizeUpLeftDownRight),
                )
        })
}

/// Floating action row above the selected image. Rendered as a separate
/// element so it is not clipped by the image bounds.
fn render_freeform_toolbar(image: &CanvasImage, zoom: f32, cx: &Context<Promptboard>) -> Div {
    let x = image.position.0 * zoom;
    let y = image.position.1 * zoom;
    let w = image.size.0 * zoom;
    let btn_height = 24.0 * zoom;
    let toolbar_y = y - btn_height - 8.0 * zoom;

    div()
        .absolute()
        .left(px(x))
        .top(px(toolbar_y))
        .w(px(w))
        .h(px(btn_height))
        .flex()
        .flex_row()
        .justify_end()
        .child(render_image_actions(image.id, zoom, cx))
}

/// Save / Remove button pair for the selected image.
fn render_image_actions(id: u64, zoom: f32, cx: &Context<Promptboard>) -> Div {
    let fg = cx.theme().foreground;
    let muted_bg = cx.theme().muted;
    let danger = cx.theme().danger;
    let white = hsla(0.0, 0.0, 1.0, 1.0);
    let btn_height = 24.0 * zoom;

    h_flex()
        .gap(px(6.0 * zoom))
        .child(
            div()
                .id(ElementId::Name(format!("save-image-btn-{}", id).into()))
                .h(px(btn_height))
                .px(px(8.0 * zoom))
                .bg(muted_bg)
                .rounded(px(5.0 * zoom))
                .cursor_pointer()
                .flex()
                .items_center()
                .shadow_md()
                .hover(|s| s.opacity(0.85))
                .on_mouse_down(MouseButton::Left, |_, _, cx| {
                    cx.stop_propagation();
                })
                .on_click(cx.listener(move |this, _, _, cx| {
                    this.download_image(id, cx);
                }))
                .child(
                    div()
                        .text_size(px(11.0 * zoom))
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(fg)
                        .child("Save"),
                ),
        )
        .child(
            div()
                .id(ElementId::Name(format!("remove-image-btn-{}", id).into()))
                .h(px(btn_height))
                .px(px(8.0 * zoom))
                .bg(danger)
                .rounded(px(5.0 * zoom))
                .cursor_pointer()
                .flex()
                .items_center()
                .shadow_md()
                .hover(|s| s.opacity(0.85))
                .on_mouse_down(MouseButton::Left, |_, _, cx| {
                    cx.stop_propagation();
                })
                .on_click(cx.listener(move |this, _, _, cx| {
                    this.remove_image(id, cx);
                }))
                .child(
                    div()
                        .text_size(px(11.0 * zoom))
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(white)
                        .child("Remove"),
                ),
        )
}

// ============================================================================
// Alignment guides
// ============================================================================

/// Paint the active guide lines to the GPU and hang a distance label off
/// each one.
fn render_guides(guides: GuideSet, zoom: f32, cx: &Context<Promptboard>) -> Div {
    let accent = cx.theme().primary;
    let vertical = guides.vertical;
    let horizontal = guides.horizontal;

    div()
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .child(
            canvas(
                move |_, _, _| (),
                move |bounds, _, window, _| {
                    if let Some(guide) = vertical {
                        let x = bounds.origin.x + px(guide.line * zoom);
                        let mut path = PathBuilder::stroke(px(1.0));
                        path.move_to(point(x, bounds.origin.y));
                        path.line_to(point(x, bounds.origin.y + bounds.size.height));
                        if let Ok(built) = path.build() {
                            window.paint_path(built, accent);
                        }
                    }
                    if let Some(guide) = horizontal {
                        let y = bounds.origin.y + px(guide.line * zoom);
                        let mut path = PathBuilder::stroke(px(1.0));
                        path.move_to(point(bounds.origin.x, y));
                        path.line_to(point(bounds.origin.x + bounds.size.width, y));
                        if let Ok(built) = path.build() {
                            window.paint_path(built, accent);
                        }
                    }
                },
            )
            .size_full(),
        )
        .when_some(vertical, |d, guide| {
            d.child(render_guide_label(
                guide,
                px(guide.line * zoom + GUIDE_LABEL_OFFSET),
                px(GUIDE_LABEL_OFFSET),
                cx,
            ))
        })
        .when_some(horizontal, |d, guide| {
            d.child(render_guide_label(
                guide,
                px(GUIDE_LABEL_OFFSET),
                px(guide.line * zoom + GUIDE_LABEL_OFFSET),
                cx,
            ))
        })
}

fn render_guide_label(guide: Guide, left: Pixels, top: Pixels, cx: &Context<Promptboard>) -> Div {
    let primary = cx.theme().primary;
    let primary_fg = cx.theme().primary_foreground;

    div()
        .absolute()
        .left(left)
        .top(top)
        .px(px(4.0))
        .py(px(1.0))
        .bg(primary)
        .rounded(px(3.0))
        .text_size(px(10.0))
        .text_color(primary_fg)
        .child(format!("{}px", guide.distance.round() as i32))
}

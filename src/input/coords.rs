//! Coordinate conversion between window space and canvas space.
//!
//! Mouse events arrive in window coordinates; canvas images live in
//! canvas coordinates. The free-form canvas sits right of the chat panel
//! and below the header and toolbar, scaled by the zoom factor.

use crate::constants::{CANVAS_TOOLBAR_HEIGHT, CHAT_PANEL_WIDTH, HEADER_HEIGHT};
use gpui::{Pixels, Point, Window, point, px};

/// Horizontal window offset of the canvas area.
pub fn canvas_left() -> f32 {
    CHAT_PANEL_WIDTH
}

/// Vertical window offset of the canvas area.
pub fn canvas_top() -> f32 {
    HEADER_HEIGHT + CANVAS_TOOLBAR_HEIGHT
}

/// Canvas-space extent of the visible canvas area.
pub fn canvas_extent(window: &Window, zoom: f32) -> (f32, f32) {
    let bounds = window.bounds();
    (
        ((f32::from(bounds.size.width) - canvas_left()) / zoom).max(0.0),
        ((f32::from(bounds.size.height) - canvas_top()) / zoom).max(0.0),
    )
}

/// Context needed for coordinate conversions
#[derive(Clone, Copy)]
pub struct CoordinateContext {
    pub zoom: f32,
}

impl CoordinateContext {
    #[inline]
    pub fn new(zoom: f32) -> Self {
        Self { zoom }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert window position to canvas position
    #[inline]
    pub fn screen_to_canvas(screen_pos: Point<Pixels>, ctx: &CoordinateContext) -> (f32, f32) {
        (
            (f32::from(screen_pos.x) - canvas_left()) / ctx.zoom,
            (f32::from(screen_pos.y) - canvas_top()) / ctx.zoom,
        )
    }

    /// Convert canvas position to window position
    #[inline]
    pub fn canvas_to_screen(canvas_pos: (f32, f32), ctx: &CoordinateContext) -> Point<Pixels> {
        point(
            px(canvas_pos.0 * ctx.zoom + canvas_left()),
            px(canvas_pos.1 * ctx.zoom + canvas_top()),
        )
    }

    /// Convert a window-space delta to canvas space (for drag operations)
    #[inline]
    pub fn delta_screen_to_canvas(delta: Point<Pixels>, zoom: f32) -> (f32, f32) {
        (f32::from(delta.x) / zoom, f32::from(delta.y) / zoom)
    }
}

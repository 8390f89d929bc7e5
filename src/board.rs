//! The canvas board model.
//!
//! Owns the placed images, the active view mode, zoom, and selection. All
//! coordinates are canvas-space; the render layer applies zoom and panel
//! offsets on top.
//!
//! Free-form positions are session state: they are seeded in a diagonal
//! cascade and re-seeded whenever the image list changes, so drags survive
//! only until the next generation or removal.

use crate::constants::{
    DEFAULT_ZOOM, FREEFORM_ORIGIN, FREEFORM_STAGGER, FREEFORM_WRAP, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use crate::snap::ItemBounds;
use crate::types::{CanvasImage, ViewMode};

pub struct Board {
    images: Vec<CanvasImage>,
    pub view_mode: ViewMode,
    zoom: u32,
    selected: Option<u64>,
    next_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            view_mode: ViewMode::default(),
            zoom: DEFAULT_ZOOM,
            selected: None,
            next_id: 1,
        }
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    pub fn next_image_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an image and select it.
    pub fn add_image(&mut self, image: CanvasImage) {
        let id = image.id;
        self.images.push(image);
        self.reseed_freeform();
        self.selected = Some(id);
    }

    pub fn remove_image(&mut self, id: u64) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        if self.images.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.reseed_freeform();
        true
    }

    pub fn images(&self) -> &[CanvasImage] {
        &self.images
    }

    pub fn image(&self, id: u64) -> Option<&CanvasImage> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn image_mut(&mut self, id: u64) -> Option<&mut CanvasImage> {
        self.images.iter_mut().find(|image| image.id == id)
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    // ------------------------------------------------------------------
    // Selection and hit testing
    // ------------------------------------------------------------------

    pub fn select(&mut self, id: u64) {
        if self.images.iter().any(|image| image.id == id) {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    /// Topmost image under a canvas-space point. Later images draw on top,
    /// so the scan runs back to front.
    pub fn hit_test(&self, point: (f32, f32)) -> Option<u64> {
        self.images.iter().rev().find_map(|image| {
            let (x, y, w, h) = image.bounds();
            let inside = point.0 >= x && point.0 <= x + w && point.1 >= y && point.1 <= y + h;
            inside.then_some(image.id)
        })
    }

    pub fn bring_to_front(&mut self, id: u64) {
        if let Some(index) = self.images.iter().position(|image| image.id == id) {
            let image = self.images.remove(index);
            self.images.push(image);
        }
    }

    /// Move an image in free-form mode.
    pub fn move_image(&mut self, id: u64, position: (f32, f32)) {
        if let Some(image) = self.image_mut(id) {
            image.position = position;
        }
    }

    /// Bounds of every image except `id`, for snap guide candidates.
    pub fn bounds_except(&self, id: u64) -> Vec<ItemBounds> {
        self.images
            .iter()
            .filter(|image| image.id != id)
            .map(|image| {
                let (x, y, w, h) = image.bounds();
                ItemBounds {
                    id: image.id,
                    x,
                    y,
                    w,
                    h,
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // View mode and zoom
    // ------------------------------------------------------------------

    /// Switch layout mode. Entering free-form re-seeds the cascade so the
    /// layout starts from a known arrangement.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == ViewMode::FreeForm && self.view_mode != ViewMode::FreeForm {
            self.reseed_freeform();
        }
        self.view_mode = mode;
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom as f32 / 100.0
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// Rendered image width in single-column mode.
    pub fn single_display_size(&self) -> f32 {
        (320.0 * self.zoom_factor()).round().clamp(200.0, 800.0)
    }

    /// Rendered cell width in grid mode.
    pub fn grid_cell_size(&self) -> f32 {
        (200.0 * self.zoom_factor()).round().clamp(120.0, 400.0)
    }

    fn reseed_freeform(&mut self) {
        for (index, image) in self.images.iter_mut().enumerate() {
            image.position = freeform_slot(index);
        }
    }
}

/// Diagonal cascade position for the image at `index`.
fn freeform_slot(index: usize) -> (f32, f32) {
    let step = (index % FREEFORM_WRAP) as f32;
    (
        FREEFORM_ORIGIN.0 + step * FREEFORM_STAGGER,
        FREEFORM_ORIGIN.1 + step * FREEFORM_STAGGER,
    )
}

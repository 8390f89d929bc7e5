//! Input state machine for canvas interactions.
//!
//! A single explicit state replaces scattered boolean flags, so impossible
//! combinations (dragging two images, releasing a drag that never started)
//! cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> DraggingImage   (mouse down on an image in free-form mode)
//! Any  -> Idle            (mouse up - finalizes the drag)
//! ```

/// Current mouse interaction on the canvas.
#[derive(Debug, Clone)]
pub enum InputState {
    /// Nothing in flight.
    Idle,

    /// Dragging an image in free-form mode
    DraggingImage {
        /// Image under the cursor
        image_id: u64,
        /// Canvas-space offset from image origin to the cursor
        drag_offset: (f32, f32),
        /// Whether the cursor has moved since mouse down; distinguishes a
        /// click from a drag
        moved: bool,
        /// Whether the snap-suppression modifier was held at any point
        /// during this drag
        modifier_used: bool,
    },
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingImage { .. })
    }

    pub fn dragged_image_id(&self) -> Option<u64> {
        match self {
            Self::DraggingImage { image_id, .. } => Some(*image_id),
            _ => None,
        }
    }

    pub fn drag_offset(&self) -> Option<(f32, f32)> {
        match self {
            Self::DraggingImage { drag_offset, .. } => Some(*drag_offset),
            _ => None,
        }
    }

    pub fn drag_moved(&self) -> bool {
        matches!(self, Self::DraggingImage { moved: true, .. })
    }

    pub fn drag_used_modifier(&self) -> bool {
        matches!(
            self,
            Self::DraggingImage {
                modifier_used: true,
                ..
            }
        )
    }

    pub fn start_dragging(&mut self, image_id: u64, drag_offset: (f32, f32)) {
        *self = Self::DraggingImage {
            image_id,
            drag_offset,
            moved: false,
            modifier_used: false,
        };
    }

    pub fn mark_moved(&mut self) {
        if let Self::DraggingImage { moved, .. } = self {
            *moved = true;
        }
    }

    /// Record that the snap modifier was held. Sticky for the rest of the
    /// drag: a modifier-touched drag never grid-rounds on release.
    pub fn mark_modifier_used(&mut self) {
        if let Self::DraggingImage { modifier_used, .. } = self {
            *modifier_used = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::Idle
    }
}

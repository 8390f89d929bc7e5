//! Mouse and scroll input handling for the canvas.
//!
//! Covers image selection, free-form dragging with edge snapping, and
//! scroll-wheel zoom. Interaction mode lives in a single `InputState`
//! enum rather than loose booleans, so a drag cannot coexist with any
//! other gesture.
//!
//! Handlers are split by event: `mouse_down` starts a gesture (selection,
//! drag start), `drag` moves it and resolves snapping, `mouse_up` commits
//! it, `transform` covers zoom, and `coords` converts between window and
//! canvas space.

pub mod coords;
mod drag;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use state::InputState;

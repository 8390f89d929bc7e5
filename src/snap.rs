//! Free-form layout snapping.
//!
//! Pure geometry over f32 rectangles: given a proposed position for the
//! dragged image, find the best alignment candidate per axis (canvas
//! centerline or another image's edges), pull the position onto it when
//! within the snap threshold, and report guide metadata for rendering.
//! No gpui types so the whole module is testable without a window.

use crate::constants::{GRID_UNIT, SNAP_THRESHOLD};

// ============================================================================
// Types
// ============================================================================

/// Reference points tested on each axis: left/center/right horizontally,
/// top/middle/bottom vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Leading,
    Center,
    Trailing,
}

/// What supplied the matched alignment line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideSource {
    /// The canvas's own centerline
    Canvas,
    /// Another placed image's edge
    Item(u64),
}

/// An active alignment match on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guide {
    /// Canvas coordinate of the alignment line (x for vertical guides,
    /// y for horizontal guides)
    pub line: f32,
    pub source: GuideSource,
    /// Which reference point on the dragged image matched
    pub item_edge: EdgeKind,
    /// Which candidate edge it snapped to
    pub target_edge: EdgeKind,
    /// Pixel distance closed by the snap
    pub distance: f32,
}

/// At most one guide per axis is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GuideSet {
    /// Vertical line from an x-axis match
    pub vertical: Option<Guide>,
    /// Horizontal line from a y-axis match
    pub horizontal: Option<Guide>,
}

impl GuideSet {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }
}

/// Bounding box of a placed image, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBounds {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ItemBounds {
    pub fn new(id: u64, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { id, x, y, w, h }
    }
}

/// Result of one pointer-move resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOutcome {
    /// Adjusted (left, top), clamped to canvas bounds
    pub position: (f32, f32),
    pub guides: GuideSet,
}

// ============================================================================
// Snapping
// ============================================================================

/// Resolve a proposed drag position against alignment candidates.
///
/// Axes are independent: each is resolved once per call, taking the single
/// best reference/candidate pair. With `snap_enabled` false (modifier held)
/// the proposed position is only clamped.
pub fn snap_position(
    proposed: (f32, f32),
    size: (f32, f32),
    others: &[ItemBounds],
    canvas: (f32, f32),
    snap_enabled: bool,
) -> SnapOutcome {
    if !snap_enabled {
        return SnapOutcome {
            position: clamp_to_canvas(proposed, size, canvas),
            guides: GuideSet::default(),
        };
    }

    let x_candidates = axis_candidates(canvas.0, others, Axis::X);
    let y_candidates = axis_candidates(canvas.1, others, Axis::Y);

    let x_match = resolve_axis(proposed.0, size.0, &x_candidates);
    let y_match = resolve_axis(proposed.1, size.1, &y_candidates);

    let snapped = (
        x_match.map(|(pos, _)| pos).unwrap_or(proposed.0),
        y_match.map(|(pos, _)| pos).unwrap_or(proposed.1),
    );

    SnapOutcome {
        position: clamp_to_canvas(snapped, size, canvas),
        guides: GuideSet {
            vertical: x_match.map(|(_, g)| g),
            horizontal: y_match.map(|(_, g)| g),
        },
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// One alignment line on an axis.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    value: f32,
    source: GuideSource,
    edge: EdgeKind,
}

/// Candidate lines for one axis: the canvas centerline plus every other
/// image's leading/center/trailing edge.
fn axis_candidates(canvas_extent: f32, others: &[ItemBounds], axis: Axis) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(1 + others.len() * 3);
    candidates.push(Candidate {
        value: canvas_extent / 2.0,
        source: GuideSource::Canvas,
        edge: EdgeKind::Center,
    });
    for other in others {
        let (start, extent) = match axis {
            Axis::X => (other.x, other.w),
            Axis::Y => (other.y, other.h),
        };
        candidates.push(Candidate {
            value: start,
            source: GuideSource::Item(other.id),
            edge: EdgeKind::Leading,
        });
        candidates.push(Candidate {
            value: start + extent / 2.0,
            source: GuideSource::Item(other.id),
            edge: EdgeKind::Center,
        });
        candidates.push(Candidate {
            value: start + extent,
            source: GuideSource::Item(other.id),
            edge: EdgeKind::Trailing,
        });
    }
    candidates
}

/// Test the dragged image's three reference points against every candidate;
/// the pair with the smallest absolute distance wins if within threshold.
/// Returns the snapped axis start and the guide, or None when nothing is
/// close enough.
fn resolve_axis(start: f32, extent: f32, candidates: &[Candidate]) -> Option<(f32, Guide)> {
    let references = [
        (start, EdgeKind::Leading),
        (start + extent / 2.0, EdgeKind::Center),
        (start + extent, EdgeKind::Trailing),
    ];

    let mut best: Option<(f32, Guide)> = None;
    for candidate in candidates {
        for (reference, item_edge) in references {
            let delta = candidate.value - reference;
            let distance = delta.abs();
            if distance > SNAP_THRESHOLD {
                continue;
            }
            let better = match &best {
                Some((_, g)) => distance < g.distance,
                None => true,
            };
            if better {
                best = Some((
                    start + delta,
                    Guide {
                        line: candidate.value,
                        source: candidate.source,
                        item_edge,
                        target_edge: candidate.edge,
                        distance,
                    },
                ));
            }
        }
    }
    best
}

// ============================================================================
// Clamping & Grid
// ============================================================================

/// Keep the image fully inside the canvas. Oversized images pin to the
/// top-left rather than oscillating.
pub fn clamp_to_canvas(position: (f32, f32), size: (f32, f32), canvas: (f32, f32)) -> (f32, f32) {
    let max_x = (canvas.0 - size.0).max(0.0);
    let max_y = (canvas.1 - size.1).max(0.0);
    (position.0.clamp(0.0, max_x), position.1.clamp(0.0, max_y))
}

/// Round both axes to the nearest coarse grid cell. Applied on drag release
/// when no snap engaged and the modifier was never held.
pub fn round_to_grid(position: (f32, f32)) -> (f32, f32) {
    (
        (position.0 / GRID_UNIT).round() * GRID_UNIT,
        (position.1 / GRID_UNIT).round() * GRID_UNIT,
    )
}

/// Drag-release position: grid-round only a gesture that never snapped and
/// never saw the modifier, then clamp either way.
pub fn finalize_position(
    position: (f32, f32),
    size: (f32, f32),
    canvas: (f32, f32),
    snap_engaged: bool,
    modifier_used: bool,
) -> (f32, f32) {
    let settled = if !snap_engaged && !modifier_used {
        round_to_grid(position)
    } else {
        position
    };
    clamp_to_canvas(settled, size, canvas)
}

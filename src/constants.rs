//! Shared layout, timing, and behavior constants.

// ============================================================================
// Layout
// ============================================================================

/// Header bar height
pub const HEADER_HEIGHT: f32 = 40.0;

/// Width of the chat panel on the left
pub const CHAT_PANEL_WIDTH: f32 = 360.0;

/// Height of the canvas toolbar (view mode + zoom controls)
pub const CANVAS_TOOLBAR_HEIGHT: f32 = 36.0;

// ============================================================================
// Snap & Grid
// ============================================================================

/// Maximum pixel distance at which a dragged edge is pulled onto an
/// alignment candidate
pub const SNAP_THRESHOLD: f32 = 8.0;

/// Coarse grid cell size used when a drag ends without any snap
pub const GRID_UNIT: f32 = 24.0;

/// Length in pixels of the distance label offset from a guide line
pub const GUIDE_LABEL_OFFSET: f32 = 6.0;

// ============================================================================
// Canvas Items
// ============================================================================

/// Default placed-image size in free-form mode (before aspect correction)
pub const DEFAULT_IMAGE_SIZE: (f32, f32) = (220.0, 220.0);

/// Stagger step between seeded free-form positions
pub const FREEFORM_STAGGER: f32 = 36.0;

/// Top-left corner the free-form cascade starts from
pub const FREEFORM_ORIGIN: (f32, f32) = (48.0, 48.0);

/// Cascade restarts after this many images so it never walks off the canvas
pub const FREEFORM_WRAP: usize = 10;

/// Minimum placed-image dimension
pub const MIN_IMAGE_SIZE: f32 = 50.0;

// ============================================================================
// Zoom
// ============================================================================

/// Minimum zoom percentage
pub const MIN_ZOOM: u32 = 25;

/// Maximum zoom percentage
pub const MAX_ZOOM: u32 = 200;

/// Default zoom percentage
pub const DEFAULT_ZOOM: u32 = 100;

/// Zoom step for the toolbar +/- buttons
pub const ZOOM_STEP: u32 = 25;

// ============================================================================
// Networking
// ============================================================================

/// Client-side timeout for companion-backend calls, in seconds.
/// The image-generation endpoint deliberately has no client timeout.
pub const BACKEND_TIMEOUT_SECS: u64 = 30;

/// Timeout for fetching a generated image from its remote URL, in seconds
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Notifications
// ============================================================================

/// Toast auto-dismiss delay in milliseconds
pub const TOAST_DURATION_MS: u64 = 4_000;

/// Portion of a toast's lifetime spent fading out
pub const TOAST_FADE_FRACTION: f32 = 0.2;

// ============================================================================
// Chat Panel
// ============================================================================

/// Number of templates shown at once
pub const TEMPLATE_COUNT: usize = 3;

/// Number of scenes in a storyboard batch
pub const STORYBOARD_SCENES: usize = 5;

// ============================================================================
// Modals
// ============================================================================

/// Width of the API key dialog
pub const MODAL_WIDTH_SM: f32 = 420.0;
/// Width of the settings modal
pub const MODAL_WIDTH_LG: f32 = 680.0;

/// Height of the settings modal
pub const MODAL_HEIGHT_MD: f32 = 480.0;

/// How dark the backdrop dims everything behind a modal
pub const MODAL_BACKDROP_OPACITY: f32 = 0.6;

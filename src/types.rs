//! Core types for the Promptboard canvas and chat system.
//!
//! This module defines the fundamental data structures used throughout the
//! application: placed canvas images, chat messages, creative templates, and
//! the canvas view modes.

use crate::constants::{DEFAULT_IMAGE_SIZE, MIN_IMAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

// ============================================================================
// Canvas Types
// ============================================================================

/// A generated image placed on the canvas.
///
/// Free-form position and size are session state only; they are re-seeded
/// whenever the image list changes and never persisted.
#[derive(Clone, Debug)]
pub struct CanvasImage {
    /// Unique identifier within the session
    pub id: u64,
    /// Local cache file the image was materialized to
    pub path: PathBuf,
    /// Where the image came from (remote URL or inline data)
    pub origin: ImageOrigin,
    /// The prompt that produced this image
    pub prompt: String,
    /// Model that generated it
    pub model: String,
    /// Position (left, top) in canvas coordinates, free-form mode only
    pub position: (f32, f32),
    /// Size (width, height) in canvas coordinates
    pub size: (f32, f32),
}

impl CanvasImage {
    pub fn new(id: u64, path: PathBuf, origin: ImageOrigin, prompt: String, model: String) -> Self {
        Self {
            id,
            path,
            origin,
            prompt,
            model,
            position: (0.0, 0.0),
            size: DEFAULT_IMAGE_SIZE,
        }
    }

    /// Scale the default size to this image's aspect ratio.
    /// Width is held at the default; height follows the natural proportions
    /// but never drops below `MIN_IMAGE_SIZE`.
    pub fn apply_natural_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = height as f32 / width as f32;
        self.size = (
            DEFAULT_IMAGE_SIZE.0,
            (DEFAULT_IMAGE_SIZE.0 * aspect).max(MIN_IMAGE_SIZE),
        );
    }

    /// Bounding box as (left, top, width, height).
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.position.0, self.position.1, self.size.0, self.size.1)
    }
}

/// Provenance of a canvas image, kept for re-download and export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Fetched from a remote URL
    Url(String),
    /// Decoded from inline base64 data in the API response
    Inline,
}

impl ImageOrigin {
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageOrigin::Url(url) => Some(url),
            ImageOrigin::Inline => None,
        }
    }
}

/// How the canvas lays out its images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// One column, images stacked
    Single,
    /// Responsive grid
    #[default]
    Grid,
    /// Absolute placement with drag and snap
    FreeForm,
}

impl ViewMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Single => "Single",
            ViewMode::Grid => "Grid",
            ViewMode::FreeForm => "Free-form",
        }
    }

    pub const ALL: [ViewMode; 3] = [ViewMode::Single, ViewMode::Grid, ViewMode::FreeForm];
}

// ============================================================================
// Chat Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry in the conversation history.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: SystemTime,
    /// Materialized image files attached to assistant replies
    pub images: Vec<PathBuf>,
    /// Template id the user sent this prompt with, if any
    pub template: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: SystemTime::now(),
            images: Vec::new(),
            template: None,
        }
    }

    pub fn with_images(mut self, images: Vec<PathBuf>) -> Self {
        self.images = images;
        self
    }

    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }

    /// Relative age for display ("Just now", "5m ago", "2h ago").
    pub fn formatted_time(&self) -> String {
        let elapsed = self.timestamp.elapsed().map(|d| d.as_secs()).unwrap_or(0);
        if elapsed < 60 {
            "Just now".to_string()
        } else if elapsed < 3600 {
            format!("{}m ago", elapsed / 60)
        } else if elapsed < 86_400 {
            format!("{}h ago", elapsed / 3600)
        } else {
            format!("{}d ago", elapsed / 86_400)
        }
    }
}

// ============================================================================
// Creative Templates
// ============================================================================

/// Template id that switches generation into batch mode.
pub const STORYBOARD_TEMPLATE_ID: &str = "storyboard";

/// A pre-built prompt the user can start from. The storyboard template
/// switches generation into batch mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub prompt: &'static str,
}

impl Template {
    pub fn is_storyboard(&self) -> bool {
        self.id == STORYBOARD_TEMPLATE_ID
    }

    /// The three templates shown on first open.
    pub fn seed() -> Vec<Template> {
        vec![
            Template {
                id: "poster",
                title: "Poster",
                subtitle: "Event & product posters",
                prompt: "A bold promotional poster with strong typography and a vivid gradient background",
            },
            Template {
                id: "logo",
                title: "Logo",
                subtitle: "Brand marks & icons",
                prompt: "A minimal geometric logo mark on a clean background, flat vector style",
            },
            Template {
                id: "book",
                title: "Picture book",
                subtitle: "Illustrated story pages",
                prompt: "A warm watercolor picture-book illustration of a small fox in a forest",
            },
        ]
    }

    /// The rotating pool the shuffle action draws from.
    pub fn pool() -> Vec<Template> {
        vec![
            Template {
                id: "wine",
                title: "Wine label",
                subtitle: "Packaging design",
                prompt: "An elegant wine label with vintage engraving style and gold foil accents",
            },
            Template {
                id: "promotion",
                title: "Promotion",
                subtitle: "Sale announcements",
                prompt: "A high-energy sale announcement graphic with big numbers and confetti",
            },
            Template {
                id: "landing",
                title: "Landing page",
                subtitle: "Hero illustrations",
                prompt: "A modern landing page hero illustration, isometric style, soft pastel palette",
            },
            Template {
                id: "app",
                title: "App UI",
                subtitle: "Interface mockups",
                prompt: "A clean mobile app interface mockup with rounded cards and friendly icons",
            },
            Template {
                id: "album",
                title: "Album cover",
                subtitle: "Music artwork",
                prompt: "A surreal album cover with a lone figure under a giant moon, film grain",
            },
            Template {
                id: "storyboard",
                title: "Storyboard",
                subtitle: "Five-scene sequence",
                prompt: "A nostalgic short film about rediscovering an old mixtape",
            },
            Template {
                id: "banner",
                title: "Banner",
                subtitle: "Web & social banners",
                prompt: "A wide social media banner with layered paper-cut shapes and bold title space",
            },
            Template {
                id: "menu",
                title: "Menu",
                subtitle: "Restaurant menus",
                prompt: "A rustic restaurant menu design with hand-drawn dish illustrations",
            },
            Template {
                id: "travel",
                title: "Travel",
                subtitle: "Destination art",
                prompt: "A retro travel poster of a coastal town at sunset, screen-print texture",
            },
            Template {
                id: "coffee",
                title: "Coffee",
                subtitle: "Cafe branding",
                prompt: "A cozy coffee shop brand illustration with steam forming latte art swirls",
            },
        ]
    }

    /// Pick `count` distinct templates from the pool at random.
    pub fn shuffle(count: usize) -> Vec<Template> {
        use rand::seq::SliceRandom;
        let mut pool = Self::pool();
        pool.shuffle(&mut rand::thread_rng());
        pool.truncate(count);
        pool
    }
}

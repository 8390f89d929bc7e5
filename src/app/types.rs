//! App-level type definitions - settings tabs and background-job events.

use crate::api::models::{ModelInfo, User};
use crate::types::ImageOrigin;
use std::path::PathBuf;

/// Messages background jobs send back to the UI thread. Completion callbacks
/// only forward onto this channel; all state mutation happens when the frame
/// loop drains it.
#[derive(Debug)]
pub enum AppEvent {
    /// A generation branch resolved
    Generation(PipelineEvent),
    /// GET /models answered
    Catalog(Vec<ModelInfo>),
    /// GET /user/profile answered for a stored session token
    Profile(User),
    /// The stored session token was rejected
    SessionExpired { message: String },
}

/// Tabs in the settings modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SettingsTab {
    /// Theme, motion, snapping, generation defaults
    #[default]
    General,
    /// Image API and backend URLs, account
    Connection,
}

impl SettingsTab {
    pub fn display_name(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Connection => "Connection",
        }
    }
}

/// An image a generation job produced, already materialized to a local
/// cache file so the canvas can render it by path.
#[derive(Clone, Debug)]
pub struct MaterializedImage {
    pub path: PathBuf,
    pub origin: ImageOrigin,
    /// The (possibly scene-suffixed) prompt this image answers
    pub prompt: String,
    pub dimensions: Option<(u32, u32)>,
}

/// What one finished generation job reports back to the UI thread.
///
/// Jobs never fail outright: a failed branch still delivers a placeholder
/// image, so `images` is empty only when even the placeholder could not be
/// fetched. The original failure rides along in `error` for toasting.
#[derive(Debug)]
pub struct PipelineEvent {
    /// The base prompt the user sent
    pub prompt: String,
    pub model: String,
    /// Template id the prompt was sent with, if any
    pub template: Option<String>,
    pub images: Vec<MaterializedImage>,
    /// Storyboard scenes that produced no image
    pub failed_scenes: usize,
    /// The branch failed and the deterministic placeholder was used
    pub used_fallback: bool,
    /// The API failure behind the fallback, when there was one
    pub error: Option<PipelineError>,
}

/// API failure carried across the worker boundary, pre-classified because
/// auth failures route to the key modal instead of just a toast.
#[derive(Clone, Debug)]
pub struct PipelineError {
    pub message: String,
    pub auth: bool,
}

impl PipelineError {
    pub fn from_api(error: &crate::api::ApiError) -> Self {
        Self {
            message: error.to_string(),
            auth: error.is_auth(),
        }
    }
}

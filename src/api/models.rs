//! Model catalog and wire types for the image API and companion backend.

use super::ApiError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Model Catalog
// ============================================================================

/// Default text-to-image model
pub const TEXT_TO_IMAGE: &str = "gemini-2.5-flash-image";
/// Higher-quality text-to-image model
pub const TEXT_TO_IMAGE_PRO: &str = "gemini-3.0-pro-image-preview";
/// Image-to-image editing model (same family as text-to-image)
pub const IMAGE_TO_IMAGE: &str = "gemini-2.5-flash-image";
/// Video-capable model kept for parity with the hosted catalog
pub const KLING_V2: &str = "kling-v2";

/// A user-selectable model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models offered in the chat panel selector.
pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        id: TEXT_TO_IMAGE,
        name: "Nano Banana",
    },
    ModelOption {
        id: TEXT_TO_IMAGE_PRO,
        name: "Nano Banana Pro",
    },
    ModelOption {
        id: KLING_V2,
        name: "Kling V2",
    },
];

/// Display name for a model id, falling back to the id itself.
pub fn model_display_name(id: &str) -> &str {
    MODEL_OPTIONS
        .iter()
        .find(|option| option.id == id)
        .map(|option| option.name)
        .unwrap_or(id)
}

// ============================================================================
// Image Sizes
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    #[default]
    Square,
    Portrait,
    Landscape,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Portrait => "768x1344",
            ImageSize::Landscape => "1344x768",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImageSize::Square => "Square",
            ImageSize::Portrait => "Portrait",
            ImageSize::Landscape => "Landscape",
        }
    }

    pub const ALL: [ImageSize; 3] = [ImageSize::Square, ImageSize::Portrait, ImageSize::Landscape];
}

// ============================================================================
// Image API Wire Types
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageConfig {
    pub aspect_ratio: String,
    pub image_size: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "1:1".to_string(),
            image_size: ImageSize::Square.as_str().to_string(),
        }
    }
}

impl ImageConfig {
    pub fn for_size(size: ImageSize) -> Self {
        Self {
            aspect_ratio: "1:1".to_string(),
            image_size: size.as_str().to_string(),
        }
    }
}

/// Body for POST /images/generations.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub image_config: ImageConfig,
    pub response_format: String,
}

/// Body for POST /images/edits. No response_format, matching the service
/// this client talks to.
#[derive(Clone, Debug, Serialize)]
pub struct EditRequest {
    pub model: String,
    pub image: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    pub image_config: ImageConfig,
}

/// One generated image as the server reports it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
}

impl GeneratedImage {
    /// The reference the UI places: URL when present, otherwise the inline
    /// base64 payload.
    pub fn reference(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.b64_json.as_deref().filter(|b| !b.is_empty()))
    }
}

/// Raw response body; the server answers with either `images` or `data`
/// as the array key.
#[derive(Debug, Deserialize)]
pub struct RawGenerationResponse {
    pub images: Option<Vec<GeneratedImage>>,
    pub data: Option<Vec<GeneratedImage>>,
    pub created: Option<u64>,
    pub model: Option<String>,
}

/// Normalized response every caller sees.
#[derive(Clone, Debug)]
pub struct GenerationResponse {
    pub images: Vec<GeneratedImage>,
    pub created: u64,
    pub model: String,
}

impl GenerationResponse {
    /// Normalize a raw body: prefer `images`, fall back to `data`, default
    /// missing metadata from the request.
    pub fn normalize(raw: RawGenerationResponse, request_model: &str) -> Self {
        let images = raw.images.or(raw.data).unwrap_or_default();
        let created = raw.created.unwrap_or_else(now_unix);
        let model = raw.model.unwrap_or_else(|| request_model.to_string());
        Self {
            images,
            created,
            model,
        }
    }
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Entry from GET /models.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub owned_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

// ============================================================================
// Backend Envelope & Entities
// ============================================================================

/// Every backend response wraps its payload in this envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap `data`, turning an unsuccessful envelope into an error with
    /// the server's text or the supplied fallback.
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::Rejected {
                message: self.error.unwrap_or_else(|| fallback.to_string()),
            }),
        }
    }

    /// For endpoints with no payload (deletes): only the error matters.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if !self.success {
            if let Some(error) = self.error {
                return Err(ApiError::Rejected { message: error });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Single,
    Storyboard,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub image_count: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteImageStatus {
    Pending,
    Completed,
    Failed,
}

/// An image record the backend stores per project.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteImage {
    pub id: String,
    pub project_id: String,
    pub prompt: String,
    pub model: String,
    pub size: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_data: String,
    pub status: RemoteImageStatus,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// Body for the backend's server-side generation route.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RemoteGenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Result payload from the backend's generation routes. Unlike client-side
/// generation the backend resolves provider output to plain URL strings.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteGeneration {
    pub success: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub message: String,
}

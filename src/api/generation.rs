//! Image generation client.
//!
//! Blocking HTTP against the hosted image API; every call runs on a
//! background worker, never the UI thread. The generation endpoint has no
//! client-side timeout: jobs legitimately run for tens of seconds.

use super::models::{
    EditRequest, GeneratedImage, GenerationRequest, GenerationResponse, ImageConfig, ImageSize,
    ModelInfo, ModelListResponse, RawGenerationResponse,
};
use super::{ApiError, DEFAULT_IMAGE_API_URL};
use serde::Serialize;
use tracing::{debug, warn};

/// Cheap to clone so jobs can carry their own copy onto a worker thread.
#[derive(Clone)]
pub struct GenerationClient {
    base_url: String,
    api_key: Option<String>,
}

impl GenerationClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_IMAGE_API_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn set_api_key(&mut self, key: Option<String>) {
        self.api_key = key;
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn has_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Text-to-image. One image per call.
    pub fn generate_image(
        &self,
        prompt: &str,
        model: &str,
        size: ImageSize,
    ) -> Result<GenerationResponse, ApiError> {
        let request = GenerationRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.as_str().to_string(),
            image_config: ImageConfig::for_size(size),
            response_format: "url".to_string(),
        };
        debug!(model, size = size.as_str(), "Generating image");
        let raw = self.post_json("/images/generations", &request)?;
        Ok(GenerationResponse::normalize(raw, model))
    }

    /// Image-to-image: condition on a prior image (data URL or remote URL).
    pub fn edit_image(
        &self,
        image: &str,
        prompt: &str,
        model: &str,
        size: ImageSize,
    ) -> Result<GenerationResponse, ApiError> {
        let request = EditRequest {
            model: model.to_string(),
            image: image.to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.as_str().to_string(),
            mask: None,
            image_config: ImageConfig::for_size(size),
        };
        debug!(model, "Editing image");
        let raw = self.post_json("/images/edits", &request)?;
        Ok(GenerationResponse::normalize(raw, model))
    }

    /// Generate one image per prompt, sequentially. The result always has
    /// the same length as `prompts`; a failed entry becomes an empty string
    /// so one bad prompt cannot abort the batch.
    pub fn generate_batch(&self, prompts: &[String], model: &str, size: ImageSize) -> Vec<String> {
        let mut results = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            match self.generate_image(prompt, model, size) {
                Ok(response) => {
                    let reference = response
                        .images
                        .first()
                        .and_then(GeneratedImage::reference)
                        .map(str::to_string)
                        .unwrap_or_default();
                    results.push(reference);
                }
                Err(e) => {
                    warn!(prompt, error = %e, "Batch entry failed, keeping placeholder");
                    results.push(String::new());
                }
            }
        }
        results
    }

    /// GET /models. Callers treat a failure as an empty catalog.
    pub fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let key = self.key()?;
        let url = format!("{}/models", self.base_url);
        let result = ureq::get(&url)
            .set("Authorization", &format!("Bearer {}", key))
            .call();
        match result {
            Ok(response) => response
                .into_json::<ModelListResponse>()
                .map(|list| list.data)
                .map_err(|e| ApiError::Malformed(e.to_string())),
            Err(e) => Err(classify(e)),
        }
    }

    fn post_json(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<RawGenerationResponse, ApiError> {
        let key = self.key()?;
        let url = format!("{}{}", self.base_url, endpoint);
        let result = ureq::post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", key))
            .send_json(body);
        match result {
            Ok(response) => response
                .into_json::<RawGenerationResponse>()
                .map_err(|e| ApiError::Malformed(e.to_string())),
            Err(e) => Err(classify(e)),
        }
    }

    fn key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingKey)
    }
}

fn classify(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::from_status(status, &body)
        }
        ureq::Error::Transport(transport) => ApiError::from_transport(transport.to_string()),
    }
}

//! Companion backend client.
//!
//! REST against the optional project/auth backend. Every response is an
//! `{success, data?, message?, error?}` envelope; every call carries the
//! fixed 30-second timeout, which surfaces as [`ApiError::Timeout`] distinct
//! from generic transport failures.

use super::models::{
    ApiEnvelope, AuthResponse, Project, ProjectKind, RemoteGeneration, RemoteGenerationRequest,
    RemoteImage, User,
};
use super::{ApiError, DEFAULT_BACKEND_URL};
use crate::constants::BACKEND_TIMEOUT_SECS;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BACKEND_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ==================== Auth ====================

    /// Log in and adopt the returned session token.
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        let auth: AuthResponse = self
            .post("/auth/login", &body)?
            .into_data("Login failed")?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub fn register(
        &mut self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": email, "username": username, "password": password });
        let auth: AuthResponse = self
            .post("/auth/register", &body)?
            .into_data("Registration failed")?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn user_profile(&self) -> Result<User, ApiError> {
        self.get("/user/profile")?
            .into_data("Failed to get user profile")
    }

    pub fn update_user_profile(
        &self,
        username: &str,
        avatar: Option<&str>,
    ) -> Result<User, ApiError> {
        let body = json!({ "username": username, "avatar": avatar });
        self.put("/user/profile", &body)?
            .into_data("Failed to update user profile")
    }

    // ==================== Projects ====================

    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let envelope: ApiEnvelope<Vec<Project>> = self.get("/projects")?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn create_project(
        &self,
        title: &str,
        description: &str,
        kind: ProjectKind,
    ) -> Result<Project, ApiError> {
        let body = json!({ "title": title, "description": description, "type": kind });
        self.post("/projects", &body)?
            .into_data("Failed to create project")
    }

    pub fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{}", id))?
            .into_data("Failed to get project")
    }

    pub fn update_project(
        &self,
        id: &str,
        title: &str,
        description: &str,
        kind: ProjectKind,
    ) -> Result<Project, ApiError> {
        let body = json!({ "title": title, "description": description, "type": kind });
        self.put(&format!("/projects/{}", id), &body)?
            .into_data("Failed to update project")
    }

    pub fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<serde_json::Value>(&format!("/projects/{}", id))?
            .into_unit()
    }

    // ==================== Images ====================

    pub fn list_images(&self, project_id: Option<&str>) -> Result<Vec<RemoteImage>, ApiError> {
        let endpoint = match project_id {
            Some(id) => format!("/images?project_id={}", urlencoding::encode(id)),
            None => "/images".to_string(),
        };
        let envelope: ApiEnvelope<Vec<RemoteImage>> = self.get(&endpoint)?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn get_image(&self, id: &str) -> Result<RemoteImage, ApiError> {
        self.get(&format!("/images/{}", id))?
            .into_data("Failed to get image")
    }

    pub fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.delete::<serde_json::Value>(&format!("/images/{}", id))?
            .into_unit()
    }

    /// GET /images/{id}/download, returning the raw bytes.
    pub fn download_image(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/images/{}/download", self.base_url, id);
        let request = self.authorized(ureq::get(&url));
        match request.call() {
            Ok(response) => {
                let mut bytes = Vec::new();
                use std::io::Read as _;
                response
                    .into_reader()
                    .read_to_end(&mut bytes)
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                Ok(bytes)
            }
            Err(e) => Err(classify(e)),
        }
    }

    // ==================== Server-side generation ====================

    /// POST /generate/image: the backend drives the provider itself and
    /// records the result under the request's project.
    pub fn generate_image(
        &self,
        request: &RemoteGenerationRequest,
    ) -> Result<RemoteGeneration, ApiError> {
        self.post("/generate/image", request)?
            .into_data("Failed to generate image")
    }

    pub fn generate_batch(
        &self,
        prompts: &[String],
        model: Option<&str>,
        size: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<RemoteGeneration, ApiError> {
        let body = json!({
            "prompts": prompts,
            "model": model,
            "size": size,
            "project_id": project_id,
        });
        self.post("/generate/batch", &body)?
            .into_data("Failed to generate batch images")
    }

    pub fn edit_image(
        &self,
        image: &str,
        prompt: &str,
        model: Option<&str>,
        size: Option<&str>,
        mask: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<RemoteGeneration, ApiError> {
        let body = json!({
            "image": image,
            "prompt": prompt,
            "model": model,
            "size": size,
            "mask": mask,
            "project_id": project_id,
        });
        self.post("/generate/edit", &body)?
            .into_data("Failed to edit image")
    }

    // ==================== HTTP plumbing ====================

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        let request = request.timeout(Duration::from_secs(BACKEND_TIMEOUT_SECS));
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let request = self.authorized(ureq::get(&url));
        read_envelope(request.call())
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let request = self
            .authorized(ureq::post(&url))
            .set("Content-Type", "application/json");
        read_envelope(request.send_json(body))
    }

    fn put<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "PUT");
        let request = self
            .authorized(ureq::put(&url))
            .set("Content-Type", "application/json");
        read_envelope(request.send_json(body))
    }

    fn delete<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "DELETE");
        let request = self.authorized(ureq::delete(&url));
        read_envelope(request.call())
    }
}

fn read_envelope<T: serde::de::DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ApiEnvelope<T>, ApiError> {
    match result {
        Ok(response) => response
            .into_json::<ApiEnvelope<T>>()
            .map_err(|e| ApiError::Malformed(e.to_string())),
        Err(e) => Err(classify(e)),
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

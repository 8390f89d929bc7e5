//! HTTP clients for the hosted image API and the optional companion backend.
//!
//! Both clients are blocking and run on background workers. `generation`
//! talks to the image service (bearer key from the credential store),
//! `backend` to the project/auth service (bearer session token), and
//! `error` carries the classification the UI needs to route failures.

mod backend;
mod error;
mod generation;
pub mod models;

pub use backend::BackendClient;
pub use error::ApiError;
pub use generation::GenerationClient;

/// Hosted image API.
pub const DEFAULT_IMAGE_API_URL: &str = "https://api.qnaigc.com/v1";

/// Companion backend, off by default unless running locally.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/v1";

/// Deterministic placeholder used when a whole generation branch fails,
/// so the pipeline always resolves to something visible.
pub fn mock_image_url(prompt: &str) -> String {
    format!(
        "https://trae-api-sg.mchost.guru/api/ide/v1/text_to_image?prompt={}&image_size=square",
        urlencoding::encode(prompt)
    )
}

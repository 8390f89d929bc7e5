//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder pattern for creating boards pre-seeded with images
//! - `MockApi` - A scripted local HTTP server for exercising the API clients
//! - Assertion helpers and common fixtures

use promptboard::background::BackgroundExecutor;
use promptboard::board::Board;
use promptboard::types::{CanvasImage, ImageOrigin, ViewMode};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tiny_http::{Header, Response, Server, StatusCode};

// ============================================================================
// TestBoardBuilder - Builder pattern for creating boards
// ============================================================================

/// Builder for creating boards pre-seeded with generated images.
///
/// # Example
/// ```ignore
/// let board = TestBoardBuilder::new()
///     .with_images(3)
///     .with_view_mode(ViewMode::FreeForm)
///     .build();
/// ```
pub struct TestBoardBuilder {
    image_count: usize,
    view_mode: ViewMode,
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            image_count: 0,
            view_mode: ViewMode::Grid,
        }
    }

    /// Seed the board with `count` images prompted "prompt 1".."prompt N".
    pub fn with_images(mut self, count: usize) -> Self {
        self.image_count = count;
        self
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    pub fn build(self) -> Board {
        let mut board = Board::new();
        board.set_view_mode(self.view_mode);
        for index in 0..self.image_count {
            let id = board.next_image_id();
            let mut image = test_image(id);
            image.prompt = format!("prompt {}", index + 1);
            board.add_image(image);
        }
        board
    }
}

// ============================================================================
// Free-standing helpers
// ============================================================================

/// Create a canvas image with a deterministic path and prompt.
pub fn test_image(id: u64) -> CanvasImage {
    CanvasImage::new(
        id,
        PathBuf::from(format!("/tmp/promptboard-test/{id}.png")),
        ImageOrigin::Inline,
        format!("test prompt {id}"),
        "test-model".to_string(),
    )
}

/// Create a board holding `count` images in the default view mode.
pub fn board_with_images(count: usize) -> Board {
    TestBoardBuilder::new().with_images(count).build()
}

/// Pump `executor.process_results()` until the condition holds or the
/// timeout elapses. Polling beats sleeping here: the check is cheap and
/// returns as soon as the callback has run.
pub fn wait_for_completion<F>(
    executor: &BackgroundExecutor,
    mut condition: F,
    timeout: Duration,
) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        executor.process_results();
        if condition() {
            return true;
        }
        thread::yield_now();
    }
    executor.process_results();
    condition()
}

// ============================================================================
// Mock HTTP server
// ============================================================================

/// One scripted reply for [`MockApi::serve`].
pub struct CannedResponse {
    status: u16,
    body: String,
}

/// A JSON reply with the given status code.
pub fn json(status: u16, body: &str) -> CannedResponse {
    CannedResponse {
        status,
        body: body.to_string(),
    }
}

/// What the mock server saw for one request.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Local HTTP server that answers requests from a fixed script, in order,
/// and records what it was asked. The serving thread exits after the last
/// scripted reply, so a test must not send more requests than it scripted.
pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    pub fn serve(responses: Vec<CannedResponse>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("mock server has an IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for canned in responses {
                let Ok(mut request) = server.recv() else {
                    break;
                };

                let mut body = String::new();
                let _ = std::io::Read::read_to_string(request.as_reader(), &mut body);
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                recorded.lock().unwrap().push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    body,
                });

                let mut response = Response::from_string(canned.body)
                    .with_status_code(StatusCode(canned.status));
                if let Ok(header) =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                {
                    response = response.with_header(header);
                }
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Everything the server has answered so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert that a board holds a specific number of images.
pub fn assert_image_count(board: &Board, expected: usize) {
    assert_eq!(
        board.count(),
        expected,
        "Expected {} images, found {}",
        expected,
        board.count()
    );
}

/// Assert that an image sits at the expected position.
pub fn assert_image_position(board: &Board, id: u64, expected: (f32, f32)) {
    let image = board.image(id);
    assert!(image.is_some(), "Image {} not found", id);
    let image = image.unwrap();
    assert_eq!(
        image.position, expected,
        "Image {} at {:?}, expected {:?}",
        id, image.position, expected
    );
}

// ============================================================================
// The helpers are load-bearing for every suite, so they get checks too
// ============================================================================

#[cfg(test)]
mod self_tests {
    use super::*;

    #[test]
    fn test_board_builder_seeds_images() {
        let board = TestBoardBuilder::new().with_images(3).build();
        assert_image_count(&board, 3);
        assert_eq!(board.images()[0].prompt, "prompt 1");
        assert_eq!(board.images()[2].prompt, "prompt 3");
    }

    #[test]
    fn test_board_builder_view_mode() {
        let board = TestBoardBuilder::new()
            .with_images(1)
            .with_view_mode(ViewMode::FreeForm)
            .build();
        assert_eq!(board.view_mode, ViewMode::FreeForm);
    }

    #[test]
    fn test_mock_api_records_requests() {
        let api = MockApi::serve(vec![json(200, "{}")]);
        let response = ureq::get(&format!("{}/ping", api.base_url))
            .set("Authorization", "Bearer abc")
            .call()
            .expect("mock server reachable");
        assert_eq!(response.status(), 200);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "/ping");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc"));
    }
}

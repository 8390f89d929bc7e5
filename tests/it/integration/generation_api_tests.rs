//! Generation & Backend API Integration Tests
//!
//! Both clients run against a local scripted HTTP server, covering the
//! full request/response path without touching the real services.

use crate::helpers::{json, MockApi};
use promptboard::api::models::{ImageSize, RemoteGenerationRequest, TEXT_TO_IMAGE};
use promptboard::api::{ApiError, BackendClient, GenerationClient};

fn keyed_client(api: &MockApi) -> GenerationClient {
    GenerationClient::with_base_url(api.base_url.clone(), Some("test-key".to_string()))
}

// ============================================================================
// Generation client
// ============================================================================

#[test]
fn test_generate_image_success() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"images":[{"url":"https://cdn.example/img.png"}],"created":123,"model":"remote-model"}"#,
    )]);
    let client = keyed_client(&api);

    let response = client
        .generate_image("a red fox", TEXT_TO_IMAGE, ImageSize::Square)
        .unwrap();

    assert_eq!(response.images.len(), 1);
    assert_eq!(
        response.images[0].reference(),
        Some("https://cdn.example/img.png")
    );
    assert_eq!(response.created, 123);
    assert_eq!(response.model, "remote-model");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/images/generations");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-key"));
    assert!(requests[0].body.contains(r#""prompt":"a red fox""#));
    assert!(requests[0].body.contains(r#""response_format":"url""#));
}

#[test]
fn test_generate_image_data_key_fallback() {
    // Some deployments answer with `data` instead of `images`.
    let api = MockApi::serve(vec![json(200, r#"{"data":[{"b64_json":"QUJD"}]}"#)]);
    let client = keyed_client(&api);

    let response = client
        .generate_image("a red fox", TEXT_TO_IMAGE, ImageSize::Square)
        .unwrap();

    assert_eq!(response.images.len(), 1);
    assert_eq!(response.images[0].reference(), Some("QUJD"));
    // Missing model in the body falls back to the requested one.
    assert_eq!(response.model, TEXT_TO_IMAGE);
}

#[test]
fn test_server_error_carries_message() {
    let api = MockApi::serve(vec![json(
        500,
        r#"{"error":{"message":"model overloaded"}}"#,
    )]);
    let client = keyed_client(&api);

    let error = client
        .generate_image("a red fox", TEXT_TO_IMAGE, ImageSize::Square)
        .unwrap_err();

    assert_eq!(error.to_string(), "API Error: model overloaded");
    assert!(!error.is_auth());
}

#[test]
fn test_unauthorized_classifies_as_auth() {
    let api = MockApi::serve(vec![json(401, r#"{"error":"invalid api key"}"#)]);
    let client = keyed_client(&api);

    let error = client
        .generate_image("a red fox", TEXT_TO_IMAGE, ImageSize::Square)
        .unwrap_err();
    assert!(error.is_auth());
}

#[test]
fn test_missing_key_sends_no_request() {
    let api = MockApi::serve(vec![]);
    let client = GenerationClient::with_base_url(api.base_url.clone(), None);

    let error = client
        .generate_image("a red fox", TEXT_TO_IMAGE, ImageSize::Square)
        .unwrap_err();

    assert!(matches!(error, ApiError::MissingKey));
    assert_eq!(api.request_count(), 0);
}

#[test]
fn test_generate_batch_keeps_failed_slots() {
    let api = MockApi::serve(vec![
        json(200, r#"{"images":[{"url":"https://cdn.example/a.png"}]}"#),
        json(500, r#"{"error":"boom"}"#),
    ]);
    let client = keyed_client(&api);

    let prompts = vec!["scene one".to_string(), "scene two".to_string()];
    let results = client.generate_batch(&prompts, TEXT_TO_IMAGE, ImageSize::Square);

    assert_eq!(
        results,
        vec!["https://cdn.example/a.png".to_string(), String::new()]
    );
    assert_eq!(api.request_count(), 2);
}

#[test]
fn test_edit_image_posts_to_edits() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"images":[{"url":"https://cdn.example/b.png"}]}"#,
    )]);
    let client = keyed_client(&api);

    let response = client
        .edit_image(
            "data:image/png;base64,AAAA",
            "make it night",
            TEXT_TO_IMAGE,
            ImageSize::Square,
        )
        .unwrap();
    assert_eq!(response.images.len(), 1);

    let requests = api.requests();
    assert_eq!(requests[0].url, "/images/edits");
    assert!(requests[0]
        .body
        .contains(r#""image":"data:image/png;base64,AAAA""#));
    assert!(!requests[0].body.contains(r#""mask""#));
}

#[test]
fn test_list_models() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"data":[{"id":"gemini-2.5-flash-image","owned_by":"google"},{"id":"kling-v2"}]}"#,
    )]);
    let client = keyed_client(&api);

    let models = client.list_models().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].id, "gemini-2.5-flash-image");
    assert_eq!(models[1].owned_by, None);

    let requests = api.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/models");
}

// ============================================================================
// Backend client
// ============================================================================

#[test]
fn test_user_profile_success() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"success":true,"data":{"id":"u1","email":"lion@example.com","username":"lion"}}"#,
    )]);
    let backend =
        BackendClient::with_base_url(api.base_url.clone(), Some("session-token".to_string()));

    let user = backend.user_profile().unwrap();
    assert_eq!(user.username, "lion");
    assert_eq!(user.avatar, None);

    let requests = api.requests();
    assert_eq!(requests[0].url, "/user/profile");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer session-token")
    );
}

#[test]
fn test_rejected_envelope_surfaces_server_text() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"success":false,"error":"session expired"}"#,
    )]);
    let backend = BackendClient::with_base_url(api.base_url.clone(), Some("stale".to_string()));

    let error = backend.user_profile().unwrap_err();
    assert_eq!(error.to_string(), "session expired");
    assert!(matches!(error, ApiError::Rejected { .. }));
}

#[test]
fn test_list_projects_tolerates_missing_data() {
    let api = MockApi::serve(vec![json(200, r#"{"success":true}"#)]);
    let backend = BackendClient::with_base_url(api.base_url.clone(), Some("t".to_string()));

    let projects = backend.list_projects().unwrap();
    assert!(projects.is_empty());
}

#[test]
fn test_login_adopts_token() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"success":true,"data":{"token":"fresh-token","user":{"id":"u1","email":"lion@example.com","username":"lion"}}}"#,
    )]);
    let mut backend = BackendClient::with_base_url(api.base_url.clone(), None);
    assert!(!backend.is_authenticated());

    let auth = backend.login("lion@example.com", "hunter2").unwrap();
    assert_eq!(auth.token, "fresh-token");
    assert!(backend.is_authenticated());

    let requests = api.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/auth/login");
    // Login is the one call that goes out without a bearer token.
    assert_eq!(requests[0].authorization, None);
}

#[test]
fn test_backend_generate_image_round_trip() {
    let api = MockApi::serve(vec![json(
        200,
        r#"{"success":true,"data":{"success":true,"images":["https://cdn.example/srv.png"],"message":"generated"}}"#,
    )]);
    let backend = BackendClient::with_base_url(api.base_url.clone(), Some("t".to_string()));

    let request = RemoteGenerationRequest {
        prompt: "a red fox".to_string(),
        model: Some(TEXT_TO_IMAGE.to_string()),
        project_id: Some("p1".to_string()),
        ..Default::default()
    };
    let result = backend.generate_image(&request).unwrap();
    assert!(result.success);
    assert_eq!(result.images, vec!["https://cdn.example/srv.png".to_string()]);

    let requests = api.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/generate/image");
    assert!(requests[0].body.contains(r#""project_id":"p1""#));
    // Unset optionals stay off the wire entirely.
    assert!(!requests[0].body.contains("size"));
}

#[test]
fn test_backend_batch_rejection_uses_fallback_text() {
    let api = MockApi::serve(vec![json(200, r#"{"success":false}"#)]);
    let backend = BackendClient::with_base_url(api.base_url.clone(), Some("t".to_string()));

    let prompts = vec!["one".to_string(), "two".to_string()];
    let error = backend
        .generate_batch(&prompts, None, None, Some("p1"))
        .unwrap_err();
    assert_eq!(error.to_string(), "Failed to generate batch images");

    let requests = api.requests();
    assert_eq!(requests[0].url, "/generate/batch");
    assert!(requests[0].body.contains(r#""prompts":["one","two"]"#));
}

#[test]
fn test_backend_unauthorized_is_auth() {
    let api = MockApi::serve(vec![json(401, r#"{"error":"invalid token"}"#)]);
    let backend = BackendClient::with_base_url(api.base_url.clone(), Some("bad".to_string()));

    let error = backend.user_profile().unwrap_err();
    assert!(error.is_auth());
}

//! Generation Pipeline Integration Tests
//!
//! Drives `run_branch` end to end: the API client against a scripted
//! server, and the image cache against a temp directory. Inline base64
//! responses keep the happy paths fully local.

use crate::helpers::{json, CannedResponse, MockApi};
use promptboard::api::GenerationClient;
use promptboard::api::models::{ImageSize, IMAGE_TO_IMAGE, KLING_V2, TEXT_TO_IMAGE};
use promptboard::app::{run_branch, PipelineBranch};
use promptboard::image_cache::ImageCache;
use promptboard::types::ImageOrigin;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fs;
use tempfile::tempdir;

fn keyed_client(api: &MockApi) -> GenerationClient {
    GenerationClient::with_base_url(api.base_url.clone(), Some("test-key".to_string()))
}

fn b64_response(payload: &[u8]) -> CannedResponse {
    json(
        200,
        &format!(r#"{{"data":[{{"b64_json":"{}"}}]}}"#, BASE64.encode(payload)),
    )
}

#[test]
fn test_text_branch_materializes_inline_image() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let api = MockApi::serve(vec![b64_response(b"not really a png")]);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Text,
        "a red fox",
        TEXT_TO_IMAGE,
        ImageSize::Square,
        None,
    );

    assert_eq!(event.prompt, "a red fox");
    assert_eq!(event.model, TEXT_TO_IMAGE);
    assert!(!event.used_fallback);
    assert!(event.error.is_none());
    assert_eq!(event.failed_scenes, 0);

    assert_eq!(event.images.len(), 1);
    let image = &event.images[0];
    assert_eq!(image.origin, ImageOrigin::Inline);
    assert_eq!(image.prompt, "a red fox");
    assert!(image.path.starts_with(dir.path()));
    assert_eq!(fs::read(&image.path).unwrap(), b"not really a png");
}

#[test]
fn test_text_branch_failure_reports_error_and_fallback() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let api = MockApi::serve(vec![json(500, r#"{"error":"boom"}"#)]);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Text,
        "a red fox",
        TEXT_TO_IMAGE,
        ImageSize::Square,
        None,
    );

    // The placeholder is a remote URL, so whether an image materializes
    // depends on the network; the failure report does not.
    assert!(event.used_fallback);
    let error = event.error.expect("API failure must ride along");
    assert_eq!(error.message, "API Error: boom");
    assert!(!error.auth);
    assert!(event.images.len() <= 1);
}

#[test]
fn test_text_branch_auth_failure_is_flagged() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let api = MockApi::serve(vec![json(401, r#"{"error":"invalid api key"}"#)]);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Text,
        "a red fox",
        TEXT_TO_IMAGE,
        ImageSize::Square,
        None,
    );

    assert!(event.used_fallback);
    assert!(event.error.expect("auth failure must ride along").auth);
}

#[test]
fn test_edit_branch_overrides_model() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let api = MockApi::serve(vec![b64_response(b"edited bytes")]);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Edit {
            reference: "data:image/png;base64,AAAA".to_string(),
        },
        "make it night",
        KLING_V2,
        ImageSize::Square,
        None,
    );

    // Editing always goes through the image-to-image model, whatever the
    // selector said.
    assert_eq!(event.model, IMAGE_TO_IMAGE);
    assert_eq!(event.images.len(), 1);

    let requests = api.requests();
    assert_eq!(requests[0].url, "/images/edits");
    assert!(requests[0].body.contains(IMAGE_TO_IMAGE));
    assert!(!requests[0].body.contains(KLING_V2));
}

#[test]
fn test_storyboard_generates_five_scenes() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let responses = (1..=5)
        .map(|scene| b64_response(format!("scene {}", scene).as_bytes()))
        .collect();
    let api = MockApi::serve(responses);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Storyboard,
        "Mixtape memories",
        TEXT_TO_IMAGE,
        ImageSize::Square,
        Some("storyboard".to_string()),
    );

    assert_eq!(event.images.len(), 5);
    assert_eq!(event.failed_scenes, 0);
    assert!(!event.used_fallback);
    assert!(event.error.is_none());
    assert_eq!(event.prompt, "Mixtape memories");
    assert_eq!(event.template.as_deref(), Some("storyboard"));

    // Scene prompts ride on the materialized images in order.
    assert!(event.images[0].prompt.contains("Scene 1"));
    assert!(event.images[4].prompt.contains("Scene 5"));

    // One request per scene, each with its own prompt.
    let requests = api.requests();
    assert_eq!(requests.len(), 5);
    assert!(requests[2].body.contains("Scene 3"));
}

#[test]
fn test_storyboard_partial_failure_counts_scenes() {
    let dir = tempdir().unwrap();
    let cache = ImageCache::with_dir(dir.path().to_path_buf()).unwrap();
    let responses = vec![
        b64_response(b"scene 1"),
        b64_response(b"scene 2"),
        json(500, r#"{"error":"boom"}"#),
        b64_response(b"scene 4"),
        b64_response(b"scene 5"),
    ];
    let api = MockApi::serve(responses);
    let client = keyed_client(&api);

    let event = run_branch(
        &client,
        &cache,
        PipelineBranch::Storyboard,
        "Mixtape memories",
        TEXT_TO_IMAGE,
        ImageSize::Square,
        Some("storyboard".to_string()),
    );

    assert_eq!(event.images.len(), 4);
    assert_eq!(event.failed_scenes, 1);
    assert!(!event.used_fallback);
    assert!(event.error.is_none());

    // The failed scene is the missing one.
    assert!(event.images.iter().all(|i| !i.prompt.contains("Scene 3")));
}

//! Snapshot tests using the insta crate.
//!
//! These pin the exact wire and disk formats: the settings file, the
//! encrypted credential payload, and the request bodies the generation
//! API receives. Snapshots are stored inline so a diff shows the format
//! change right next to the test.
//!
//! After an intentional format change, `cargo insta test --accept`
//! rewrites them in place.

use promptboard::api::mock_image_url;
use promptboard::api::models::{
    EditRequest, GenerationRequest, ImageConfig, ImageSize, TEXT_TO_IMAGE,
};
use promptboard::app::storyboard_prompts;
use promptboard::crypto::{encrypt, encrypt_with, CipherMethod};
use promptboard::settings::Settings;
use promptboard::types::Template;

// ============================================================================
// Settings file format
// ============================================================================

#[test]
fn snapshot_settings_default() {
    let settings = Settings::default();
    insta::assert_json_snapshot!(settings, @r#"
    {
      "theme": "system",
      "reduce_motion": false,
      "default_model": "gemini-2.5-flash-image",
      "default_size": "square",
      "snap_to_edges": true,
      "image_api_url": "https://api.qnaigc.com/v1",
      "backend_url": "http://localhost:8080/api/v1"
    }
    "#);
}

// ============================================================================
// Encrypted credential payload
// ============================================================================

#[test]
fn snapshot_encrypted_payload() {
    // iv, salt and ciphertext are random per encryption; redact them and
    // pin the envelope.
    let payload = encrypt("sk-test-123").unwrap();
    insta::assert_json_snapshot!(payload, {
        ".iv" => "[iv]",
        ".salt" => "[salt]",
        ".ciphertext" => "[ciphertext]"
    }, @r#"
    {
      "v": 2,
      "method": "aes-gcm",
      "iv": "[iv]",
      "salt": "[salt]",
      "ciphertext": "[ciphertext]"
    }
    "#);
}

#[test]
fn snapshot_encrypted_payload_legacy_rc4() {
    // RC4 payloads carry no iv field at all.
    let payload = encrypt_with("sk-test-123", CipherMethod::Rc4).unwrap();
    insta::assert_json_snapshot!(payload, {
        ".salt" => "[salt]",
        ".ciphertext" => "[ciphertext]"
    }, @r#"
    {
      "v": 2,
      "method": "rc4",
      "salt": "[salt]",
      "ciphertext": "[ciphertext]"
    }
    "#);
}

// ============================================================================
// Generation API request bodies
// ============================================================================

#[test]
fn snapshot_generation_request() {
    let request = GenerationRequest {
        model: TEXT_TO_IMAGE.to_string(),
        prompt: "A bold promotional poster".to_string(),
        n: 1,
        size: ImageSize::Square.as_str().to_string(),
        image_config: ImageConfig::for_size(ImageSize::Square),
        response_format: "url".to_string(),
    };
    insta::assert_json_snapshot!(request, @r#"
    {
      "model": "gemini-2.5-flash-image",
      "prompt": "A bold promotional poster",
      "n": 1,
      "size": "1024x1024",
      "image_config": {
        "aspect_ratio": "1:1",
        "image_size": "1024x1024"
      },
      "response_format": "url"
    }
    "#);
}

#[test]
fn snapshot_edit_request_omits_mask() {
    let request = EditRequest {
        model: TEXT_TO_IMAGE.to_string(),
        image: "data:image/png;base64,AAAA".to_string(),
        prompt: "Make it night time".to_string(),
        n: 1,
        size: ImageSize::Landscape.as_str().to_string(),
        mask: None,
        image_config: ImageConfig::for_size(ImageSize::Landscape),
    };
    insta::assert_json_snapshot!(request, @r#"
    {
      "model": "gemini-2.5-flash-image",
      "image": "data:image/png;base64,AAAA",
      "prompt": "Make it night time",
      "n": 1,
      "size": "1344x768",
      "image_config": {
        "aspect_ratio": "1:1",
        "image_size": "1344x768"
      }
    }
    "#);
}

// ============================================================================
// Derived prompt and URL strings
// ============================================================================

#[test]
fn snapshot_storyboard_prompts() {
    let output = storyboard_prompts("Mixtape memories").join("\n");
    insta::assert_snapshot!(output, @r"
    Mixtape memories - Scene 1: Opening shot with shoebox
    Mixtape memories - Scene 2: Close-up of boombox interaction
    Mixtape memories - Scene 3: Neighborhood walking scene
    Mixtape memories - Scene 4: Bus stop flashback moment
    Mixtape memories - Scene 5: College hostel contemplation
    ");
}

#[test]
fn snapshot_seed_templates() {
    let output: String = Template::seed()
        .iter()
        .map(|t| format!("{}: {} ({})", t.id, t.title, t.subtitle))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(output, @r"
    poster: Poster (Event & product posters)
    logo: Logo (Brand marks & icons)
    book: Picture book (Illustrated story pages)
    ");
}

#[test]
fn snapshot_mock_image_url_encoding() {
    let url = mock_image_url("city at night");
    insta::assert_snapshot!(url, @"https://trae-api-sg.mchost.guru/api/ide/v1/text_to_image?prompt=city%20at%20night&image_size=square");
}

mod support;

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitrin::types::content::Content;
use vitrin::types::models::GenerateImagesConfig;
use vitrin::Error;

use support::{build_studio_client, candidates_body, predictions_body};

#[tokio::test]
async fn test_generate_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_body("Merhaba")))
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    let response = client
        .models()
        .generate_content("gemini-2.5-pro", vec![Content::text("Test")])
        .await
        .unwrap();
    assert_eq!(response.text(), Some("Merhaba".to_string()));
}

#[tokio::test]
async fn test_generate_content_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    let err = client
        .models()
        .generate_content("gemini-2.5-pro", vec![Content::text("Test")])
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Api { status: 429, ref message } if message.contains("quota")
    ));
}

#[tokio::test]
async fn test_generate_content_sends_request_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .and(body_string_contains("\"contents\""))
        .and(body_string_contains("Test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    client
        .models()
        .generate_content("gemini-2.5-pro", vec![Content::text("Test")])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_generate_images_dialect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
        .and(body_partial_json(json!({
            "instances": [{"prompt": "a vase"}],
            "parameters": {
                "sampleCount": 4,
                "aspectRatio": "1:1",
                "outputOptions": {"mimeType": "image/jpeg"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(predictions_body(4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    let config = GenerateImagesConfig {
        number_of_images: Some(4),
        aspect_ratio: Some("1:1".into()),
        output_mime_type: Some("image/jpeg".into()),
        ..Default::default()
    };
    let response = client
        .models()
        .generate_images("imagen-4.0-generate-001", "a vase", config)
        .await
        .unwrap();

    assert_eq!(response.generated_images.len(), 4);
    let image = response.generated_images[0].image.as_ref().unwrap();
    assert_eq!(image.image_bytes.as_deref(), Some([1, 2, 3].as_slice()));
}

#[tokio::test]
async fn test_generate_images_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    let err = client
        .models()
        .generate_images(
            "imagen-4.0-generate-001",
            "a vase",
            GenerateImagesConfig::default(),
        )
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_generate_images_tolerates_missing_predictions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = build_studio_client(&mock_server.uri());
    let response = client
        .models()
        .generate_images(
            "imagen-4.0-generate-001",
            "a vase",
            GenerateImagesConfig::default(),
        )
        .await
        .unwrap();
    assert!(response.generated_images.is_empty());
}

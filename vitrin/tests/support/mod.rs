#![allow(dead_code)]

use serde_json::{json, Value};

use vitrin::Client;

pub fn build_studio_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

/// `generateContent` body whose single candidate carries the structured
/// analysis text the vision model returns.
pub fn analysis_body(category: &str, description: &str) -> Value {
    let payload = json!({ "category": category, "description": description }).to_string();
    candidates_body(&payload)
}

/// `generateContent` body with an arbitrary text payload.
pub fn candidates_body(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": text}
                    ]
                }
            }
        ]
    })
}

/// `predict` body with `count` JPEG predictions.
pub fn predictions_body(count: usize) -> Value {
    let predictions: Vec<Value> = (0..count)
        .map(|_| json!({"bytesBase64Encoded": "AQID", "mimeType": "image/jpeg"}))
        .collect();
    json!({ "predictions": predictions })
}

pub fn sample_upload() -> vitrin::intake::UploadedFile {
    vitrin::intake::UploadedFile::new(vec![0u8; 2 * 1024 * 1024], "image/jpeg").unwrap()
}

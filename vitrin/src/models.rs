//! Models API surface.

use std::sync::Arc;

use serde_json::{Map, Number, Value};

use vitrin_types::content::Content;
use vitrin_types::models::{
    GenerateContentConfig, GenerateContentRequest, GenerateImagesConfig, GenerateImagesResponse,
    GeneratedImage, Image,
};
use vitrin_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Generate content (default config).
    ///
    /// # Errors
    /// Returns an error when the request fails or the response cannot be
    /// decoded.
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// Generate content (custom config).
    ///
    /// # Errors
    /// Returns an error when the request fails or the response cannot be
    /// decoded.
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest {
            contents,
            system_instruction: config.system_instruction,
            generation_config: config.generation_config,
        };

        let url = build_model_method_url(&self.inner, &model, "generateContent");
        let request = self.inner.http.post(url).json(&request);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// Generate images (Imagen `predict`).
    ///
    /// # Errors
    /// Returns an error when the request fails or the response cannot be
    /// decoded.
    pub async fn generate_images(
        &self,
        model: impl Into<String>,
        prompt: impl Into<String>,
        config: GenerateImagesConfig,
    ) -> Result<GenerateImagesResponse> {
        let model = model.into();
        let prompt = prompt.into();
        let body = build_generate_images_body(&prompt, &config);
        let url = build_model_method_url(&self.inner, &model, "predict");

        let request = self.inner.http.post(url).json(&body);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let value = response.json::<Value>().await?;
        Ok(parse_generate_images_response(&value))
    }
}

fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> String {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/models/{model}:{method}")
}

fn build_generate_images_body(prompt: &str, config: &GenerateImagesConfig) -> Value {
    let mut instance = Map::new();
    instance.insert("prompt".to_string(), Value::String(prompt.to_string()));

    let mut root = Map::new();
    root.insert(
        "instances".to_string(),
        Value::Array(vec![Value::Object(instance)]),
    );

    let mut parameters = Map::new();
    let mut output_options = Map::new();

    if let Some(value) = config.number_of_images {
        parameters.insert(
            "sampleCount".to_string(),
            Value::Number(Number::from(value)),
        );
    }
    if let Some(value) = &config.aspect_ratio {
        parameters.insert("aspectRatio".to_string(), Value::String(value.clone()));
    }
    if let Some(value) = &config.image_size {
        parameters.insert("sampleImageSize".to_string(), Value::String(value.clone()));
    }
    if let Some(value) = &config.output_mime_type {
        output_options.insert("mimeType".to_string(), Value::String(value.clone()));
    }
    if let Some(value) = config.output_compression_quality {
        output_options.insert(
            "compressionQuality".to_string(),
            Value::Number(Number::from(value)),
        );
    }
    if !output_options.is_empty() {
        parameters.insert("outputOptions".to_string(), Value::Object(output_options));
    }
    if !parameters.is_empty() {
        root.insert("parameters".to_string(), Value::Object(parameters));
    }

    Value::Object(root)
}

fn parse_generate_images_response(value: &Value) -> GenerateImagesResponse {
    let predictions = value
        .get("predictions")
        .and_then(|pred| pred.as_array())
        .cloned()
        .unwrap_or_default();

    let mut generated_images = Vec::new();
    for item in predictions {
        generated_images.push(parse_generated_image(&item));
    }

    GenerateImagesResponse { generated_images }
}

fn parse_generated_image(value: &Value) -> GeneratedImage {
    let image = serde_json::from_value::<Image>(value.clone())
        .ok()
        .filter(|image| image.image_bytes.is_some() || image.mime_type.is_some());

    let rai_filtered_reason = value
        .get("raiFilteredReason")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string());

    GeneratedImage {
        image,
        rai_filtered_reason,
    }
}

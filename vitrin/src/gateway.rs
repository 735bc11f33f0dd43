//! Boundary to the remote analysis and image-generation models.

use std::future::Future;

use serde_json::Value;

use vitrin_types::analysis::ProductAnalysis;
use vitrin_types::config::GenerationConfig;
use vitrin_types::content::{Content, Part, Role};
use vitrin_types::models::{GenerateContentConfig, GenerateImagesConfig, Image};
use vitrin_types::schema::Schema;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::intake::UploadedFile;

/// Default vision model for product classification.
pub const DEFAULT_ANALYZE_MODEL: &str = "gemini-2.5-pro";
/// Default image-generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

const ANALYZE_PROMPT: &str = "Bu görseldeki ürünün kategorisini (giyim, mobilya, ev dekorasyonu, \
aksesuar, kozmetik arasından) ve kısa bir ürün açıklamasını JSON formatında \
{\"category\": \"...\", \"description\": \"...\"} olarak ver. Kategori değeri sadece belirtilen \
seçeneklerden biri olmalıdır.";

/// The two remote operations the pipeline depends on. The orchestrator is
/// generic over this seam so runs can be driven without a network.
pub trait ModelGateway: Send + Sync {
    /// Classify the uploaded photo and describe the product.
    fn analyze(
        &self,
        file: &UploadedFile,
    ) -> impl Future<Output = Result<ProductAnalysis>> + Send;

    /// Generate staged product images for a description within a scene.
    fn generate_images(
        &self,
        description: &str,
        scene: &str,
    ) -> impl Future<Output = Result<Vec<Image>>> + Send;
}

/// Gateway backed by the hosted Gemini/Imagen endpoints.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    analyze_model: String,
    image_model: String,
}

impl GeminiGateway {
    /// Create a gateway with the default model pair.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            analyze_model: DEFAULT_ANALYZE_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Override the vision model.
    #[must_use]
    pub fn analyze_model(mut self, model: impl Into<String>) -> Self {
        self.analyze_model = model.into();
        self
    }

    /// Override the image model.
    #[must_use]
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }
}

impl ModelGateway for GeminiGateway {
    async fn analyze(&self, file: &UploadedFile) -> Result<ProductAnalysis> {
        let contents = vec![Content::from_parts(
            vec![
                Part::inline_data(file.data().to_vec(), file.media_type()),
                Part::text(ANALYZE_PROMPT),
            ],
            Role::User,
        )];
        let config = GenerateContentConfig {
            generation_config: Some(GenerationConfig::json(analysis_schema())),
            ..Default::default()
        };

        let response = self
            .client
            .models()
            .generate_content_with_config(&self.analyze_model, contents, config)
            .await?;

        let text = response.text().ok_or_else(|| Error::Parse {
            message: "analysis response contained no text".into(),
        })?;
        let analysis = parse_analysis(&text)?;
        tracing::debug!(category = %analysis.category, "product analyzed");
        Ok(analysis)
    }

    async fn generate_images(&self, description: &str, scene: &str) -> Result<Vec<Image>> {
        let prompt = compose_prompt(description, scene);
        let config = GenerateImagesConfig {
            number_of_images: Some(4),
            aspect_ratio: Some("1:1".into()),
            output_mime_type: Some("image/jpeg".into()),
            ..Default::default()
        };

        let response = self
            .client
            .models()
            .generate_images(&self.image_model, &prompt, config)
            .await?;

        let images: Vec<Image> = response
            .generated_images
            .into_iter()
            .filter_map(|generated| generated.image)
            .filter(|image| image.image_bytes.is_some())
            .collect();

        if images.is_empty() {
            return Err(Error::EmptyGeneration);
        }
        tracing::debug!(count = images.len(), "product images generated");
        Ok(images)
    }
}

/// Full prompt sent to the image model: the product description staged in
/// the mapped scene, with fixed catalog-photography qualifiers.
#[must_use]
pub fn compose_prompt(description: &str, scene: &str) -> String {
    format!(
        "Profesyonel e-ticaret ürün tanıtım fotoğrafı: {description}, {scene} içinde \
         sergileniyor. Yüksek çözünürlük, fotogerçekçi, doğal ve parlak ışıklandırma, \
         e-ticaret kataloğu tarzında."
    )
}

fn analysis_schema() -> Schema {
    Schema::object()
        .property("category", Schema::string())
        .property("description", Schema::string())
        .required("category")
        .required("description")
        .build()
}

/// Decode the structured analysis text. An unparsable payload is fatal;
/// missing or empty fields fall back to defaults.
fn parse_analysis(text: &str) -> Result<ProductAnalysis> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|err| Error::Parse {
        message: format!("analysis response was not valid JSON: {err}"),
    })?;

    let category = non_empty_str(&value, "category").unwrap_or(ProductAnalysis::UNKNOWN_CATEGORY);
    let description =
        non_empty_str(&value, "description").unwrap_or(ProductAnalysis::FALLBACK_DESCRIPTION);

    Ok(ProductAnalysis {
        category: category.to_string(),
        description: description.to_string(),
    })
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_full_payload() {
        let analysis =
            parse_analysis(r#"{"category": "giyim", "description": "blue cotton shirt"}"#).unwrap();
        assert_eq!(analysis.category, "giyim");
        assert_eq!(analysis.description, "blue cotton shirt");
    }

    #[test]
    fn test_parse_analysis_missing_fields_fall_back() {
        let analysis = parse_analysis("{}").unwrap();
        assert_eq!(analysis.category, "unknown");
        assert_eq!(analysis.description, "A product");
    }

    #[test]
    fn test_parse_analysis_empty_fields_fall_back() {
        let analysis = parse_analysis(r#"{"category": "", "description": ""}"#).unwrap();
        assert_eq!(analysis.category, "unknown");
        assert_eq!(analysis.description, "A product");
    }

    #[test]
    fn test_parse_analysis_rejects_invalid_json() {
        let err = parse_analysis("category: giyim").err().unwrap();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_parse_analysis_tolerates_surrounding_whitespace() {
        let analysis = parse_analysis("\n  {\"category\": \"mobilya\"}  \n").unwrap();
        assert_eq!(analysis.category, "mobilya");
        assert_eq!(analysis.description, "A product");
    }

    #[test]
    fn test_compose_prompt_embeds_description_and_scene() {
        let prompt = compose_prompt("ahşap sandalye", "iç mekan");
        assert!(prompt.contains("ahşap sandalye"));
        assert!(prompt.contains("iç mekan"));
        assert!(prompt.starts_with("Profesyonel e-ticaret"));
    }
}

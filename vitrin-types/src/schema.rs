//! Structured-output schema fragments accepted by `generationConfig.responseSchema`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The schema data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Type {
    TypeUnspecified,
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// Constrained-decoding schema sent with a generation request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, Box<Schema>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

impl Schema {
    /// A plain string schema.
    #[must_use]
    pub fn string() -> Self {
        Self {
            ty: Some(Type::String),
            ..Self::default()
        }
    }

    /// An object schema builder.
    #[must_use]
    pub fn object() -> SchemaBuilder {
        SchemaBuilder::new(Type::Object)
    }
}

/// Builder for composite schemas.
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a builder for the given type.
    #[must_use]
    pub fn new(ty: Type) -> Self {
        Self {
            schema: Schema {
                ty: Some(ty),
                ..Schema::default()
            },
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Add a property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let properties = self.schema.properties.get_or_insert_with(HashMap::new);
        properties.insert(name.into(), Box::new(schema));
        self
    }

    /// Mark a property as required.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        let required = self.schema.required.get_or_insert_with(Vec::new);
        required.push(name.into());
        self
    }

    /// Finish the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        self.schema
    }
}

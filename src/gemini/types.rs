// Payload and responses types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// INPUT TYPES
// =============================================================================

// Binary attachment inlined as base64 text (no data URI prefix).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputBlob {
    pub mime_type: String,
    pub data: String, // Base64 string
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum InputPart {
    #[serde(rename = "text")]
    Text(String),

    #[serde(rename = "inlineData")]
    InlineData(InputBlob),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<InputPart>,
}

// Primitive kinds understood by the structured-output feature.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

// Response-shape contract attached to structured requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // BTreeMap keeps the serialized field order stable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

// Piece of response content, usually contains text.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    // Text returned by the model, if present.
    pub text: Option<String>,

    // Set on reasoning parts, which are never part of the answer.
    pub thought: Option<bool>,

    // Catch-all for any other unexpected fields.
    #[serde(flatten)]
    pub other: Value,
}

// Content wrapper in a candidate, may carry mime type or parts.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResponseContent {
    // Parts may be absent in some responses.
    pub parts: Option<Vec<ResponsePart>>,

    // Catch-all for extra content-level fields.
    #[serde(flatten)]
    pub other: Value,
}

// Candidate from the model (one of possible completions).
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<ResponseContent>,

    pub finish_reason: Option<String>,

    // Catch-all for candidate-level extras (safety, annotations, etc.).
    #[serde(flatten)]
    pub other: Value,
}

// Top-level response for generateContent.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,

    // Catch-all for other top-level fields (usage, prompt feedback, etc.).
    #[serde(flatten)]
    pub other: Value,
}

// Error envelope returned with non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

// =============================================================================
// HELPER IMPLEMENTATIONS
// =============================================================================

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content {
            parts: vec![InputPart::Text(text.into())],
        }
    }
}

impl Schema {
    pub fn string() -> Self {
        Schema::of(SchemaType::String)
    }

    pub fn integer() -> Self {
        Schema::of(SchemaType::Integer)
    }

    pub fn array_of(items: Schema) -> Self {
        Schema {
            items: Some(Box::new(items)),
            ..Schema::of(SchemaType::Array)
        }
    }

    // Object schema; every listed field name is also marked as required.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let properties: BTreeMap<String, Schema> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let required = properties.keys().cloned().collect();
        Schema {
            properties: Some(properties),
            required: Some(required),
            ..Schema::of(SchemaType::Object)
        }
    }

    pub fn with_required<I, K>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.required = Some(required.into_iter().map(Into::into).collect());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn of(schema_type: SchemaType) -> Self {
        Schema {
            schema_type,
            description: None,
            properties: None,
            required: None,
            items: None,
        }
    }
}

impl GenerateContentResponse {
    // Concatenated answer text of the first candidate, thought parts excluded.
    pub fn text(&self) -> Option<String> {
        let parts = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?;

        let texts: Vec<&str> = parts
            .iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.as_deref())
    }
}

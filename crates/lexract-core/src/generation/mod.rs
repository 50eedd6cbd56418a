pub mod gemini;

use crate::error::GenerationError;
use serde_json::Value;

pub const JSON_MIME_TYPE: &str = "application/json";

/// One schema-constrained generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_mime_type: String,
    /// Normalized, reference-free JSON Schema the output must follow.
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn json(prompt: String, response_schema: Value) -> Self {
        Self {
            prompt,
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema,
        }
    }
}

/// A large-language-model API that returns text for a prompt and schema.
pub trait GenerationService: Send + Sync {
    /// Run the request once and return the raw response text.
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Model identifier (for diagnostics).
    fn model_name(&self) -> &str;
}

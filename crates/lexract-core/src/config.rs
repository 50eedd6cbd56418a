use crate::model::RecordShape;

pub const DEFAULT_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on document characters sent to the generation service.
/// Anything past it is dropped, not summarized.
pub const MAX_INPUT_CHARS: usize = 100_000;

/// Settings for one analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub model: String,
    /// Base URL of the generation API, without trailing slash.
    pub endpoint: String,
    pub shape: RecordShape,
    pub max_input_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            shape: RecordShape::default(),
            max_input_chars: MAX_INPUT_CHARS,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_shape(mut self, shape: RecordShape) -> Self {
        self.shape = shape;
        self
    }
}

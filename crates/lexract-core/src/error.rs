/// Failure to turn PDF bytes into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Error reading PDF: {0}")]
    InvalidPdf(String),

    #[error("Error reading PDF: page {page_number} could not be decoded: {reason}")]
    Page { page_number: u32, reason: String },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("Error reading PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// The record schema and the normalizer disagree. Not recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema reference '{reference}' does not resolve to an entry in $defs")]
    UnresolvedReference { reference: String },

    #[error("schema reference '{reference}' is recursive and cannot be inlined")]
    RecursiveReference { reference: String },
}

/// Failure talking to the generation service.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("service returned no text: {reason}")]
    EmptyResponse { reason: String },

    #[error("could not decode service response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure between the input text and a validated record.
///
/// Every stage of the pipeline collapses into this one type; the variant
/// only records where the cause came from.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("analysis failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("analysis failed: response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("analysis failed: response does not match the record schema: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("no API key provided. Pass --api-key or set GEMINI_API_KEY (or GOOGLE_API_KEY)")]
    MissingCredential,
}

#[derive(Debug, thiserror::Error)]
pub enum LexractError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use clap::Args;
use lexract_core::config::{AnalyzerConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use lexract_core::credential::Credential;
use lexract_core::error::{AnalysisError, LexractError};
use lexract_core::extraction;
use lexract_core::generation::gemini::GeminiClient;
use lexract_core::model::RecordShape;
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to PDF file
    input_file: PathBuf,

    /// Gemini API key (default: $GEMINI_API_KEY, then $GOOGLE_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "LEXRACT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "LEXRACT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Record shape to request: structured (item lists) or narrative (summaries)
    #[arg(long, default_value = "structured")]
    shape: RecordShape,

    /// Text extraction backend
    #[arg(long, default_value = "lopdf", value_parser = ["lopdf", "pdftotext"])]
    backend: String,

    #[command(flatten)]
    render: output::RenderOptions,
}

pub fn run(args: AnalyzeArgs) -> Result<(), LexractError> {
    let credential = Credential::resolve(args.api_key.as_deref())?;
    let extractor = extraction::backend(&args.backend).ok_or_else(|| {
        LexractError::InvalidArgument(format!(
            "unknown backend '{}'. Available: {}",
            args.backend,
            extraction::BACKENDS.join(", ")
        ))
    })?;

    let config = AnalyzerConfig::default()
        .with_model(args.model)
        .with_endpoint(args.endpoint)
        .with_shape(args.shape);
    tracing::info!(
        model = %config.model,
        endpoint = %config.endpoint,
        shape = %config.shape,
        backend = extractor.backend_name(),
        "analysis configured"
    );

    let pdf_bytes = std::fs::read(&args.input_file)?;
    let client = GeminiClient::new(credential, &config).map_err(AnalysisError::from)?;

    eprintln!(
        "Extracting text and analyzing {} with {}...",
        args.input_file.display(),
        config.model
    );
    let result = lexract_core::analyze_pdf(&pdf_bytes, extractor.as_ref(), &client, &config)?;
    eprintln!(
        "Extracted {} characters from the PDF.",
        result.extracted_chars
    );
    if result.extracted_chars > config.max_input_chars {
        eprintln!(
            "  warning: only the first {} characters were analyzed",
            config.max_input_chars
        );
    }

    output::emit(&result.record, &args.render)
}

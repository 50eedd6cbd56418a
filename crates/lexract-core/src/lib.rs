pub mod analyze;
pub mod config;
pub mod credential;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod model;
pub mod schema;

use analyze::Analyzer;
use config::AnalyzerConfig;
use credential::Credential;
use error::{AnalysisError, LexractError};
use extraction::PdfExtractor;
use generation::gemini::GeminiClient;
use generation::GenerationService;
use model::LegalRecord;

/// Outcome of running the full pipeline on one PDF.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Characters of text extracted from the PDF, before truncation.
    pub extracted_chars: usize,
    pub record: LegalRecord,
}

/// Analyze document text with the Gemini API.
///
/// Builds a client for `config.model` with `credential` for this one call.
pub fn analyze_document(
    text: &str,
    credential: &Credential,
    config: &AnalyzerConfig,
) -> Result<LegalRecord, AnalysisError> {
    let client = GeminiClient::new(credential.clone(), config)?;
    Analyzer::from_config(&client, config).analyze(text)
}

/// Main API entry point: extract a PDF's text and analyze it.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    service: &dyn GenerationService,
    config: &AnalyzerConfig,
) -> Result<DocumentAnalysis, LexractError> {
    let text = extraction::extract_text(pdf_bytes, extractor)?;
    let extracted_chars = text.chars().count();

    let record = Analyzer::from_config(service, config).analyze(&text)?;

    Ok(DocumentAnalysis {
        extracted_chars,
        record,
    })
}

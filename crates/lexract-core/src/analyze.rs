use crate::config::{AnalyzerConfig, MAX_INPUT_CHARS};
use crate::error::AnalysisError;
use crate::generation::{GenerationRequest, GenerationService};
use crate::model::{LegalRecord, RecordShape};
use crate::schema::{normalize, record_schema};
use tracing::{debug, info};

/// Runs the schema-constrained extraction against one generation service.
pub struct Analyzer<'a> {
    service: &'a dyn GenerationService,
    shape: RecordShape,
    max_input_chars: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new(service: &'a dyn GenerationService, shape: RecordShape) -> Self {
        Self {
            service,
            shape,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    pub fn from_config(service: &'a dyn GenerationService, config: &AnalyzerConfig) -> Self {
        Self {
            service,
            shape: config.shape,
            max_input_chars: config.max_input_chars,
        }
    }

    /// The request that [`analyze`](Self::analyze) would send for `text`.
    pub fn request(&self, text: &str) -> Result<GenerationRequest, AnalysisError> {
        let schema = normalize(&record_schema(self.shape))?;

        let document = truncate_chars(text, self.max_input_chars);
        if document.len() < text.len() {
            debug!(
                limit = self.max_input_chars,
                dropped_bytes = text.len() - document.len(),
                "document text truncated"
            );
        }

        Ok(GenerationRequest::json(
            build_prompt(document, self.shape),
            schema.to_value(),
        ))
    }

    /// Extract a record from document text with a single generation call.
    ///
    /// Any failure, from schema normalization to validation, aborts the
    /// whole analysis; no partial record is produced.
    pub fn analyze(&self, text: &str) -> Result<LegalRecord, AnalysisError> {
        let request = self.request(text)?;

        info!(
            model = self.service.model_name(),
            shape = %self.shape,
            "analyzing document"
        );
        let raw = self.service.generate(&request)?;
        let record = LegalRecord::from_json(&raw, self.shape)?;

        info!(
            title = record.document_title(),
            definitions = record.definitions().len(),
            sections = record.sections().len(),
            "analysis complete"
        );
        Ok(record)
    }
}

/// The first `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The instruction prompt for `shape` around the (already truncated) document.
pub fn build_prompt(document: &str, shape: RecordShape) -> String {
    let focus = match shape {
        RecordShape::Structured => STRUCTURED_FOCUS,
        RecordShape::Narrative => NARRATIVE_FOCUS,
    };
    format!(
        "You are an expert legal analyst AI. Your task is to analyze the provided legal document text \
and extract structured information according to the schema.\n\
\n\
Focus on:\n\
{focus}\n\
\n\
Write the executive summary as Markdown bullet points that start with a hyphen (\"- \"). \
Do not use HTML tags or markup anywhere in the output.\n\
Leave a field empty rather than guessing when the document does not cover it.\n\
Be precise and extract information exactly as stated in the text.\n\
\n\
Document Text:\n\
{document}\n"
    )
}

const STRUCTURED_FOCUS: &str = "\
1. Definitions: Extract key terms and their definitions.
2. Legislative Sections: Identify main sections, their titles, and summaries, including the obligations they impose.
3. Eligibility Criteria: Extract specific criteria for eligibility.
4. Payment/Entitlements: Identify what payments or entitlements are described and their conditions.
5. Record Keeping: Extract any requirements for keeping records or reporting.
6. Penalties: Where the document sets penalties or enforcement measures, capture them in the relevant section summaries.
7. Executive Summary: Generate 5-10 bullet points summarizing the entire Act, specifically covering:
   - Purpose
   - Key definitions
   - Eligibility
   - Obligations
   - Enforcement elements";

const NARRATIVE_FOCUS: &str = "\
1. Purpose: Summarize what the Act is for.
2. Definitions: Extract key terms and their definitions.
3. Eligibility: Summarize who is eligible and under what criteria.
4. Obligations and Responsibilities: Summarize the duties imposed and who administers them.
5. Payments: Summarize payments or entitlements and their conditions.
6. Penalties: Summarize offences, penalties and enforcement, where applicable.
7. Record Keeping: Summarize record keeping and reporting requirements.
8. Executive Summary: A Markdown list of 5-10 bullet points summarizing the entire Act.";

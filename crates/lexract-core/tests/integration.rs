//! Integration tests for the analyze_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor and a MockService so these tests run without
//! real PDFs or network access. The analyze_document() test only dials a
//! closed local port.

use lexract_core::analyze::Analyzer;
use lexract_core::credential::Credential;
use lexract_core::{analyze_document, analyze_pdf};
use lexract_core::config::AnalyzerConfig;
use lexract_core::error::{AnalysisError, ExtractionError, GenerationError, LexractError};
use lexract_core::extraction::{PageContent, PdfExtractor};
use lexract_core::generation::{GenerationRequest, GenerationService};
use lexract_core::model::{RecordBody, RecordShape};
use std::sync::Mutex;

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct BrokenExtractor;

impl PdfExtractor for BrokenExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
        Err(ExtractionError::InvalidPdf("invalid file header".into()))
    }

    fn backend_name(&self) -> &str {
        "broken"
    }
}

/// Returns a canned response and remembers every request it was sent.
struct MockService {
    response: Result<String, u16>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockService {
    fn replying(json: &str) -> Self {
        Self {
            response: Ok(json.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl GenerationService for MockService {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(GenerationError::Service {
                status: *status,
                body: "API key not valid".into(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

fn page(number: u32, text: &str) -> PageContent {
    PageContent {
        page_number: number,
        text: text.to_string(),
    }
}

const HOUSING_TEXT: &str =
    "Section 1: Purpose. This Act provides housing benefits to eligible applicants over 65.";

const HOUSING_RESPONSE: &str = r#"{"document_title":"Housing Benefits Act","definitions":[],"sections":[{"section_number":"1","title":"Purpose","content_summary":"Provides housing benefits to eligible seniors."}],"eligibility":[{"criteria":"Applicant must be over 65","category":"Age"}],"entitlements":[],"record_keeping":[],"executive_summary":["Provides housing benefits to seniors over 65."]}"#;

// ---------------------------------------------------------------------------
// Test 1: End-to-end housing act
// ---------------------------------------------------------------------------
#[test]
fn housing_act_end_to_end() {
    let extractor = MockExtractor {
        pages: vec![page(1, HOUSING_TEXT)],
    };
    let service = MockService::replying(HOUSING_RESPONSE);

    let result = analyze_pdf(&[], &extractor, &service, &AnalyzerConfig::default()).unwrap();
    let record = &result.record;

    assert_eq!(record.document_title(), "Housing Benefits Act");
    assert_eq!(record.sections().len(), 1);
    assert_eq!(record.sections()[0].title, "Purpose");
    assert_eq!(record.eligibility().len(), 1);
    assert_eq!(record.eligibility()[0].category, "Age");
    assert!(record.definitions().is_empty());
    assert!(record.entitlements().is_empty());
    assert!(record.record_keeping().is_empty());
    assert_eq!(
        record.executive_summary().bullets(),
        vec!["Provides housing benefits to seniors over 65."]
    );

    // Extracted text is the page plus its trailing newline
    assert_eq!(result.extracted_chars, HOUSING_TEXT.chars().count() + 1);

    let sent = service.sent();
    assert_eq!(sent.len(), 1, "exactly one generation call");
    assert!(sent[0].prompt.contains(HOUSING_TEXT));
    assert_eq!(sent[0].response_mime_type, "application/json");
}

// ---------------------------------------------------------------------------
// Test 2: The schema sent is normalized
// ---------------------------------------------------------------------------
#[test]
fn request_schema_is_reference_free() {
    let service = MockService::replying(HOUSING_RESPONSE);
    Analyzer::new(&service, RecordShape::Structured)
        .analyze(HOUSING_TEXT)
        .unwrap();

    let schema = serde_json::to_string(&service.sent()[0].response_schema).unwrap();
    assert!(!schema.contains("$ref"));
    assert!(!schema.contains("$defs"));
    assert!(!schema.contains("\"default\""));
    assert!(schema.contains("\"section_number\""));
    assert_eq!(
        service.sent()[0].response_schema["properties"]["sections"]["items"]["properties"]
            ["title"]["type"],
        "string"
    );
}

// ---------------------------------------------------------------------------
// Test 3: Truncation at 100,000 characters
// ---------------------------------------------------------------------------
#[test]
fn prompt_contains_exactly_first_100k_chars() {
    let text = format!("{}{}", "a".repeat(100_000), "\u{2603}".repeat(50));
    let service = MockService::replying(r#"{"document_title": "Long Act"}"#);

    Analyzer::new(&service, RecordShape::Structured)
        .analyze(&text)
        .unwrap();

    let prompt = &service.sent()[0].prompt;
    assert!(prompt.contains(&"a".repeat(100_000)));
    assert!(!prompt.contains('\u{2603}'));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let text = "§".repeat(100_010);
    let service = MockService::replying(r#"{"document_title": "Act"}"#);

    Analyzer::new(&service, RecordShape::Structured)
        .analyze(&text)
        .unwrap();

    let prompt = &service.sent()[0].prompt;
    assert_eq!(prompt.matches('§').count(), 100_000);
}

// ---------------------------------------------------------------------------
// Test 4: Required field and defaults
// ---------------------------------------------------------------------------
#[test]
fn missing_title_is_analysis_error() {
    let service = MockService::replying(r#"{"definitions": [], "sections": []}"#);
    let err = Analyzer::new(&service, RecordShape::Structured)
        .analyze(HOUSING_TEXT)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(_)));
}

#[test]
fn title_only_response_gets_empty_defaults() {
    let service = MockService::replying(r#"{"document_title": "Short Act"}"#);
    let record = Analyzer::new(&service, RecordShape::Structured)
        .analyze(HOUSING_TEXT)
        .unwrap();
    assert_eq!(record.document_title(), "Short Act");
    assert!(record.sections().is_empty());
    assert!(record.executive_summary().bullets().is_empty());
}

// ---------------------------------------------------------------------------
// Test 5: Malformed JSON produces no record
// ---------------------------------------------------------------------------
#[test]
fn malformed_json_is_analysis_error() {
    let extractor = MockExtractor {
        pages: vec![page(1, HOUSING_TEXT)],
    };
    let service = MockService::replying("Sure! Here is the JSON: {\"document_title\": ");

    let err = analyze_pdf(&[], &extractor, &service, &AnalyzerConfig::default()).unwrap_err();
    match err {
        LexractError::Analysis(AnalysisError::MalformedResponse(_)) => {}
        other => panic!("expected malformed response, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test 6: Error kinds stay distinguishable
// ---------------------------------------------------------------------------
#[test]
fn extraction_failure_skips_generation() {
    let service = MockService::replying(HOUSING_RESPONSE);
    let err = analyze_pdf(b"%PDF-", &BrokenExtractor, &service, &AnalyzerConfig::default())
        .unwrap_err();

    assert!(matches!(err, LexractError::Extraction(_)));
    assert!(err.to_string().contains("invalid file header"));
    assert!(service.sent().is_empty());
}

#[test]
fn service_failure_is_analysis_error_with_cause() {
    let extractor = MockExtractor {
        pages: vec![page(1, HOUSING_TEXT)],
    };
    let service = MockService::failing(400);

    let err = analyze_pdf(&[], &extractor, &service, &AnalyzerConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        LexractError::Analysis(AnalysisError::Generation(_))
    ));
    let message = err.to_string();
    assert!(message.starts_with("analysis failed:"));
    assert!(message.contains("API key not valid"));
}

// ---------------------------------------------------------------------------
// Test 7: Narrative shape end-to-end
// ---------------------------------------------------------------------------
#[test]
fn narrative_shape_end_to_end() {
    let extractor = MockExtractor {
        pages: vec![page(1, "Part 1"), page(2, "Part 2")],
    };
    let service = MockService::replying(
        r#"{
            "document_title": "Seniors Housing Act",
            "purpose": "Provide housing benefits",
            "payments": "Monthly rent supplement",
            "penalties": "",
            "executive_summary": "- Purpose: housing\n- Payments: rent supplement"
        }"#,
    );
    let config = AnalyzerConfig::default().with_shape(RecordShape::Narrative);

    let result = analyze_pdf(&[], &extractor, &service, &config).unwrap();

    match result.record.body() {
        RecordBody::Narrative(body) => {
            assert_eq!(body.purpose, "Provide housing benefits");
            assert_eq!(body.payments, "Monthly rent supplement");
            assert_eq!(body.obligations, "");
        }
        RecordBody::Structured(_) => panic!("expected narrative body"),
    }
    assert_eq!(result.record.executive_summary().bullets().len(), 2);

    let sent = service.sent();
    assert!(sent[0].prompt.contains("Part 1\nPart 2\n"));
    assert_eq!(
        sent[0].response_schema["properties"]["executive_summary"]["type"],
        "string"
    );
}

// ---------------------------------------------------------------------------
// Test 8: analyze_document() wraps client failures as analysis errors
// ---------------------------------------------------------------------------
#[test]
fn test_analyze_document_unreachable_service() {
    let credential = Credential::new("test-key").unwrap();
    let config = AnalyzerConfig::default().with_endpoint("http://127.0.0.1:9");

    let err = analyze_document("Housing Act 2024", &credential, &config).unwrap_err();

    assert!(
        matches!(err, AnalysisError::Generation(GenerationError::Http(_))),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().starts_with("analysis failed:"));
}

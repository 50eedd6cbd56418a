use crate::error::ExtractionError;
use crate::extraction::{PageContent, PdfExtractor};
use lopdf::Document;

/// Pure-Rust PDF extraction backend using lopdf's per-page text extraction.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
        if pdf_bytes.is_empty() {
            return Err(ExtractionError::InvalidPdf("empty input".into()));
        }

        let doc =
            Document::load_mem(pdf_bytes).map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;

        // get_pages is keyed by page number, so iteration is already in page order
        doc.get_pages()
            .keys()
            .map(|&page_number| {
                let text = doc
                    .extract_text(&[page_number])
                    .map_err(|e| ExtractionError::Page {
                        page_number,
                        reason: e.to_string(),
                    })?;
                Ok(PageContent { page_number, text })
            })
            .collect()
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

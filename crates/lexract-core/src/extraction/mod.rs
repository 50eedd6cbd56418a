pub mod lopdf_backend;
pub mod pdftotext;

use crate::error::ExtractionError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub page_number: u32,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page
    /// in page order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Extract the whole document as one string: every page's text followed by
/// a newline, in page order.
pub fn extract_text(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<String, ExtractionError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = join_pages(&pages);
    tracing::info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        chars = text.chars().count(),
        "extracted PDF text"
    );
    Ok(text)
}

fn join_pages(pages: &[PageContent]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.text.len() + 1).sum());
    for page in pages {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

/// Select a backend by name.
pub fn backend(name: &str) -> Option<Box<dyn PdfExtractor>> {
    match name.trim().to_lowercase().as_str() {
        "lopdf" => Some(Box::new(lopdf_backend::LopdfExtractor::new())),
        "pdftotext" => Some(Box::new(pdftotext::PdftotextExtractor::new())),
        _ => None,
    }
}

/// Names accepted by [`backend`].
pub const BACKENDS: &[&str] = &["lopdf", "pdftotext"];

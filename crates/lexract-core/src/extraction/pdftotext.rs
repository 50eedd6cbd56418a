use crate::error::ExtractionError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that numbered clauses and schedules keep
/// their indentation.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(pdf_bytes)?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::PdftotextNotFound
                } else {
                    ExtractionError::InvalidPdf(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages. pdftotext ends every page with a form
/// feed, so the segment after the last one is not a page.
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i as u32 + 1,
            text: page_text.trim_end_matches('\n').to_string(),
        })
        .collect()
}

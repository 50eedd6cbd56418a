use lexract_core::error::LexractError;
use lexract_core::extraction;
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf, backend: &str) -> Result<(), LexractError> {
    let extractor = extraction::backend(backend).ok_or_else(|| {
        LexractError::InvalidArgument(format!(
            "unknown backend '{}'. Available: {}",
            backend,
            extraction::BACKENDS.join(", ")
        ))
    })?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let text = extraction::extract_text(&pdf_bytes, extractor.as_ref())?;

    print!("{text}");
    eprintln!(
        "Extracted {} characters from {} using {}",
        text.chars().count(),
        pdf_file.display(),
        extractor.backend_name()
    );
    Ok(())
}

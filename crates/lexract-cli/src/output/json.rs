use lexract_core::error::LexractError;
use lexract_core::model::LegalRecord;
use std::path::Path;

/// The full record as 2-space indented JSON.
pub fn to_json(record: &LegalRecord) -> Result<String, LexractError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// The record without `document_title` and `executive_summary`.
pub fn to_raw_json(record: &LegalRecord) -> Result<String, LexractError> {
    Ok(serde_json::to_string_pretty(&record.raw_data()?)?)
}

/// Write the download artifact: the full record as indented JSON.
pub fn write_download(record: &LegalRecord, path: &Path) -> Result<(), LexractError> {
    let mut json = to_json(record)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

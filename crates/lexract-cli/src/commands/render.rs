use lexract_core::error::LexractError;
use lexract_core::model::{LegalRecord, RecordShape};
use std::path::PathBuf;

use crate::output;

pub fn run(
    json_file: PathBuf,
    shape: RecordShape,
    render: &output::RenderOptions,
) -> Result<(), LexractError> {
    let content = std::fs::read_to_string(&json_file)?;
    let record = LegalRecord::from_json(&content, shape)?;
    output::emit(&record, render)
}

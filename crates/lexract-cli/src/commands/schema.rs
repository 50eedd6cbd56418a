use lexract_core::error::{AnalysisError, LexractError};
use lexract_core::model::RecordShape;
use lexract_core::schema::{normalize, record_schema};

pub fn run(shape: RecordShape, raw: bool) -> Result<(), LexractError> {
    let schema = record_schema(shape);
    let schema = if raw {
        schema
    } else {
        normalize(&schema).map_err(AnalysisError::from)?
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

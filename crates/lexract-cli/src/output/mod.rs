pub mod json;
pub mod text;

use clap::{Args, ValueEnum};
use lexract_core::error::LexractError;
use lexract_core::model::LegalRecord;
use std::path::PathBuf;

/// File name used when `--out` is given without a path.
pub const DOWNLOAD_FILE_NAME: &str = "legal_extraction.json";

/// One part of the report, printable on its own with `--only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Summary,
    Definitions,
    Sections,
    Eligibility,
    Entitlements,
    RecordKeeping,
}

#[derive(Args)]
pub struct RenderOptions {
    /// Output format: text (default), json (full record) or raw (record without title and summary)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "raw"])]
    output: String,

    /// Only print one part of the text report
    #[arg(long, value_enum)]
    only: Option<Section>,

    /// Also save the full record as JSON [default file: legal_extraction.json]
    #[arg(
        short = 'O',
        long = "out",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DOWNLOAD_FILE_NAME
    )]
    out: Option<PathBuf>,
}

/// Print `record` in the requested format and write the download file if asked.
pub fn emit(record: &LegalRecord, options: &RenderOptions) -> Result<(), LexractError> {
    match options.output.as_str() {
        "json" => println!("{}", json::to_json(record)?),
        "raw" => println!("{}", json::to_raw_json(record)?),
        _ => print!("{}", text::format_record(record, options.only)),
    }

    if let Some(ref path) = options.out {
        json::write_download(record, path)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

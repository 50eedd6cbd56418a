mod commands;
mod output;

use clap::{Parser, Subcommand};
use lexract_core::model::RecordShape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexract",
    version,
    about = "Extract definitions, eligibility, entitlements and duties from legislative PDFs"
)]
struct Cli {
    /// Log pipeline progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a PDF with the Gemini API and print the structured record
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print the text extracted from a PDF (no model call)
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        /// Text extraction backend
        #[arg(long, default_value = "lopdf", value_parser = ["lopdf", "pdftotext"])]
        backend: String,
    },
    /// Validate and render a previously saved JSON record
    Render {
        /// Path to JSON record (e.g. legal_extraction.json)
        input_file: PathBuf,

        /// Record shape the file was produced with: structured or narrative
        #[arg(long, default_value = "structured")]
        shape: RecordShape,

        #[command(flatten)]
        render: output::RenderOptions,
    },
    /// Print the JSON schema sent to the generation service
    Schema {
        /// Record shape: structured or narrative
        #[arg(long, default_value = "structured")]
        shape: RecordShape,

        /// Print the schema before normalization ($defs, $ref, titles, defaults)
        #[arg(long)]
        raw: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "lexract_core=debug,lexract=info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Extract {
            input_file,
            backend,
        } => commands::extract::run(input_file, &backend),
        Commands::Render {
            input_file,
            shape,
            render,
        } => commands::render::run(input_file, shape, &render),
        Commands::Schema { shape, raw } => commands::schema::run(shape, raw),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

//! field-normalizer CLI
//!
//! Reads one document's extracted fields as a JSON object (file or stdin),
//! prints the corrected JSON object on stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use field_normalizer_lib::config::NormalizerConfig;
use field_normalizer_lib::{init_tracing, NormalizeError, Normalizer};

/// Normalize OCR/NER-extracted document fields
#[derive(Parser)]
#[command(name = "field-normalizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Document type tag (e.g. aadhaar, class10cbse)
    document_type: String,

    /// JSON file with the extracted fields (stdin when omitted)
    input: Option<PathBuf>,

    /// JSON file overriding normalizer settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the task report (applied/skipped/failed) instead of only the fields
    #[arg(long)]
    report: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, NormalizeError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli) -> Result<String, NormalizeError> {
    let config = match &cli.config {
        Some(path) => NormalizerConfig::from_json_file(path)?,
        None => NormalizerConfig::default(),
    };
    let normalizer = Normalizer::new(config);

    let raw: serde_json::Value = serde_json::from_str(&read_input(cli.input.as_ref())?)?;
    let serde_json::Value::Object(fields) = &raw else {
        return Err(NormalizeError::InvalidInput("top-level value".into()));
    };

    let output = if cli.report {
        serde_json::to_value(normalizer.run(fields, &cli.document_type))?
    } else {
        serde_json::Value::Object(normalizer.normalize(fields, &cli.document_type))
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(text)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(document_type = %cli.document_type, error = %e, "Processing failed");
            ExitCode::FAILURE
        }
    }
}

//! Show command - rows of a single purchase-order document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use arezzo_core::models::config::OutputConfig;
use arezzo_core::{ArezzoOrderParser, OrderParser, OutputRow};

use super::OutputFormat;
use crate::export;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Input XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Reading document: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let rows = ArezzoOrderParser::new().parse_bytes(&data)?;

    if rows.is_empty() {
        eprintln!(
            "{} No items found in {}",
            style("⚠").yellow(),
            args.input.display()
        );
    }

    // The byte-order mark only makes sense in files.
    let output_config = OutputConfig {
        write_bom: config.output.write_bom && args.output.is_some(),
        ..config.output.clone()
    };
    let output = format_rows(&rows, args.format, &output_config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render rows in the requested format.
pub fn format_rows(
    rows: &[OutputRow],
    format: OutputFormat,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(rows)?)),
        OutputFormat::Csv => export::rows_to_string(rows, output),
        OutputFormat::Text => Ok(export::format_text(rows)),
    }
}

//! Filter command - look up orders in an exported CSV.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use arezzo_core::models::config::OutputConfig;
use arezzo_core::{OutputRow, RowFilter};

use super::OutputFormat;
use super::show::format_rows;
use crate::export;

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// CSV file written by `convert` (default from config)
    input: Option<PathBuf>,

    /// Order numbers, separated by commas, semicolons or spaces
    #[arg(short, long)]
    pedido: Option<String>,

    /// Brand substring, case-insensitive
    #[arg(short, long)]
    marca: Option<String>,

    /// Supplier substring, case-insensitive
    #[arg(long)]
    fornecedor: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: FilterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let input = args.input.clone().unwrap_or_else(|| config.output.path.clone());

    if !input.exists() {
        anyhow::bail!(
            "{} not found. Run 'arezzo convert' to create it.",
            input.display()
        );
    }

    let rows = export::read_rows(&input, config.output.delimiter_byte()?)?;
    debug!("Loaded {} rows from {}", rows.len(), input.display());

    let filter = build_filter(&args);
    let found: Vec<OutputRow> = filter.apply(&rows).into_iter().cloned().collect();

    if found.is_empty() {
        eprintln!(
            "{} No orders match the given filters.",
            style("⚠").yellow()
        );
        return Ok(());
    }

    let output_config = OutputConfig {
        write_bom: false,
        ..config.output.clone()
    };
    print!("{}", format_rows(&found, args.format, &output_config)?);

    let orders = {
        let mut orders: Vec<&str> = found.iter().map(|r| r.pedido.as_str()).collect();
        orders.sort_unstable();
        orders.dedup();
        orders.len()
    };
    eprintln!(
        "{} {} rows in {} orders",
        style("ℹ").blue(),
        found.len(),
        orders
    );

    Ok(())
}

fn build_filter(args: &FilterArgs) -> RowFilter {
    let mut filter = RowFilter::new();
    if let Some(pedido) = &args.pedido {
        filter = filter.with_pedidos_text(pedido);
    }
    if let Some(marca) = &args.marca {
        filter = filter.with_marca(marca);
    }
    if let Some(fornecedor) = &args.fornecedor {
        filter = filter.with_fornecedor(fornecedor);
    }
    filter
}

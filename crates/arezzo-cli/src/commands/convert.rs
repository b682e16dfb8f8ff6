//! Convert command - many purchase-order documents into one CSV.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures::future::join_all;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use arezzo_core::{
    merge_rows, ArezzoError, ArezzoOrderParser, ConsolidatedTable, DocumentStatus, OrderParser,
    OutputRow,
};

use crate::export;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input XML files or glob patterns (e.g. "pedidos/*.xml")
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output CSV file (default from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Update rows of an existing output file instead of overwriting it
    #[arg(long)]
    merge: bool,

    /// Number of documents parsed concurrently
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Abort at the first document that is not well-formed XML
    #[arg(long)]
    fail_fast: bool,

    /// Do not prefix the CSV with a byte-order mark
    #[arg(long)]
    no_bom: bool,

    /// Field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Also write per-document reports as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(delimiter) = args.delimiter {
        config.output.delimiter = delimiter;
    }
    if args.no_bom {
        config.output.write_bom = false;
    }
    if let Some(jobs) = args.jobs {
        config.batch.jobs = jobs;
    }
    if args.fail_fast {
        config.batch.continue_on_error = false;
    }
    let output_path = args.output.clone().unwrap_or_else(|| config.output.path.clone());

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No XML files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} documents to convert",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let parser = ArezzoOrderParser::new();
    let mut results = Vec::with_capacity(files.len());

    // Each chunk runs on the blocking pool; handles are awaited in input order.
    for chunk in files.chunks(config.batch.jobs.max(1)) {
        let handles = chunk.iter().cloned().map(|path| {
            tokio::task::spawn_blocking(move || {
                let result = parse_file(&parser, &path);
                (path, result)
            })
        });

        for joined in join_all(handles).await {
            let (path, result) = joined?;
            pb.inc(1);

            if let Err(e) = &result {
                if !config.batch.continue_on_error {
                    pb.abandon();
                    anyhow::bail!("Failed to convert {}: {}", path.display(), e);
                }
            }
            results.push((path.display().to_string(), result));
        }
    }

    pb.finish_and_clear();

    let table = ConsolidatedTable::from_results(results);
    info!(
        "Consolidated {} rows from {} documents",
        table.rows().len(),
        table.reports().len()
    );

    if let Some(report_path) = &args.report {
        fs::write(report_path, serde_json::to_string_pretty(table.reports())?)?;
        debug!("Wrote document reports to {}", report_path.display());
    }

    print_reports(&table);

    if table.is_empty() && !args.merge {
        anyhow::bail!("No rows were produced; {} was not written", output_path.display());
    }

    let rows = if args.merge && output_path.exists() {
        let existing = export::read_rows(&output_path, config.output.delimiter_byte()?)?;
        let outcome = merge_rows(existing, table.rows().to_vec());
        println!(
            "{} Merged into {}: {} new, {} updated, {} total",
            style("✓").green(),
            output_path.display(),
            outcome.inserted,
            outcome.updated,
            outcome.rows.len()
        );
        outcome.rows
    } else {
        table.rows().to_vec()
    };

    export::write_file(&output_path, &rows, &config.output)?;

    println!(
        "{} Wrote {} rows to {} in {:?}",
        style("✓").green(),
        rows.len(),
        output_path.display(),
        start.elapsed()
    );

    Ok(())
}

/// Files named explicitly are taken as-is; patterns only yield `.xml` files.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let before = files.len();
        files.extend(glob(input)?.filter_map(|r| r.ok()).filter(|p| is_xml(p)));
        if files.len() == before {
            warn!("No XML files match {}", input);
        }
    }

    Ok(files)
}

fn is_xml(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

fn parse_file(parser: &ArezzoOrderParser, path: &Path) -> Result<Vec<OutputRow>, ArezzoError> {
    let file = fs::File::open(path)?;
    let rows = parser.parse_document(BufReader::new(file))?;
    Ok(rows)
}

fn print_reports(table: &ConsolidatedTable) {
    let converted = table.converted().count();
    let empty: Vec<_> = table.empty().collect();
    let failed: Vec<_> = table.failed().collect();

    println!(
        "   {} converted, {} without items, {} failed",
        style(converted).green(),
        style(empty.len()).yellow(),
        style(failed.len()).red()
    );

    if !empty.is_empty() {
        println!();
        println!("{}", style("No items found in:").yellow());
        for report in &empty {
            println!("  - {}", report.source);
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for report in &failed {
            if let DocumentStatus::Failed { error } = &report.status {
                println!("  - {}: {}", report.source, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_filters_glob_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.xml"), "<root/>").unwrap();
        fs::write(dir.path().join("b.XML"), "<root/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let pattern = dir.path().join("*").display().to_string();
        let mut files = expand_inputs(&[pattern]).unwrap();
        files.sort();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.XML"]);
    }

    #[test]
    fn test_expand_inputs_keeps_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("export.txt");
        fs::write(&notes, "<root/>").unwrap();

        let files = expand_inputs(&[notes.display().to_string()]).unwrap();
        assert_eq!(files, vec![notes]);
    }
}

//! tablecompare - Cell-level comparison of tabular datasets

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use tablecompare::config::{parse_column_spec, CompareConfig};
use tablecompare::engine::{CompareOutcome, Comparator};
use tablecompare::output::{JsonSink, ReportSink, TerminalRenderer};
use tablecompare::parser::LoaderFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Terminal,
    Json,
}

/// Cell-level comparison of tabular datasets (CSV, JSON)
#[derive(Parser, Debug)]
#[command(name = "tablecompare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base dataset file
    base_file: PathBuf,

    /// Compare dataset file
    compare_file: PathBuf,

    /// Join-key column(s), `name` or `base=compare` (comma-separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    join: Vec<String>,

    /// Rename a compare-side column to a base-side name, as `base=compare`
    #[arg(short, long = "map")]
    map: Vec<String>,

    /// Column(s) to exclude from comparison, `name` or `base=compare`
    #[arg(long, value_delimiter = ',')]
    ignore_column: Vec<String>,

    /// Pin fingerprinted intermediates in memory for reuse
    #[arg(long)]
    cache: bool,

    /// Write the discrepancy report to this CSV file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliFormat,
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(has_differences) => {
            if has_differences {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let factory = LoaderFactory::new();
    let base = factory
        .load(&cli.base_file)
        .with_context(|| format!("Failed to load base file: {}", cli.base_file.display()))?;
    let compare = factory
        .load(&cli.compare_file)
        .with_context(|| format!("Failed to load compare file: {}", cli.compare_file.display()))?;

    let mapping = cli
        .map
        .iter()
        .map(|s| {
            let pair = parse_column_spec(s).into_pair();
            if !pair.is_renamed() {
                anyhow::bail!("--map expects base=compare, got: {s}");
            }
            Ok(pair)
        })
        .collect::<Result<Vec<_>>>()?;

    let config = CompareConfig::new(cli.join.iter().map(|s| parse_column_spec(s)).collect())
        .with_column_mapping(mapping)
        .with_ignore_columns(cli.ignore_column.iter().map(|s| parse_column_spec(s)).collect())
        .with_cache_intermediates(cli.cache);

    let mut comparator = Comparator::new(base, compare, config)?;

    let outcome = match &cli.report {
        Some(path) => {
            let outcome = comparator.report_to_path(path)?;
            if !outcome.is_identical() {
                log::info!("wrote report to {}", path.display());
            }
            outcome
        }
        None => comparator.compare()?,
    };

    let base_only = comparator.base_only_rows();
    let compare_only = comparator.compare_only_rows();

    match cli.format {
        CliFormat::Terminal => {
            TerminalRenderer::new().render(&outcome, &base_only, &compare_only)?;
        }
        CliFormat::Json => {
            if let CompareOutcome::Different(report) = &outcome {
                let stdout = std::io::stdout();
                let mut sink = JsonSink::new(stdout.lock());
                sink.write(report).context("Failed to write JSON output")?;
            } else {
                println!("{{}}");
            }
        }
    }

    let has_differences =
        !outcome.is_identical() || !base_only.is_empty() || !compare_only.is_empty();
    Ok(has_differences)
}

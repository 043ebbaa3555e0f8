use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdf_harvest::{
    ExtractOptions, ExtractionArtifacts, PageSelection, run_pipeline_path, search,
    write_artifacts,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdf-harvest",
    version,
    about = "Extract tables and text from PDFs, and search extracted text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract every table to CSV and the document text to a .txt file.
    Extract(ExtractArgs),
    /// Search extracted text for a query, highlighting exact matches.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the CSV and text files are written to.
    #[arg(short, long)]
    output: PathBuf,

    /// Page selection for table detection, like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Log extraction progress and print every warning.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Text file produced by `extract`.
    #[arg(short, long)]
    text: PathBuf,

    /// Substring to look for (case-insensitive).
    #[arg(short, long, default_value = "")]
    query: String,

    /// Print matches as a JSON array.
    #[arg(long)]
    json: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .context("failed to parse --pages")?;

    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ExtractOptions {
        pages,
        min_cols: args.min_cols,
        delimiter: args.delimiter as u8,
    })
}

fn log_report(artifacts: &ExtractionArtifacts, verbose: bool) {
    let report = &artifacts.report;
    if report.warnings.is_empty() {
        return;
    }

    warn!("{} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} page={:?} table={:?}: {}",
                warning.code, warning.page, warning.table_index, warning.message
            );
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionArtifacts> {
    let options = parse_options(args)?;
    let (document, artifacts) = run_pipeline_path(&args.input, &options)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let written = write_artifacts(&args.output, &document, &artifacts, options.delimiter)
        .with_context(|| format!("failed to write artifacts to '{}'", args.output.display()))?;

    for path in &written.table_files {
        println!("{}", path.display());
    }
    println!("{}", written.text_file.display());
    Ok(artifacts)
}

fn run_search(args: &SearchArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.text)
        .with_context(|| format!("failed to read '{}'", args.text.display()))?;
    let matches = search(&text, &args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for found in &matches {
            println!("{}: {}", found.line_number, found.content);
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "pdf_harvest=info"
    } else {
        "pdf_harvest=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => {
            init_tracing(args.verbose);
            match run_extract(&args) {
                Ok(artifacts) => {
                    log_report(&artifacts, args.verbose);
                    if artifacts.is_empty() {
                        ExitCode::from(2)
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    ExitCode::from(1)
                }
            }
        }
        Commands::Search(args) => {
            init_tracing(false);
            match run_search(&args) {
                Ok(()) => ExitCode::SUCCESS,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

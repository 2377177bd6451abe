//! Redaction planning CLI.
//!
//! Drives the planner from JSON page dumps produced by a PDF text
//! extraction step, and prints the resulting plan and report as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use redact_plan::{DetectionReport, PageText, RedactionConfig, RedactionPlan, RedactionPlanner};

/// Redaction planner
///
/// Detects personal data in positioned PDF text and plans the rectangles
/// to paint over it.
#[derive(Parser)]
#[command(name = "redact-plan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (JSON or TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the minimum confidence for a finding to be kept
    #[arg(long, value_name = "FLOAT", global = true)]
    confidence_floor: Option<f64>,

    /// Keep the matched text on each block (off by default)
    #[arg(long, global = true)]
    retain_source_text: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan redactions for a document's extracted pages
    Plan {
        /// Input JSON file with the document's pages and text runs
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output JSON file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run detection on plain text (for debugging patterns)
    Detect {
        /// Text to scan
        #[arg(short, long)]
        text: String,
    },
}

/// Extracted pages as written by the PDF text layer.
#[derive(Debug, Deserialize)]
struct DocumentInput {
    pages: Vec<PageText>,
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    plan: RedactionPlan,
    report: DetectionReport,
}

/// Command handler owning the configured planner.
struct PlanHandler {
    planner: RedactionPlanner,
    verbose: bool,
}

impl PlanHandler {
    fn new(config: RedactionConfig, verbose: bool) -> Result<Self> {
        let planner = RedactionPlanner::new(config).context("Invalid planner configuration")?;
        Ok(Self { planner, verbose })
    }

    /// Plans a document read from `input`.
    fn plan(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let raw = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let document: DocumentInput = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse pages from {}", input.display()))?;

        let (plan, report) = self.planner.plan_with_report(&document.pages);

        if self.verbose {
            eprintln!("Input:  {}", input.display());
            eprintln!("\nRedaction Summary:");
            eprintln!("  Pages processed: {}", report.pages_processed);
            eprintln!("  Pages affected:  {}", report.pages_affected);
            eprintln!("  Blocks planned:  {}", report.total_blocks);
            for (category, count) in report.counts_by_category.iter().filter(|(_, c)| **c > 0) {
                eprintln!("    {:<16} {}", category.as_str(), count);
            }
        }
        if plan.is_partial() {
            eprintln!(
                "⚠ Partial result: {} run(s) skipped on page(s) {:?}",
                plan.issues.len(),
                report.partial_pages
            );
        }

        let json = serde_json::to_string_pretty(&PlanOutput { plan, report })
            .context("Failed to serialize plan")?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &json)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            eprintln!("✓ Plan written → {}", output_path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    /// Prints validated findings for a plain string.
    fn detect(&self, text: &str) -> Result<()> {
        let found = self.planner.detect_text(text);
        let json = serde_json::to_string_pretty(&found).context("Failed to serialize findings")?;
        println!("{}", json);
        Ok(())
    }
}

/// Loads the config file if given, then applies command-line overrides.
fn build_config(
    path: Option<&Path>,
    confidence_floor: Option<f64>,
    retain_source_text: bool,
) -> Result<RedactionConfig> {
    let mut config = match path {
        Some(path) => RedactionConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RedactionConfig::default(),
    };

    if let Some(floor) = confidence_floor {
        config.confidence_floor = floor;
    }
    if retain_source_text {
        config.retain_source_text = true;
    }

    Ok(config)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = build_config(
        cli.config.as_deref(),
        cli.confidence_floor,
        cli.retain_source_text,
    )?;
    let handler = PlanHandler::new(config, cli.verbose)?;

    match &cli.command {
        Commands::Plan { input, output } => handler.plan(input, output.as_deref())?,
        Commands::Detect { text } => handler.detect(text)?,
    }

    Ok(())
}

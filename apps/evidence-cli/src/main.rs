//! Evidence search CLI
//!
//! Loads a page map (and optionally fast-path candidates), runs the two-phase
//! search for one requirement and prints the decision as JSON on stdout.
//! Logs go to stderr.

mod input;

use anyhow::Context;
use clap::Parser;
use evidence_engine::summary::{decision_summary, scan_summary};
use evidence_engine::{EngineConfig, EvidenceEngine, ScanControl};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "evidence-cli")]
#[command(
    version,
    about = "Find the pages of a document that evidence a disclosure requirement"
)]
struct Args {
    /// JSON object of page number to page text
    #[arg(short, long)]
    pages: PathBuf,

    /// Requirement text to search for
    #[arg(short, long)]
    requirement: String,

    /// JSON array of fast-path candidates ({page, score, text})
    #[arg(short, long)]
    candidates: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the minimum relevance for exhaustive scan matches
    #[arg(long)]
    min_relevance: Option<f64>,

    /// Stop the exhaustive scan after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print plain-text summaries instead of JSON
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the decision, so all logging goes to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(min_relevance) = args.min_relevance {
        config.scan.min_relevance = min_relevance;
    }
    let engine = EvidenceEngine::new(config).context("Failed to build evidence engine")?;

    let pages = input::load_pages(&args.pages)?;
    let candidates = match &args.candidates {
        Some(path) => input::load_candidates(path)?,
        None => Vec::new(),
    };
    tracing::info!(
        "Loaded {} pages and {} candidates",
        pages.len(),
        candidates.len()
    );

    let token = CancellationToken::new();
    let mut control = ScanControl::unbounded().with_cancellation(token.clone());
    if let Some(ms) = args.timeout_ms {
        control = control.with_timeout(Duration::from_millis(ms));
    }

    let requirement = args.requirement.clone();
    let mut worker = tokio::task::spawn_blocking(move || {
        engine.decide_with(&requirement, &candidates, &pages, &control)
    });

    let decision = tokio::select! {
        result = &mut worker => result.context("Evidence search task failed")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, cancelling scan");
            token.cancel();
            worker.await.context("Evidence search task failed")?
        }
    };

    if args.summary {
        println!("{}", decision_summary(&decision));
        if let Some(scan) = &decision.scan {
            println!();
            println!("{}", scan_summary(scan));
        }
    } else {
        let json = serde_json::to_string_pretty(&decision).context("Failed to serialize decision")?;
        println!("{}", json);
    }

    Ok(())
}

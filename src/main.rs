use affiliation_dedup::config::{resolve_threshold, DedupConfig, THRESHOLD_ENV};
use affiliation_dedup::similarity::Metric;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "affiliation-dedup")]
#[command(about = "Map near-duplicate author affiliations to canonical forms")]
struct Args {
    /// Input file, one JSON object per line
    input: PathBuf,

    /// Output CSV file
    output: PathBuf,

    /// Minimum similarity (0-1) to join an existing cluster
    /// (or set AFFILIATION_THRESHOLD env var; default 0.7)
    threshold: Option<String>,

    /// CSV of known synonyms with header `original,canonical`
    #[arg(long)]
    seed: Option<PathBuf>,

    /// JSON field holding the affiliation
    #[arg(long, default_value = "author_affiliation")]
    field: String,

    /// Similarity metric: levenshtein or jaro-winkler
    #[arg(long, default_value = "levenshtein")]
    metric: Metric,

    /// Write the final cache entries to this JSON file
    #[arg(long)]
    dump_cache: Option<PathBuf>,
}

fn build_config(args: Args) -> Result<DedupConfig> {
    let env_threshold = std::env::var(THRESHOLD_ENV).ok();
    let threshold = resolve_threshold(args.threshold.as_deref(), env_threshold.as_deref())
        .context("Threshold must be between 0 and 1")?;

    let mut config = DedupConfig::new(args.input, args.output)
        .with_threshold(threshold)
        .with_metric(args.metric)
        .with_field(args.field);
    if let Some(seed) = args.seed {
        config = config.with_seed_file(seed);
    }
    if let Some(dump) = args.dump_cache {
        config = config.with_dump_cache(dump);
    }
    Ok(config)
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let outcome = build_config(args).and_then(|config| {
        info!("Processing...");
        let stats = affiliation_dedup::run(&config)
            .with_context(|| format!("Failed to process {}", config.input.display()))?;
        Ok(stats)
    });

    match outcome {
        Ok(stats) => {
            println!("\nSome normalization stats:");
            println!("{}", stats);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

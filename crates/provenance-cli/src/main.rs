// File: crates/provenance-cli/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use provenance_core::tags::{self, GPS_CATEGORY};
use provenance_core::{Analyzer, AnalyzerConfig, Verdict};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

/// Estimate whether photos were taken with a real camera, edited, or captured from a screen.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Analyze one or more images and print a provenance report for each
    Analyze {
        /// The paths to the images
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print each report as a single JSON line
        #[arg(long)]
        compact: bool,

        /// How many files to hold in memory and analyze at once
        #[arg(short, long, default_value_t = 4)]
        jobs: usize,

        #[command(flatten)]
        limits: Limits,
    },
    /// List the structured metadata tags of a file
    Tags {
        /// The path to the file
        #[arg(required = true)]
        file_path: PathBuf,

        /// Print GPS entries instead of redacting them
        #[arg(long)]
        show_gps: bool,
    },
}

/// Overrides for the size and resolution plausibility limits.
#[derive(clap::Args, Debug)]
struct Limits {
    /// Files smaller than this (in MiB) are not natural photos
    #[arg(long, default_value_t = 0.1)]
    min_size_mib: f64,

    /// Files larger than this (in MiB) are unusual captures
    #[arg(long, default_value_t = 20.0)]
    max_size_mib: f64,

    /// Smallest plausible pixel count on either axis
    #[arg(long, default_value_t = 500)]
    min_resolution: u32,

    /// Largest plausible pixel count on either axis
    #[arg(long, default_value_t = 12_000)]
    max_resolution: u32,
}

impl Limits {
    fn analyzer(&self) -> Result<Analyzer> {
        let mut config = AnalyzerConfig::default();
        config.thresholds.min_size_mib = self.min_size_mib;
        config.thresholds.max_size_mib = self.max_size_mib;
        config.thresholds.min_axis = self.min_resolution;
        config.thresholds.max_axis = self.max_resolution;
        Ok(Analyzer::new(config)?)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads and analyzes files concurrently, at most `jobs` at a time, returning
/// results in input order.
async fn analyze_all(
    analyzer: Analyzer,
    paths: &[PathBuf],
    jobs: usize,
) -> Result<Vec<Result<Verdict>>> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()));
            let result = match bytes {
                Ok(bytes) => {
                    tracing::debug!(path = %path.display(), bytes = bytes.len(), "analyzing");
                    let identifier = path.display().to_string();
                    tokio::task::spawn_blocking(move || {
                        analyzer.analyze(&bytes).with_identifier(identifier)
                    })
                    .await
                    .context("analysis task panicked")
                }
                Err(err) => Err(err),
            };
            anyhow::Ok((index, result))
        });
    }

    let mut slots: Vec<Option<Result<Verdict>>> = paths.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.context("analysis task panicked")??;
        slots[index] = Some(result);
    }
    Ok(slots.into_iter().flatten().collect())
}

fn print_report(verdict: &Verdict, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(verdict)?);
    } else {
        println!("Photo Provenance Report");
        println!("-----------------------");
        println!("{}", serde_json::to_string_pretty(verdict)?);
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            paths,
            compact,
            jobs,
            limits,
        } => {
            let analyzer = limits.analyzer()?;
            let results = analyze_all(analyzer, &paths, jobs).await?;

            let mut unreadable = 0;
            for result in &results {
                match result {
                    Ok(verdict) => print_report(verdict, compact)?,
                    Err(err) => {
                        unreadable += 1;
                        eprintln!("Error: {err:#}");
                    }
                }
            }
            if unreadable > 0 {
                anyhow::bail!("{unreadable} of {} file(s) could not be analyzed", paths.len());
            }
        }

        Commands::Tags {
            file_path,
            show_gps,
        } => {
            let file_bytes = tokio::fs::read(&file_path)
                .await
                .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

            let entries = tags::read_tags(&file_bytes)?;
            if entries.is_empty() {
                println!("No metadata found in {}.", file_path.display());
                return Ok(());
            }

            println!("Metadata for {}:", file_path.display());
            for entry in entries {
                let value = if entry.category == GPS_CATEGORY && !show_gps {
                    "<redacted>"
                } else {
                    entry.value.as_str()
                };
                println!("  - {}: {} = {}", entry.category, entry.key, value);
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use flightstat::logging::init_tracing;
use flightstat::{analyze, generate_corpus, AnalysisConfig, GeneratorConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Generates a corpus, then analyzes it, in one process.
#[derive(Parser, Debug)]
struct Args {
    /// Corpus directory shared by both stages
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Number of files to generate
    #[arg(long)]
    num_files: Option<usize>,
    /// Seed for a reproducible corpus
    #[arg(long)]
    seed: Option<u64>,
    /// Skip generation and analyze whatever is already there
    #[arg(long)]
    skip_generate: bool,
    /// Append-only log file; "-" logs to stderr
    #[arg(long, default_value = "main.log")]
    log_file: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = (args.log_file != "-").then(|| PathBuf::from(&args.log_file));
    init_tracing(log_path.as_deref())?;
    info!("Main pipeline execution started.");

    let mut gen_cfg = GeneratorConfig::from_env();
    let mut an_cfg = AnalysisConfig::from_env();
    if let Some(dir) = &args.data_dir {
        gen_cfg.out_dir = dir.clone();
        an_cfg.data_dir = dir.clone();
    }
    if let Some(n) = args.num_files { gen_cfg.num_files = n; }
    if args.seed.is_some() { gen_cfg.seed = args.seed; }

    if !args.skip_generate {
        let t0 = Instant::now();
        info!(stage = "generate", "Starting stage");
        let summary = generate_corpus(&gen_cfg).inspect_err(|e| error!(stage = "generate", "Stage failed: {}", e)).context("generate stage")?;
        info!(stage = "generate", files = summary.files_written, wall_ms = t0.elapsed().as_millis() as u64, "Stage finished");
    }

    let t0 = Instant::now();
    info!(stage = "analyze", "Starting stage");
    let report = analyze(&an_cfg).inspect_err(|e| error!(stage = "analyze", "Stage failed: {}", e)).context("analyze stage")?;
    report.log();
    info!(stage = "analyze", wall_ms = t0.elapsed().as_millis() as u64, "Stage finished");

    info!("All stages completed successfully.");
    println!("Analysis complete. Check logs for details.");
    Ok(())
}

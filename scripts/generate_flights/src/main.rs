use anyhow::{Context, Result};
use clap::Parser;
use flightstat::constants::DEFAULT_GENERATOR_LOG;
use flightstat::logging::init_tracing;
use flightstat::{generate_corpus, GeneratorConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    /// Output directory (created if missing)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of files to write
    #[arg(long)]
    num_files: Option<usize>,
    /// Minimum records per file
    #[arg(long)]
    records_min: Option<usize>,
    /// Maximum records per file
    #[arg(long)]
    records_max: Option<usize>,
    /// Size of the city universe
    #[arg(long)]
    num_cities: Option<usize>,
    /// Lower bound of the per-record null probability
    #[arg(long)]
    null_prob_min: Option<f64>,
    /// Upper bound of the per-record null probability
    #[arg(long)]
    null_prob_max: Option<f64>,
    /// Generator threads (defaults to CPU count)
    #[arg(long)]
    threads: Option<usize>,
    /// Seed for a reproducible corpus
    #[arg(long)]
    seed: Option<u64>,
    /// Append-only log file; "-" logs to stderr
    #[arg(long, default_value = DEFAULT_GENERATOR_LOG)]
    log_file: String,
}

impl Args {
    fn config(&self) -> GeneratorConfig {
        let mut cfg = GeneratorConfig::from_env();
        if let Some(o) = &self.output { cfg.out_dir = o.clone(); }
        if let Some(n) = self.num_files { cfg.num_files = n; }
        if let Some(n) = self.records_min { cfg.records_min = n; }
        if let Some(n) = self.records_max { cfg.records_max = n; }
        if let Some(n) = self.num_cities { cfg.num_cities = n; }
        if let Some(p) = self.null_prob_min { cfg.null_prob_min = p; }
        if let Some(p) = self.null_prob_max { cfg.null_prob_max = p; }
        if let Some(t) = self.threads { cfg.threads = t; }
        if self.seed.is_some() { cfg.seed = self.seed; }
        cfg
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = (args.log_file != "-").then(|| PathBuf::from(&args.log_file));
    init_tracing(log_path.as_deref())?;

    let cfg = args.config();
    info!("Starting flight data generation using parallel processing.");
    let summary = generate_corpus(&cfg).with_context(|| format!("generate corpus into {}", cfg.out_dir.display()))?;
    println!(
        "Generated {} files ({} failed) with {} records, {} dirty, in {}",
        summary.files_written,
        summary.files_failed,
        summary.records_written,
        summary.dirty_records,
        cfg.out_dir.display()
    );
    Ok(())
}

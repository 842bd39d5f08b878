use anyhow::Result;
use clap::Parser;
use flightstat::constants::DEFAULT_ANALYSIS_LOG;
use flightstat::logging::init_tracing;
use flightstat::{analyze, AnalysisConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
struct Args {
    /// Corpus directory (defaults to FLIGHTS_DATA_DIR or /tmp/flights)
    #[arg(long)]
    input: Option<PathBuf>,
    /// File name glob within the corpus directory
    #[arg(long)]
    pattern: Option<String>,
    /// Descend into subdirectories
    #[arg(long)]
    recursive: bool,
    /// Number of map workers (defaults to CPU count)
    #[arg(long)]
    workers: Option<usize>,
    /// Capacity of the task queue feeding the workers
    #[arg(long)]
    queue_cap: Option<usize>,
    /// How many destinations to rank
    #[arg(long)]
    top_k: Option<usize>,
    /// Percentile reported per destination
    #[arg(long)]
    percentile: Option<f64>,
    /// Append-only log file; "-" logs to stderr
    #[arg(long, default_value = DEFAULT_ANALYSIS_LOG)]
    log_file: String,
    /// Also print the report as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> AnalysisConfig {
        let mut cfg = AnalysisConfig::from_env();
        if let Some(dir) = &self.input { cfg.data_dir = dir.clone(); }
        if let Some(p) = &self.pattern { cfg.file_pattern = p.clone(); }
        if let Some(w) = self.workers { cfg.workers = w; }
        if let Some(q) = self.queue_cap { cfg.queue_cap = q; }
        if let Some(k) = self.top_k { cfg.top_k = k; }
        if let Some(p) = self.percentile { cfg.percentile = p; }
        cfg.recursive |= self.recursive;
        cfg
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_path = (args.log_file != "-").then(|| PathBuf::from(&args.log_file));
    init_tracing(log_path.as_deref())?;

    let cfg = args.config();
    info!(data_dir = %cfg.data_dir.display(), "Starting flight data analysis.");
    let report = match analyze(&cfg) {
        Ok(r) => r,
        Err(e) if e.is_corpus_missing() => {
            error!("Data directory does not exist: {}", e);
            eprintln!("No corpus at {}: {}", cfg.data_dir.display(), e);
            return Ok(ExitCode::from(2));
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("Analysis failed: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    report.log();
    info!("Flight data analysis completed.");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("Analysis complete. Check logs for details.");
    Ok(ExitCode::SUCCESS)
}

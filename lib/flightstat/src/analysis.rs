use crate::aggregate::Aggregator;
use crate::config::AnalysisConfig;
use crate::duration_stats::stats_for_top;
use crate::error::AnalysisError;
use crate::extremum::find_extrema;
use crate::io::discover_files;
use crate::mapper::FlightMapper;
use crate::report::AnalysisReport;
use crate::runtime::{map_reduce, WorkerPool};
use crate::topk::top_k_by_volume;
use std::time::Instant;
use tracing::{debug, error, info};

/// Runs discovery, the parallel map, the reduce, and derives the report.
pub fn analyze(cfg: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let start = Instant::now();
    cfg.validate()?;

    let files = match discover_files(&cfg.data_dir, &cfg.file_pattern, cfg.recursive) {
        Ok(f) => f,
        Err(e) => {
            error!(data_dir = %cfg.data_dir.display(), "{}", e);
            return Err(e);
        }
    };
    info!("Found {} files for analysis.", files.len());

    let pool = WorkerPool::new(cfg.workers, cfg.queue_cap);
    let mut aggregator = Aggregator::new();
    let summary = map_reduce(&pool, FlightMapper::new(), &mut aggregator, &files)?;
    let aggregates = aggregator.finish();
    debug!(cities = aggregates.net_flow.len(), net_flow_total = aggregates.net_flow_total(), "aggregates frozen");

    let top = top_k_by_volume(&aggregates.durations, cfg.top_k);
    let top_cities = stats_for_top(&aggregates.durations, &top, cfg.percentile);

    let mut report = AnalysisReport {
        files_discovered: files.len(),
        files_failed: summary.failed_files,
        clean_records: aggregates.records,
        dirty_records: summary.rejected,
        percentile: cfg.percentile,
        top_cities,
        max_arrival: None,
        max_departure: None,
        workers: pool.workers(),
        elapsed_ms: 0,
    };
    report.set_extrema(find_extrema(&aggregates.net_flow));
    report.elapsed_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}

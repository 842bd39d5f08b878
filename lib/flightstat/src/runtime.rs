use crate::api::{Mapper, Reducer};
use crate::error::{AnalysisError, FileError};
use crate::io::read_json_array;
use crate::stats::MapStats;
use crossbeam_channel as channel;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Result of mapping a single file.
#[derive(Debug)]
pub struct MapOutcome<T> {
    /// Position of the file in the dispatched list.
    pub index: usize,
    pub path: PathBuf,
    pub values: Vec<T>,
    pub rejected: u64,
    pub error: Option<FileError>,
    pub elapsed_ms: u64,
}

/// Everything the map phase produced, ordered by file index.
pub struct MapPhase<T> {
    pub outcomes: Vec<MapOutcome<T>>,
    pub stats: MapStats,
}

/// Totals over a completed map-reduce run.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed_files: usize,
    pub emitted: u64,
    pub rejected: u64,
}

struct MapTask {
    index: usize,
    path: PathBuf,
}

/// Fixed set of OS threads fed from a bounded task queue.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    workers: usize,
    queue_cap: usize,
}

impl WorkerPool {
    pub fn new(workers: usize, queue_cap: usize) -> Self {
        Self { workers: workers.max(1), queue_cap: queue_cap.max(1) }
    }

    pub fn workers(&self) -> usize { self.workers }

    /// Maps every file, then joins all workers before returning.
    pub fn run_map<M>(&self, mapper: Arc<M>, files: &[PathBuf]) -> Result<MapPhase<M::Output>, AnalysisError>
    where
        M: Mapper + Send + Sync + 'static,
    {
        let phase_start = Instant::now();
        let workers = self.workers.min(files.len().max(1));
        info!(workers, files = files.len(), queue_cap = self.queue_cap, "Starting map phase");

        let (task_tx, task_rx) = channel::bounded::<MapTask>(self.queue_cap);
        let (result_tx, result_rx) = channel::unbounded::<MapOutcome<M::Output>>();

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let mapper = Arc::clone(&mapper);
            let spawned = thread::Builder::new()
                .name(format!("map-worker-{}", worker_id))
                .spawn(move || {
                    for task in task_rx.iter() {
                        let outcome = map_one(worker_id, mapper.as_ref(), task);
                        if result_tx.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            match spawned {
                Ok(h) => handles.push(h),
                Err(e) if handles.is_empty() => return Err(AnalysisError::PoolStart(e)),
                Err(e) => {
                    warn!(worker_id, error = %e, "could not spawn map worker, continuing with fewer");
                    break;
                }
            }
        }
        drop(task_rx);
        drop(result_tx);

        for (index, path) in files.iter().enumerate() {
            if task_tx.send(MapTask { index, path: path.clone() }).is_err() {
                error!("all map workers exited before the queue drained");
                break;
            }
        }
        drop(task_tx);

        // Barrier: nothing is reduced until every worker has returned.
        for h in handles {
            if h.join().is_err() {
                error!("map worker thread terminated abnormally");
            }
        }

        let mut outcomes: Vec<MapOutcome<M::Output>> = result_rx.try_iter().collect();
        outcomes.sort_by_key(|o| o.index);

        let wall_ms = phase_start.elapsed().as_millis() as u64;
        let stats = MapStats::from_outcomes(&outcomes, workers, wall_ms);
        info!(phase = "map",
              tasks = stats.tasks, failed = stats.failed_tasks,
              total_emits = stats.total_emits, total_rejected = stats.total_rejected,
              min_task_ms = stats.min_task_ms, max_task_ms = stats.max_task_ms,
              wall_ms = stats.wall_ms,
              "Map phase complete");
        if outcomes.len() != files.len() {
            warn!(expected = files.len(), received = outcomes.len(), "map phase lost outcomes");
        }
        Ok(MapPhase { outcomes, stats })
    }
}

fn map_one<M: Mapper>(worker_id: usize, mapper: &M, task: MapTask) -> MapOutcome<M::Output> {
    let start = Instant::now();
    let MapTask { index, path } = task;
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| -> Result<(Vec<M::Output>, u64), FileError> {
        let items: Vec<M::Input> = read_json_array(&path)?;
        let mut values = Vec::with_capacity(items.len());
        let rejected = mapper.do_map(items, &mut |v| values.push(v));
        Ok((values, rejected))
    }));
    let (values, rejected, error) = match attempt {
        Ok(Ok((values, rejected))) => (values, rejected, None),
        Ok(Err(e)) => (Vec::new(), 0, Some(e)),
        Err(_) => (Vec::new(), 0, Some(FileError::WorkerPanicked { path: path.clone() })),
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &error {
        Some(e) => error!(worker_id, file = %path.display(), kind = e.kind(), "map task failed: {}", e),
        None => debug!(worker_id, file = %path.display(), emitted = values.len(), rejected, elapsed_ms, "map task done"),
    }
    MapOutcome { index, path, values, rejected, error, elapsed_ms }
}

/// Runs the map phase on `pool`, then feeds every outcome to `reducer` in file order.
pub fn map_reduce<M, R>(pool: &WorkerPool, mapper: M, reducer: &mut R, files: &[PathBuf]) -> Result<RunSummary, AnalysisError>
where
    M: Mapper + Send + Sync + 'static,
    R: Reducer<ValueIn = M::Output>,
{
    let phase = pool.run_map(Arc::new(mapper), files)?;

    let reduce_start = Instant::now();
    let mut summary = RunSummary { files: files.len(), ..RunSummary::default() };
    for outcome in phase.outcomes {
        if outcome.error.is_some() {
            summary.failed_files += 1;
        }
        summary.emitted += outcome.values.len() as u64;
        summary.rejected += outcome.rejected;
        reducer.do_reduce(outcome.values);
    }
    info!(phase = "reduce",
          values = summary.emitted, failed_files = summary.failed_files,
          wall_ms = reduce_start.elapsed().as_millis() as u64,
          "Reduce phase complete");
    Ok(summary)
}

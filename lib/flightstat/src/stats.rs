use crate::runtime::MapOutcome;
use serde::Serialize;

#[derive(Default, Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MapStats {
    pub workers: usize,
    pub tasks: usize,
    pub failed_tasks: usize,
    pub total_emits: u64,
    pub total_rejected: u64,
    pub min_task_ms: u64,
    pub max_task_ms: u64,
    pub wall_ms: u64,
}

impl MapStats {
    pub fn from_outcomes<T>(outcomes: &[MapOutcome<T>], workers: usize, wall_ms: u64) -> Self {
        if outcomes.is_empty() {
            return Self { workers, wall_ms, ..Self::default() };
        }
        Self {
            workers,
            tasks: outcomes.len(),
            failed_tasks: outcomes.iter().filter(|o| o.error.is_some()).count(),
            total_emits: outcomes.iter().map(|o| o.values.len() as u64).sum(),
            total_rejected: outcomes.iter().map(|o| o.rejected).sum(),
            min_task_ms: outcomes.iter().map(|o| o.elapsed_ms).min().unwrap_or(0),
            max_task_ms: outcomes.iter().map(|o| o.elapsed_ms).max().unwrap_or(0),
            wall_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use std::path::PathBuf;

    fn outcome(index: usize, values: Vec<u8>, rejected: u64, failed: bool, elapsed_ms: u64) -> MapOutcome<u8> {
        let path = PathBuf::from(format!("{}.json", index));
        let error = failed.then(|| FileError::WorkerPanicked { path: path.clone() });
        MapOutcome { index, path, values, rejected, error, elapsed_ms }
    }

    #[test]
    fn aggregates_per_task_numbers() {
        let outcomes = vec![outcome(0, vec![1, 2], 1, false, 7), outcome(1, vec![], 0, true, 2), outcome(2, vec![3], 4, false, 11)];
        let stats = MapStats::from_outcomes(&outcomes, 2, 30);
        assert_eq!(
            stats,
            MapStats { workers: 2, tasks: 3, failed_tasks: 1, total_emits: 3, total_rejected: 5, min_task_ms: 2, max_task_ms: 11, wall_ms: 30 }
        );
    }

    #[test]
    fn empty_phase_has_zero_tasks() {
        let stats = MapStats::from_outcomes::<u8>(&[], 4, 1);
        assert_eq!(stats.tasks, 0);
        assert_eq!(stats.workers, 4);
    }
}

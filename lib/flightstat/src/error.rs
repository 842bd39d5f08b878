use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures. Any of these aborts the analysis before reduce.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("corpus directory {} does not exist", .0.display())]
    CorpusMissing(PathBuf),
    #[error("corpus location {} is not a directory", .0.display())]
    CorpusNotDirectory(PathBuf),
    #[error("cannot list corpus {}: {source}", .path.display())]
    CorpusUnreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid file pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("worker pool failed to start: {0}")]
    PoolStart(#[source] std::io::Error),
}

impl AnalysisError {
    /// True for the "nothing to analyze" family, which callers report distinctly.
    pub fn is_corpus_missing(&self) -> bool {
        matches!(self, AnalysisError::CorpusMissing(_) | AnalysisError::CorpusNotDirectory(_))
    }
}

/// Per-file failures. These are logged and counted; the run continues.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("worker panicked while processing {}", .path.display())]
    WorkerPanicked { path: PathBuf },
}

impl FileError {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileError::Unreadable { path, .. } | FileError::Malformed { path, .. } | FileError::WorkerPanicked { path } => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Unreadable { .. } => "unreadable",
            FileError::Malformed { .. } => "malformed",
            FileError::WorkerPanicked { .. } => "worker_panicked",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: &'static str, min: usize, value: usize },
    #[error("records range is empty: min {min} > max {max}")]
    EmptyRecordRange { min: usize, max: usize },
    #[error("{field} must lie in [{lo}, {hi}], got {value}")]
    OutOfRange { field: &'static str, lo: f64, hi: f64, value: f64 },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot build generator thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

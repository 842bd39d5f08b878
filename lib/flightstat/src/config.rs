use crate::constants::*;
use crate::error::ConfigError;
use crate::utils::{available_parallelism, env_parse, env_var_truthy};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub file_pattern: String,
    pub recursive: bool,
    pub workers: usize,
    pub queue_cap: usize,
    pub top_k: usize,
    pub percentile: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            recursive: false,
            workers: available_parallelism(),
            queue_cap: DEFAULT_QUEUE_CAP,
            top_k: DEFAULT_TOP_K,
            percentile: DEFAULT_PERCENTILE,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by any `FLIGHTS_*` variables that are set and parse.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            data_dir: std::env::var(ENV_DATA_DIR).map(PathBuf::from).unwrap_or(d.data_dir),
            file_pattern: std::env::var(ENV_FILE_PATTERN).unwrap_or(d.file_pattern),
            recursive: env_var_truthy(ENV_RECURSIVE) || d.recursive,
            workers: env_parse(ENV_WORKERS).unwrap_or(d.workers),
            queue_cap: env_parse(ENV_QUEUE_CAP).unwrap_or(d.queue_cap),
            top_k: env_parse(ENV_TOP_K).unwrap_or(d.top_k),
            percentile: env_parse(ENV_PERCENTILE).unwrap_or(d.percentile),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers < 1 {
            return Err(ConfigError::TooSmall { field: "workers", min: 1, value: self.workers });
        }
        if self.queue_cap < 1 {
            return Err(ConfigError::TooSmall { field: "queue_cap", min: 1, value: self.queue_cap });
        }
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(ConfigError::OutOfRange { field: "percentile", lo: 0.0, hi: 100.0, value: self.percentile });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub out_dir: PathBuf,
    pub num_files: usize,
    pub records_min: usize,
    pub records_max: usize,
    pub num_cities: usize,
    pub null_prob_min: f64,
    pub null_prob_max: f64,
    pub threads: usize,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_DATA_DIR),
            num_files: DEFAULT_NUM_FILES,
            records_min: DEFAULT_RECORDS_MIN,
            records_max: DEFAULT_RECORDS_MAX,
            num_cities: DEFAULT_NUM_CITIES,
            null_prob_min: DEFAULT_NULL_PROB_MIN,
            null_prob_max: DEFAULT_NULL_PROB_MAX,
            threads: available_parallelism(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            out_dir: std::env::var(ENV_DATA_DIR).map(PathBuf::from).unwrap_or(d.out_dir),
            num_files: env_parse(ENV_NUM_FILES).unwrap_or(d.num_files),
            num_cities: env_parse(ENV_NUM_CITIES).unwrap_or(d.num_cities),
            threads: env_parse(ENV_GEN_THREADS).unwrap_or(d.threads),
            seed: env_parse(ENV_SEED).or(d.seed),
            ..d
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.records_min < 1 {
            return Err(ConfigError::TooSmall { field: "records_min", min: 1, value: self.records_min });
        }
        if self.records_min > self.records_max {
            return Err(ConfigError::EmptyRecordRange { min: self.records_min, max: self.records_max });
        }
        if self.num_cities < 2 {
            return Err(ConfigError::TooSmall { field: "num_cities", min: 2, value: self.num_cities });
        }
        if self.threads < 1 {
            return Err(ConfigError::TooSmall { field: "threads", min: 1, value: self.threads });
        }
        for (field, value) in [("null_prob_min", self.null_prob_min), ("null_prob_max", self.null_prob_max)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, lo: 0.0, hi: 1.0, value });
            }
        }
        Ok(())
    }
}

//! Centralized environment variable names and default values for flightstat runs.

// Environment variable names
pub const ENV_DATA_DIR: &str = "FLIGHTS_DATA_DIR";
pub const ENV_FILE_PATTERN: &str = "FLIGHTS_FILE_PATTERN";
pub const ENV_RECURSIVE: &str = "FLIGHTS_RECURSIVE";
pub const ENV_WORKERS: &str = "FLIGHTS_WORKERS";
pub const ENV_QUEUE_CAP: &str = "FLIGHTS_QUEUE_CAP";
pub const ENV_TOP_K: &str = "FLIGHTS_TOP_K";
pub const ENV_PERCENTILE: &str = "FLIGHTS_PERCENTILE";
pub const ENV_NUM_FILES: &str = "FLIGHTS_NUM_FILES";
pub const ENV_NUM_CITIES: &str = "FLIGHTS_NUM_CITIES";
pub const ENV_GEN_THREADS: &str = "FLIGHTS_GEN_THREADS";
pub const ENV_SEED: &str = "FLIGHTS_SEED";

// Analysis defaults
pub const DEFAULT_DATA_DIR: &str = "/tmp/flights";
pub const DEFAULT_FILE_PATTERN: &str = "*.json";
pub const DEFAULT_QUEUE_CAP: usize = 1024;
pub const DEFAULT_TOP_K: usize = 25;
pub const DEFAULT_PERCENTILE: f64 = 95.0;
pub const DEFAULT_ANALYSIS_LOG: &str = "result.log";

// Generator defaults
pub const DEFAULT_NUM_FILES: usize = 5000;
pub const DEFAULT_RECORDS_MIN: usize = 50;
pub const DEFAULT_RECORDS_MAX: usize = 100;
pub const DEFAULT_NUM_CITIES: usize = 200;
pub const DEFAULT_NULL_PROB_MIN: f64 = 0.001;
pub const DEFAULT_NULL_PROB_MAX: f64 = 0.005;
pub const DEFAULT_GENERATOR_LOG: &str = "flight_data.log";

// Record value ranges (inclusive)
pub const MIN_FLIGHT_SECS: u32 = 1800; // 30 min
pub const MAX_FLIGHT_SECS: u32 = 54_000; // 15 h
pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 400;
pub const MAX_DAYS_AGO: i64 = 365;

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

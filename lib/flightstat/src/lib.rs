pub mod aggregate;
pub mod analysis;
pub mod api;
pub mod config;
pub mod constants;
pub mod duration_stats;
pub mod error;
pub mod extremum;
pub mod filter;
pub mod generator;
pub mod io;
pub mod logging;
pub mod mapper;
pub mod record;
pub mod report;
pub mod runtime;
pub mod stats;
pub mod topk;
pub mod utils;

pub use aggregate::{Aggregates, Aggregator, DurationIndex, NetFlowIndex};
pub use analysis::analyze;
pub use api::{Mapper, Reducer};
pub use config::{AnalysisConfig, GeneratorConfig};
pub use error::{AnalysisError, ConfigError, FileError, GenerateError};
pub use generator::{generate_corpus, GenerationSummary};
pub use mapper::FlightMapper;
pub use record::{CityKey, FlightRecord, RawRecord};
pub use report::AnalysisReport;
pub use runtime::{map_reduce, WorkerPool};

use crate::duration_stats::CityDurationStats;
use crate::extremum::{CityFlow, Extrema};
use serde::Serialize;
use tracing::info;

/// Every value an analysis run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub files_discovered: usize,
    pub files_failed: usize,
    pub clean_records: u64,
    pub dirty_records: u64,
    pub percentile: f64,
    pub top_cities: Vec<CityDurationStats>,
    pub max_arrival: Option<CityFlow>,
    pub max_departure: Option<CityFlow>,
    pub workers: usize,
    pub elapsed_ms: u64,
}

impl AnalysisReport {
    pub fn set_extrema(&mut self, extrema: Option<Extrema>) {
        if let Some(e) = extrema {
            self.max_arrival = Some(e.max_arrival);
            self.max_departure = Some(e.max_departure);
        }
    }

    /// Same report with run-dependent fields zeroed, for comparing runs.
    pub fn without_timing(&self) -> Self {
        Self { workers: 0, elapsed_ms: 0, ..self.clone() }
    }

    pub fn log(&self) {
        info!(files = self.files_discovered, failed = self.files_failed, "Total files processed");
        info!("Total records processed: {}", self.clean_records);
        info!("Total dirty records ignored: {}", self.dirty_records);
        info!("Analysis completed in {:.2} seconds", self.elapsed_ms as f64 / 1000.0);
        for (rank, c) in self.top_cities.iter().enumerate() {
            info!(rank = rank + 1, city = %c.city, volume = c.volume, avg = c.stats.mean, p = self.percentile, pct_value = c.stats.p95,
                  "Top destination by flight volume");
        }
        match (&self.max_arrival, &self.max_departure) {
            (Some(arr), Some(dep)) => {
                info!("City with max passengers arrived: {} ({} passengers)", arr.city, arr.net_flow);
                info!("City with max passengers left: {} ({} passengers)", dep.city, dep.net_flow.unsigned_abs());
            }
            _ => info!("No clean records, no passenger flow to report"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration_stats::DurationStats;

    fn sample() -> AnalysisReport {
        AnalysisReport {
            files_discovered: 3,
            files_failed: 0,
            clean_records: 10,
            dirty_records: 5,
            percentile: 95.0,
            top_cities: vec![CityDurationStats { city: "City_1".into(), volume: 10, stats: DurationStats { mean: 3600.0, p95: 3600.0 } }],
            max_arrival: None,
            max_departure: None,
            workers: 4,
            elapsed_ms: 12,
        }
    }

    #[test]
    fn serializes_flat_city_stats() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["top_cities"][0]["city"], "City_1");
        assert_eq!(v["top_cities"][0]["mean"], 3600.0);
        assert_eq!(v["top_cities"][0]["p95"], 3600.0);
        assert!(v["max_arrival"].is_null());
    }

    #[test]
    fn extrema_fill_both_slots() {
        let mut r = sample();
        r.set_extrema(Some(Extrema {
            max_arrival: CityFlow { city: "City_1".into(), net_flow: 100 },
            max_departure: CityFlow { city: "City_0".into(), net_flow: -100 },
        }));
        assert_eq!(r.max_departure.as_ref().unwrap().net_flow, -100);
        assert_eq!(r.without_timing().elapsed_ms, 0);
        r.log();
    }
}

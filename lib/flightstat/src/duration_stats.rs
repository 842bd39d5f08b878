use crate::aggregate::DurationIndex;
use crate::record::CityKey;
use crate::topk::CityVolume;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DurationStats {
    pub mean: f64,
    pub p95: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CityDurationStats {
    pub city: CityKey,
    pub volume: usize,
    #[serde(flatten)]
    pub stats: DurationStats,
}

pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Percentile `pct` (0..=100) of ascending `sorted`, interpolating linearly
/// between the order statistics around position `pct/100 * (n - 1)`.
pub fn percentile(sorted: &[u32], pct: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = (pct / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    let (a, b) = (f64::from(sorted[lo]), f64::from(sorted[hi]));
    Some(a + (b - a) * frac)
}

pub fn describe(sorted: &[u32], pct: f64) -> Option<DurationStats> {
    Some(DurationStats { mean: mean(sorted)?, p95: percentile(sorted, pct)? })
}

/// Stats for each ranked city, in rank order. `durations` must hold sorted
/// multisets, as produced by `Aggregator::finish`.
pub fn stats_for_top(durations: &DurationIndex, top: &[CityVolume], pct: f64) -> Vec<CityDurationStats> {
    top.par_iter()
        .filter_map(|cv| {
            let values = durations.get(&cv.city)?;
            let stats = describe(values, pct)?;
            Some(CityDurationStats { city: cv.city.clone(), volume: cv.volume, stats })
        })
        .collect()
}

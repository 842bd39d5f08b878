use crate::aggregate::DurationIndex;
use crate::record::CityKey;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CityVolume {
    pub city: CityKey,
    pub volume: usize,
}

// Higher volume first, then ascending city.
fn by_rank(a: &CityVolume, b: &CityVolume) -> Ordering {
    b.volume.cmp(&a.volume).then_with(|| a.city.cmp(&b.city))
}

/// The `k` destinations with the most recorded flights.
pub fn top_k_by_volume(durations: &DurationIndex, k: usize) -> Vec<CityVolume> {
    if k == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<CityVolume> = durations
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(city, values)| CityVolume { city: city.clone(), volume: values.len() })
        .collect();
    if ranked.len() > k {
        ranked.select_nth_unstable_by(k - 1, by_rank);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(by_rank);
    ranked
}

//! Synthetic corpus producer: many JSON files of flight records, each with at
//! least one dirty record.

use crate::config::GeneratorConfig;
use crate::constants::*;
use crate::error::GenerateError;
use crate::io::write_json_array;
use crate::record::{CityKey, RawRecord, FIELDS};
use chrono::{Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub files_written: usize,
    pub files_failed: usize,
    pub records_written: u64,
    pub dirty_records: u64,
}

pub fn city_universe(n: usize) -> Vec<CityKey> {
    (0..n).map(|i| CityKey::new(format!("City_{}", i))).collect()
}

/// Per-file RNG: reproducible from `seed + index` when seeded.
fn file_rng(seed: Option<u64>, file_index: usize) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(file_index as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Record drawn uniformly from the configured ranges. With a probability
/// itself drawn from `null_prob`, one uniformly chosen field is nulled.
pub fn random_record<R: Rng>(rng: &mut R, cities: &[CityKey], today: NaiveDate, null_prob: (f64, f64)) -> RawRecord {
    let days_ago = rng.gen_range(1..=MAX_DAYS_AGO);
    let date = (today - Duration::days(days_ago)).format("%Y-%m-%d").to_string();
    let pair = index::sample(rng, cities.len(), 2);
    let mut record = RawRecord {
        date: Some(date),
        origin_city: Some(cities[pair.index(0)].clone()),
        destination_city: Some(cities[pair.index(1)].clone()),
        flight_duration_secs: Some(rng.gen_range(MIN_FLIGHT_SECS..=MAX_FLIGHT_SECS)),
        passengers_on_board: Some(rng.gen_range(MIN_PASSENGERS..=MAX_PASSENGERS)),
    };
    let (lo, hi) = if null_prob.0 <= null_prob.1 { null_prob } else { (null_prob.1, null_prob.0) };
    let p = rng.gen_range(lo..=hi);
    if rng.gen::<f64>() < p {
        record.null_field(rng.gen_range(0..FIELDS.len()));
    }
    record
}

/// Nulls one random field of one random record if none is dirty yet.
/// Returns the number of dirty records afterwards.
pub fn ensure_dirty<R: Rng>(rng: &mut R, records: &mut [RawRecord]) -> usize {
    let dirty = records.iter().filter(|r| r.null_count() > 0).count();
    if dirty > 0 || records.is_empty() {
        return dirty;
    }
    let victim = rng.gen_range(0..records.len());
    records[victim].null_field(rng.gen_range(0..FIELDS.len()));
    1
}

pub fn generate_batch<R: Rng>(rng: &mut R, cfg: &GeneratorConfig, cities: &[CityKey], today: NaiveDate) -> (Vec<RawRecord>, usize) {
    let n = rng.gen_range(cfg.records_min..=cfg.records_max);
    let mut records: Vec<RawRecord> = (0..n)
        .map(|_| random_record(rng, cities, today, (cfg.null_prob_min, cfg.null_prob_max)))
        .collect();
    let dirty = ensure_dirty(rng, &mut records);
    (records, dirty)
}

struct FileResult {
    records: usize,
    dirty: usize,
    ok: bool,
}

fn generate_file(cfg: &GeneratorConfig, cities: &[CityKey], month_year: &str, today: NaiveDate, file_index: usize) -> FileResult {
    let mut rng = file_rng(cfg.seed, file_index);
    let name_city = cities.choose(&mut rng).map(|c| c.as_str()).unwrap_or("City_0");
    let path: PathBuf = cfg.out_dir.join(format!("{}-{}-{}-flights.json", month_year, name_city, file_index));
    let (records, dirty) = generate_batch(&mut rng, cfg, cities, today);
    match write_json_array(&path, &records) {
        Ok(()) => {
            debug!(file_index, total = cfg.num_files, path = %path.display(), records = records.len(), null_count = dirty, origin_city = name_city, "Generated file");
            FileResult { records: records.len(), dirty, ok: true }
        }
        Err(e) => {
            error!(path = %path.display(), "Failed to write file: {:#}", e);
            FileResult { records: 0, dirty: 0, ok: false }
        }
    }
}

/// Writes `cfg.num_files` files into `cfg.out_dir` on a dedicated rayon pool.
pub fn generate_corpus(cfg: &GeneratorConfig) -> Result<GenerationSummary, GenerateError> {
    cfg.validate()?;
    std::fs::create_dir_all(&cfg.out_dir).map_err(|source| GenerateError::OutputDir { path: cfg.out_dir.clone(), source })?;
    let cities = city_universe(cfg.num_cities);
    info!("Generated {} unique cities.", cities.len());

    let now = Local::now();
    let month_year = now.format("%m-%y").to_string();
    let today = now.date_naive();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(cfg.threads).build()?;
    info!(files = cfg.num_files, threads = cfg.threads, out_dir = %cfg.out_dir.display(), "Starting flight data generation");

    let results: Vec<FileResult> = pool.install(|| {
        (0..cfg.num_files)
            .into_par_iter()
            .map(|i| generate_file(cfg, &cities, &month_year, today, i))
            .collect()
    });

    let mut summary = GenerationSummary::default();
    for r in results {
        if r.ok {
            summary.files_written += 1;
            summary.records_written += r.records as u64;
            summary.dirty_records += r.dirty as u64;
        } else {
            summary.files_failed += 1;
        }
    }
    info!(files_written = summary.files_written, files_failed = summary.files_failed,
          records = summary.records_written, dirty = summary.dirty_records,
          "Flight data generation completed");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_json_array;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn records_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let cities = city_universe(5);
        for _ in 0..500 {
            let r = random_record(&mut rng, &cities, today(), (0.0, 0.0));
            let clean = r.into_clean().expect("no nulls at zero probability");
            assert_ne!(clean.origin_city, clean.destination_city);
            assert!((MIN_FLIGHT_SECS..=MAX_FLIGHT_SECS).contains(&clean.flight_duration_secs));
            assert!((MIN_PASSENGERS..=MAX_PASSENGERS).contains(&clean.passengers_on_board));
            let date = NaiveDate::parse_from_str(&clean.date, "%Y-%m-%d").unwrap();
            assert!(date < today() && date >= today() - Duration::days(MAX_DAYS_AGO));
        }
    }

    #[test]
    fn certain_null_probability_nulls_exactly_one_field() {
        let mut rng = StdRng::seed_from_u64(11);
        let cities = city_universe(3);
        for _ in 0..100 {
            assert_eq!(random_record(&mut rng, &cities, today(), (1.0, 1.0)).null_count(), 1);
        }
    }

    #[test]
    fn every_batch_has_a_dirty_record() {
        let cfg = GeneratorConfig { records_min: 1, records_max: 4, null_prob_min: 0.0, null_prob_max: 0.0, ..GeneratorConfig::default() };
        let cities = city_universe(10);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let (records, dirty) = generate_batch(&mut rng, &cfg, &cities, today());
            assert!((1..=4).contains(&records.len()));
            assert_eq!(dirty, 1);
            assert_eq!(records.iter().filter(|r| r.null_count() > 0).count(), 1);
        }
    }

    #[test]
    fn seeded_corpus_is_reproducible() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let base = GeneratorConfig { num_files: 6, records_min: 5, records_max: 9, num_cities: 12, threads: 2, seed: Some(42), ..GeneratorConfig::default() };
        let sa = generate_corpus(&GeneratorConfig { out_dir: a.path().to_path_buf(), ..base.clone() }).unwrap();
        let sb = generate_corpus(&GeneratorConfig { out_dir: b.path().to_path_buf(), threads: 1, ..base }).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(sa.files_written, 6);
        assert!(sa.dirty_records >= 6);

        let mut names: Vec<_> = std::fs::read_dir(a.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        names.sort();
        assert_eq!(names.len(), 6);
        for name in names {
            let name_str = name.to_string_lossy().into_owned();
            assert!(name_str.ends_with("-flights.json"), "{}", name_str);
            let ra: Vec<RawRecord> = read_json_array(&a.path().join(&name)).unwrap();
            let rb: Vec<RawRecord> = read_json_array(&b.path().join(&name)).unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GeneratorConfig { num_cities: 1, ..GeneratorConfig::default() };
        assert!(matches!(generate_corpus(&cfg), Err(GenerateError::Config(_))));
    }
}

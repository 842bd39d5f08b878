use flightstat::aggregate::Aggregator;
use flightstat::io::{discover_files, write_json_array};
use flightstat::{analyze, map_reduce, AnalysisConfig, AnalysisError, FlightMapper, GeneratorConfig, RawRecord, WorkerPool};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn record(origin: &str, dest: &str, secs: u32, pax: u32) -> RawRecord {
    RawRecord {
        date: Some("2024-06-15".into()),
        origin_city: Some(origin.into()),
        destination_city: Some(dest.into()),
        flight_duration_secs: Some(secs),
        passengers_on_board: Some(pax),
    }
}

fn config(dir: &Path, workers: usize) -> AnalysisConfig {
    AnalysisConfig::default().with_data_dir(dir).with_workers(workers)
}

/// File A: ten clean flights into City_1. File B: five dirty records. File C: empty.
fn three_file_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let a: Vec<RawRecord> = (0..10).map(|i| record(&format!("City_{}", 2 + i % 3), "City_1", 1800 + 600 * i, 10)).collect();
    let b: Vec<RawRecord> = (0..5)
        .map(|i| {
            let mut r = record("City_1", "City_2", 3600, 50);
            r.null_field(i);
            r
        })
        .collect();
    write_json_array(&dir.path().join("a-flights.json"), &a).unwrap();
    write_json_array(&dir.path().join("b-flights.json"), &b).unwrap();
    fs::write(dir.path().join("c-flights.json"), "[]").unwrap();
    dir
}

#[test]
fn three_file_scenario() {
    let dir = three_file_corpus();
    let report = analyze(&config(dir.path(), 3)).unwrap();

    assert_eq!(report.files_discovered, 3);
    assert_eq!(report.files_failed, 0);
    assert_eq!(report.clean_records, 10);
    assert_eq!(report.dirty_records, 5);
    assert_eq!(report.top_cities.len(), 1);
    assert_eq!(report.top_cities[0].city.as_str(), "City_1");
    assert_eq!(report.top_cities[0].volume, 10);

    let arrival = report.max_arrival.as_ref().unwrap();
    assert_eq!(arrival.city.as_str(), "City_1");
    assert_eq!(arrival.net_flow, 100);
    // 4 flights from City_2, 3 each from City_3 and City_4.
    let departure = report.max_departure.as_ref().unwrap();
    assert_eq!(departure.city.as_str(), "City_2");
    assert_eq!(departure.net_flow, -40);
}

#[test]
fn three_file_aggregates_conserve_passengers() {
    let dir = three_file_corpus();
    let files = discover_files(dir.path(), "*.json", false).unwrap();
    let mut agg = Aggregator::new();
    let summary = map_reduce(&WorkerPool::new(2, 1), FlightMapper::new(), &mut agg, &files).unwrap();
    assert_eq!(summary.rejected, 5);
    let agg = agg.finish();
    assert_eq!(agg.net_flow_total(), 0);
    assert_eq!(agg.net_flow.len(), 4);
    assert_eq!(agg.durations.len(), 1);
    assert_eq!(agg.durations["City_1"].len(), 10);
}

#[test]
fn missing_corpus_is_reported_not_processed() {
    let dir = TempDir::new().unwrap();
    let err = analyze(&config(&dir.path().join("nope"), 2)).unwrap_err();
    assert!(matches!(err, AnalysisError::CorpusMissing(_)));
    assert!(err.is_corpus_missing());
}

#[test]
fn empty_corpus_is_zero_work() {
    let dir = TempDir::new().unwrap();
    let report = analyze(&config(dir.path(), 2)).unwrap();
    assert_eq!(report.files_discovered, 0);
    assert_eq!(report.clean_records, 0);
    assert!(report.top_cities.is_empty());
    assert!(report.max_arrival.is_none() && report.max_departure.is_none());
}

#[test]
fn malformed_file_is_isolated() {
    let dir = three_file_corpus();
    fs::write(dir.path().join("d-flights.json"), "{ this is not json").unwrap();
    fs::write(dir.path().join("e-flights.json"), r#"[{"date": "2024-01-01", "flight_duration_secs": "long"}]"#).unwrap();

    let report = analyze(&config(dir.path(), 4)).unwrap();
    assert_eq!(report.files_discovered, 5);
    assert_eq!(report.files_failed, 2);
    assert_eq!(report.clean_records, 10);
    assert_eq!(report.dirty_records, 5);
}

#[test]
fn worker_count_does_not_change_results() {
    let dir = TempDir::new().unwrap();
    let gen = GeneratorConfig {
        out_dir: dir.path().to_path_buf(),
        num_files: 40,
        records_min: 20,
        records_max: 40,
        num_cities: 30,
        null_prob_min: 0.05,
        null_prob_max: 0.1,
        threads: 2,
        seed: Some(2024),
    };
    let generated = flightstat::generate_corpus(&gen).unwrap();

    let baseline = analyze(&config(dir.path(), 1)).unwrap();
    assert_eq!(baseline.files_discovered, 40);
    assert_eq!(baseline.clean_records + baseline.dirty_records, generated.records_written);
    assert_eq!(baseline.dirty_records, generated.dirty_records);
    assert_eq!(baseline.top_cities.len(), 25);
    for w in baseline.top_cities.windows(2) {
        assert!(w[0].volume > w[1].volume || (w[0].volume == w[1].volume && w[0].city < w[1].city));
    }

    for workers in [2, 3, 8] {
        let report = analyze(&config(dir.path(), workers)).unwrap();
        assert_eq!(report.without_timing(), baseline.without_timing(), "workers = {}", workers);
    }
    // Unchanged corpus, same answer.
    assert_eq!(analyze(&config(dir.path(), 1)).unwrap().without_timing(), baseline.without_timing());

    let files = discover_files(dir.path(), "*.json", false).unwrap();
    let mut one = Aggregator::new();
    map_reduce(&WorkerPool::new(1, 1), FlightMapper::new(), &mut one, &files).unwrap();
    let mut many = Aggregator::new();
    map_reduce(&WorkerPool::new(6, 3), FlightMapper::new(), &mut many, &files).unwrap();
    let (one, many) = (one.finish(), many.finish());
    assert_eq!(one, many);
    assert_eq!(one.net_flow_total(), 0);
}

#[test]
fn top_k_is_bounded_by_destination_count() {
    let dir = TempDir::new().unwrap();
    let recs: Vec<RawRecord> = (0..7).flat_map(|d| (0..=d).map(move |_| record("City_0", &format!("City_{}", d + 1), 2000, 3))).collect();
    write_json_array(&dir.path().join("x.json"), &recs).unwrap();

    let report = analyze(&config(dir.path(), 2)).unwrap();
    assert_eq!(report.top_cities.len(), 7);
    assert_eq!(report.top_cities[0].city.as_str(), "City_7");
    assert_eq!(report.top_cities[0].volume, 7);

    let narrow = AnalysisConfig { top_k: 3, ..config(dir.path(), 2) };
    assert_eq!(analyze(&narrow).unwrap().top_cities.len(), 3);
}

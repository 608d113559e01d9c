//! Integration tests for cdist timings

use cdist_timings::{
    Config, DataGenerator, Harness, LoopMatcher, Matcher, SweepConfig, Timer, VectorisedMatcher,
};

fn create_test_config() -> Config {
    Config {
        loops: 2,
        repeats: 2,
        seed: Some(2024),
        sweep: SweepConfig {
            dimensions: vec![8],
            vector_lengths: vec![5],
        },
        ..Config::default()
    }
}

#[test]
fn test_corrected_matchers_agree_on_small_seeded_input() {
    let mut generator = DataGenerator::from_seed(42);
    let data = generator.generate(4, 2).unwrap();

    let loop_pair = LoopMatcher::corrected().find_closest(&data).unwrap().unwrap();
    let vectorised_pair = VectorisedMatcher.find_closest(&data).unwrap().unwrap();

    assert_eq!(
        (loop_pair.row_a, loop_pair.row_b),
        (vectorised_pair.row_a, vectorised_pair.row_b)
    );
    assert!((loop_pair.distance - vectorised_pair.distance).abs() < 1e-12);
}

#[test]
fn test_matchers_are_deterministic_on_fixed_input() {
    let mut generator = DataGenerator::from_seed(7);
    let data = generator.generate(20, 16).unwrap();

    let loop_matcher = LoopMatcher::new();
    let first = loop_matcher.find_closest(&data).unwrap();
    let second = loop_matcher.find_closest(&data).unwrap();
    assert_eq!(first, second);

    let first = VectorisedMatcher.find_closest(&data).unwrap();
    let second = VectorisedMatcher.find_closest(&data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_distances_are_within_unit_range_for_non_negative_input() {
    let mut generator = DataGenerator::from_seed(3);
    let data = generator.generate(10, 6).unwrap();

    let flat = VectorisedMatcher.flattened_distances(&data).unwrap();
    assert_eq!(flat.len(), 100);
    assert!(flat.iter().all(|d| (0.0..=1.0).contains(d)));
}

#[test]
fn test_stub_callable_records_every_repeat() {
    let mut timer = Timer::new(|| -> cdist_timings::Result<()> { Ok(()) });
    let samples = timer.repeat(5, 1).unwrap();

    assert_eq!(samples.len(), 5);
    let expected = samples.durations().iter().sum::<f64>() / 5.0;
    assert!((samples.mean().unwrap() - expected).abs() < 1e-15);

    let single = timer.repeat(1, 1).unwrap();
    assert_eq!(single.mean().unwrap(), single.durations()[0]);
}

#[test]
fn test_harness_end_to_end() {
    let mut harness = Harness::new(create_test_config()).unwrap();
    let mut out = Vec::new();

    let report = harness.run(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(report.cases.len(), 1);
    let case = &report.cases[0];
    assert_eq!(case.runs.len(), 2);
    assert!(case.loop_mean > 0.0);
    assert!(case.vectorised_mean > 0.0);
    assert!(case.speedup > 0.0);
    for run in &case.runs {
        assert!(run.loop_pair.is_some());
        assert!(run.vectorised_pair.is_some());
    }

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Starting benchmarks, running 2 loops");
    assert_eq!(lines[2], "Timing run 1");
    assert_eq!(lines[3], "running loop implementation");
    assert!(lines[4].starts_with("average loop duration = "));
    assert_eq!(lines[5], "running vectorised - - - - - - -");
    assert!(lines[6].starts_with("average vectorised duration = "));
    assert!(lines[7].starts_with("vectorised is "));
    assert!(lines[7].ends_with(" times faster"));
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.loops, 10);
    assert_eq!(config.sweep.dimensions, vec![1000]);
    assert_eq!(config.sweep.vector_lengths, vec![100]);
    assert!(!config.matcher.scan_from_first_row);
}

#[test]
fn test_config_from_env() {
    std::env::set_var("CDIST_SCAN_FROM_FIRST_ROW", "true");
    std::env::set_var("CDIST_LOG_LEVEL", "debug");
    let config = Config::from_env().unwrap();
    assert!(config.matcher.scan_from_first_row);
    assert_eq!(config.log_level, "debug");
    std::env::remove_var("CDIST_SCAN_FROM_FIRST_ROW");
    std::env::remove_var("CDIST_LOG_LEVEL");
}

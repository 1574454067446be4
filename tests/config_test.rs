use bodyforge::config::{parse_overrides, Config};
use bodyforge::error::BodyForgeError;
use bodyforge::measurement::MeasurementKey;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct Harness {
    #[command(flatten)]
    config: Config,
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.probe.probe_samples, 1_000);
    assert_eq!(config.probe.probe_seed, 42);
    assert!((config.probe.probe_spread - 0.1).abs() < f64::EPSILON);
    assert!(!config.output.json);
    assert_eq!(config.output.table_precision, 6);
}

#[test]
fn test_load_partial_file_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "probe": {{ "probe_samples": 10 }} }}"#).unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.probe.probe_samples, 10);
    assert_eq!(config.probe.probe_seed, 42);
    assert!(!config.output.show_chain);
}

#[test]
fn test_load_rejects_bad_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "probe_samples = 10").unwrap();
    assert!(matches!(
        Config::load_from_file(file.path()),
        Err(BodyForgeError::Json(_))
    ));
}

#[test]
fn test_cli_flags_override_file_values() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "probe": {{ "probe_samples": 10, "probe_seed": 7 }},
            "output": {{ "table_precision": 3 }} }}"#
    )
    .unwrap();
    let mut config = Config::load_from_file(file.path()).unwrap();

    let matches = Harness::command().get_matches_from(["test", "--probe-samples", "99", "--json"]);
    let cli = Harness::from_arg_matches(&matches).unwrap();
    config.merge_from_cli(&cli.config, &matches);

    assert_eq!(config.probe.probe_samples, 99);
    assert!(config.output.json);
    // Untouched flags keep the file's values, not clap's defaults.
    assert_eq!(config.probe.probe_seed, 7);
    assert_eq!(config.output.table_precision, 3);
}

#[test]
fn test_parse_overrides() {
    let parsed = parse_overrides("Height=185, Thigh Length = 50 ,Body Fat=22.5").unwrap();
    assert_eq!(
        parsed,
        vec![
            (MeasurementKey::Height, 185.0),
            (MeasurementKey::ThighLength, 50.0),
            (MeasurementKey::BodyFat, 22.5),
        ]
    );
}

#[test]
fn test_parse_overrides_empty() {
    assert!(parse_overrides("").unwrap().is_empty());
    assert!(parse_overrides(" , ").unwrap().is_empty());
}

#[test]
fn test_parse_overrides_errors() {
    for bad in ["Height", "Wingspan=10", "Height=tall"] {
        assert!(
            matches!(parse_overrides(bad), Err(BodyForgeError::InvalidInput(_))),
            "{}",
            bad
        );
    }
}

#[test]
fn test_parse_overrides_rejects_non_finite() {
    for bad in ["Height=NaN", "Thigh Length=inf", "Body Fat=-infinity"] {
        match parse_overrides(bad) {
            Err(BodyForgeError::InvalidInput(msg)) => {
                assert!(msg.contains("not a finite number"), "{}: {}", bad, msg)
            }
            other => panic!("{}: expected InvalidInput, got {:?}", bad, other),
        }
    }
}

mod common;

use bodyforge::batch::{load_rows, read_rows, solve_all};
use bodyforge::error::BodyForgeError;
use bodyforge::measurement::MeasurementKey;
use bodyforge::variant::Variant;
use common::solver;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const FEMALE_HEADER: &str = concat!(
    "id,Height,Thigh Length,Calf Length,Feet Length,Neck Length,Shoulder Width,",
    "Upper Arm Length,Forearm Length,Hand Length,Muscle,Body Fat,Neck Thickness,",
    "Bust,Underbust,Waist,Belly,Hips,Thigh Size,Calf Size,Upper Arm Size,Forearm Size,Hand Size"
);
const FEMALE_BASIS: &str = concat!(
    "168,43.5,42.8,23.2,10.2,37.8,23.4,22.1,17.2,20,28,31.5,",
    "91,76,68,78,98,56,35.5,27,22.5,18"
);

#[test]
fn test_read_rows_parses_labels_and_ids() {
    let csv = format!("{}\nalice,{}\n", FEMALE_HEADER, FEMALE_BASIS);
    let rows = read_rows(Cursor::new(csv)).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "alice");
    assert_eq!(rows[0].inputs.len(), 22);
    assert_eq!(rows[0].inputs.value(MeasurementKey::ThighLength), Some(43.5));
    assert_eq!(rows[0].inputs.value(MeasurementKey::BodyFat), Some(28.0));
}

#[test]
fn test_read_rows_defaults_ids_and_skips_blanks() {
    let csv = "Height, Waist ,Notes\n170,,tall\n ,65,\n";
    let rows = read_rows(Cursor::new(csv)).unwrap();

    assert_eq!(rows[0].id, "row-1");
    assert_eq!(rows[1].id, "row-2");
    assert_eq!(rows[0].inputs.value(MeasurementKey::Height), Some(170.0));
    assert!(!rows[0].inputs.contains(MeasurementKey::Waist));
    assert_eq!(rows[1].inputs.value(MeasurementKey::Waist), Some(65.0));
    assert_eq!(rows[1].inputs.len(), 1);
}

#[test]
fn test_read_rows_rejects_bad_number() {
    let csv = "Height,Waist\n170,slim\n";
    let err = read_rows(Cursor::new(csv)).unwrap_err();
    match err {
        BodyForgeError::InvalidInput(msg) => {
            assert!(msg.contains("row 1"));
            assert!(msg.contains("Waist"));
        }
        other => panic!("expected InvalidInput, got {}", other),
    }
}

#[test]
fn test_solve_all_keeps_order_and_isolates_failures() {
    let s = solver(Variant::Female);
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", FEMALE_HEADER).unwrap();
    writeln!(file, "base,{}", FEMALE_BASIS).unwrap();
    // No height: the spine stage cannot run.
    let (_, below_height) = FEMALE_BASIS.split_once(',').unwrap();
    writeln!(file, "broken,,{}", below_height).unwrap();
    writeln!(file, "tall,180,{}", below_height).unwrap();

    let rows = load_rows(file.path()).unwrap();
    let outcomes = solve_all(&s, &rows);

    let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["base", "broken", "tall"]);

    assert!(outcomes[0].is_ok());
    assert!(outcomes[0].output.as_ref().unwrap().is_neutral());

    assert!(!outcomes[1].is_ok());
    assert!(outcomes[1].error.as_ref().unwrap().contains("Height"));

    let tall = outcomes[2].output.as_ref().unwrap();
    assert!(tall.bone("spine").unwrap().y > 1.0);
}

#[test]
fn test_outcome_serializes_without_empty_fields() {
    let s = solver(Variant::Female);
    let rows = read_rows(Cursor::new("id,Height\nshort,150\n")).unwrap();
    let outcomes = solve_all(&s, &rows);

    let json = serde_json::to_value(&outcomes[0]).unwrap();
    assert_eq!(json["id"], "short");
    assert!(json.get("output").is_none());
    assert!(json["error"].as_str().unwrap().contains("Missing measurement"));
}

#[test]
fn test_read_rows_rejects_non_finite() {
    for cell in ["NaN", "inf", "-Infinity"] {
        let csv = format!("id,Height\nx,{}\n", cell);
        match read_rows(Cursor::new(csv)) {
            Err(BodyForgeError::InvalidInput(msg)) => {
                assert!(msg.contains("Height"), "{}", msg);
                assert!(msg.contains("not a finite number"), "{}", msg);
            }
            other => panic!("{}: expected InvalidInput, got {:?}", cell, other.map(|r| r.len())),
        }
    }
}

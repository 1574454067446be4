#![allow(dead_code)]

use bodyforge::dataset::BodyDataset;
use bodyforge::measurement::{MeasurementKey, MeasurementVector};
use bodyforge::solver::BodySolver;
use bodyforge::variant::Variant;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub fn data_path(variant: Variant) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(variant.dataset_file())
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_dataset(variant: Variant) -> BodyDataset {
    BodyDataset::load_from_file(data_path(variant), variant).unwrap()
}

pub fn solver(variant: Variant) -> BodySolver {
    BodySolver::load(data_path(variant), variant).unwrap()
}

/// Solver over a dataset tweaked by `edit`. Validation still runs.
pub fn solver_with(
    variant: Variant,
    edit: impl FnOnce(&mut BodyDataset),
) -> bodyforge::BfResult<BodySolver> {
    let mut dataset = load_dataset(variant);
    edit(&mut dataset);
    BodySolver::new(Arc::new(dataset), variant)
}

/// Slider defaults with a few keys overridden.
pub fn inputs_with(solver: &BodySolver, overrides: &[(MeasurementKey, f64)]) -> MeasurementVector {
    let mut inputs = solver.default_inputs();
    for &(key, value) in overrides {
        inputs.insert(key, value);
    }
    inputs
}

pub fn write_json(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

pub fn dataset_json(variant: Variant) -> serde_json::Value {
    let text = std::fs::read_to_string(data_path(variant)).unwrap();
    serde_json::from_str(&text).unwrap()
}

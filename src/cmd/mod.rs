pub mod basis;
pub mod batch;
pub mod probe;
pub mod solve;

use bodyforge::config::parse_overrides;
use bodyforge::error::BfResult;
use bodyforge::measurement::MeasurementVector;
use bodyforge::solver::BodySolver;
use std::fs;
use tracing::info;

/// Dataset basis as sliders, then the optional JSON input file, then `--set`.
pub fn resolve_inputs(
    solver: &BodySolver,
    input: Option<&str>,
    overrides: &str,
) -> BfResult<MeasurementVector> {
    let mut inputs = solver.default_inputs();

    if let Some(path) = input {
        info!("Reading measurements from: {}", path);
        let content = fs::read_to_string(path)?;
        let file_inputs: MeasurementVector = serde_json::from_str(&content)?;
        for (key, value) in file_inputs.iter() {
            inputs.insert(key, value);
        }
    }

    for (key, value) in parse_overrides(overrides)? {
        inputs.insert(key, value);
    }
    Ok(inputs)
}

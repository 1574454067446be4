use crate::error::{BfResult, BodyForgeError};
use crate::measurement::{parse_value, MeasurementKey, MeasurementVector};
use crate::solver::{BodyDimensions, BodySolver};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Column holding an optional row label.
pub const ID_COLUMN: &str = "id";

#[derive(Debug, Clone)]
pub struct BatchRow {
    pub id: String,
    pub inputs: MeasurementVector,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<BodyDimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.output.is_some()
    }
}

enum Column {
    Id,
    Measurement(MeasurementKey),
    Ignored,
}

pub fn load_rows<P: AsRef<Path>>(path: P) -> BfResult<Vec<BatchRow>> {
    let file = File::open(path)?;
    read_rows(file)
}

/// Reads raw measurement rows. The header names measurements by label
/// (`Height`, `Thigh Length`, ...). Empty cells leave the key out.
pub fn read_rows<R: Read>(reader: R) -> BfResult<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = rdr
        .headers()?
        .iter()
        .map(|h| {
            if h.eq_ignore_ascii_case(ID_COLUMN) {
                Column::Id
            } else if let Ok(key) = h.parse::<MeasurementKey>() {
                Column::Measurement(key)
            } else {
                warn!("Ignoring unknown column '{}'", h);
                Column::Ignored
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let mut id = format!("row-{}", idx + 1);
        let mut inputs = MeasurementVector::new();

        for (column, cell) in columns.iter().zip(record.iter()) {
            match column {
                Column::Id if !cell.is_empty() => id = cell.to_string(),
                Column::Measurement(key) if !cell.is_empty() => {
                    let value = parse_value(cell).ok_or_else(|| {
                        BodyForgeError::InvalidInput(format!(
                            "row {}: '{}' is not a finite number for '{}'",
                            idx + 1,
                            cell,
                            key
                        ))
                    })?;
                    inputs.insert(*key, value);
                }
                _ => {}
            }
        }
        rows.push(BatchRow { id, inputs });
    }

    Ok(rows)
}

/// Solves every row in parallel. Outcomes keep the input order.
pub fn solve_all(solver: &BodySolver, rows: &[BatchRow]) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = rows
        .par_iter()
        .map(|row| match solver.solve(&row.inputs) {
            Ok(output) => BatchOutcome {
                id: row.id.clone(),
                output: Some(output),
                error: None,
            },
            Err(e) => BatchOutcome {
                id: row.id.clone(),
                output: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        "Batch solved {} rows ({} failed)",
        outcomes.len(),
        failed
    );
    outcomes
}

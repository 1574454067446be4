use crate::measurement::MeasurementKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BodyForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Missing measurement '{key}' required by {stage}")]
    MissingKey {
        key: MeasurementKey,
        stage: &'static str,
    },

    #[error("Division by zero in {stage} (driving key '{key}')")]
    DivisionByZero {
        stage: String,
        key: MeasurementKey,
    },

    #[error("Singular coefficient matrix: pivot {pivot:e} in column {column}")]
    SingularMatrix { column: usize, pivot: f64 },
}

impl BodyForgeError {
    /// Short stable label, used when tallying failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::Json(_) => "json",
            Self::InvalidDataset(_) => "invalid_dataset",
            Self::InvalidInput(_) => "invalid_input",
            Self::MissingKey { .. } => "missing_key",
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::SingularMatrix { .. } => "singular_matrix",
        }
    }
}

pub type BfResult<T> = Result<T, BodyForgeError>;

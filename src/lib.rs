pub mod adjust;
pub mod api;
pub mod batch;
pub mod config;
pub mod consts;
pub mod dataset;
pub mod error;
pub mod measurement;
pub mod probe;
pub mod solver;
pub mod variant;
// cmd and reports belong to the binary (main.rs).

pub use crate::dataset::BodyDataset;
pub use crate::error::{BfResult, BodyForgeError};
pub use crate::measurement::{MeasurementKey, MeasurementVector};
pub use crate::solver::{BodyDimensions, BodySolver};
pub use crate::variant::Variant;

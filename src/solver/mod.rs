pub mod linear;
pub mod output;
pub mod segments;
pub mod shape_keys;

pub use self::output::{BodyDimensions, BoneScale, ShapeKeyWeight, Vec3};
pub use self::segments::{SegmentChain, SegmentStage};
pub use self::shape_keys::{CategoryFractions, ShapeKeySolution};

use crate::adjust;
use crate::dataset::BodyDataset;
use crate::error::{BfResult, BodyForgeError};
use crate::measurement::MeasurementVector;
use crate::variant::Variant;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Everything one solve produced, for diagnostics.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub adjusted: MeasurementVector,
    pub chain: SegmentChain,
    pub shape_keys: ShapeKeySolution,
    pub output: BodyDimensions,
}

/// Measurement-to-deformation solver for one variant.
///
/// Cheap to clone; the dataset is shared. `solve` is a pure function of the
/// raw inputs and the dataset, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct BodySolver {
    dataset: Arc<BodyDataset>,
    variant: Variant,
}

impl BodySolver {
    pub fn new(dataset: Arc<BodyDataset>, variant: Variant) -> BfResult<Self> {
        dataset.validate(variant)?;
        Ok(Self { dataset, variant })
    }

    pub fn load<P: AsRef<Path>>(path: P, variant: Variant) -> BfResult<Self> {
        let dataset = BodyDataset::load_from_file(path, variant)?;
        Ok(Self {
            dataset: Arc::new(dataset),
            variant,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn dataset(&self) -> &BodyDataset {
        &self.dataset
    }

    /// Raw slider values in, deformation lists out.
    pub fn solve(&self, raw: &MeasurementVector) -> BfResult<BodyDimensions> {
        self.solve_detailed(raw).map(|report| report.output)
    }

    pub fn solve_detailed(&self, raw: &MeasurementVector) -> BfResult<SolveReport> {
        if let Some((key, value)) = raw.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BodyForgeError::InvalidInput(format!(
                "'{}' must be finite, got {}",
                key,
                value
            )));
        }
        let adjusted = adjust::adjust_inputs(raw, self.variant);
        self.solve_adjusted(adjusted)
    }

    /// Entry point for callers that already ran the input adjuster.
    pub fn solve_adjusted(&self, adjusted: MeasurementVector) -> BfResult<SolveReport> {
        let chain = segments::propagate(&self.dataset, self.variant, &adjusted)?;
        let final_virtual = chain.final_virtual().ok_or_else(|| {
            BodyForgeError::InvalidDataset("segment chain is empty".to_string())
        })?;
        let shape_keys =
            shape_keys::solve_shape_keys(&self.dataset, self.variant, &adjusted, final_virtual)?;
        let output = output::format_outputs(self.variant, &chain, &shape_keys)?;

        debug!(
            "Solved {}: {} weights, {} bones",
            self.variant,
            output.body_dimensions.len(),
            output.body_dimension_lengths.len()
        );

        Ok(SolveReport {
            adjusted,
            chain,
            shape_keys,
            output,
        })
    }

    /// Slider values that reproduce the dataset basis, plus neutral head controls.
    pub fn default_inputs(&self) -> MeasurementVector {
        let mut inputs = adjust::to_user_facing(&self.dataset.basis, self.variant);
        for (key, value) in adjust::passthrough_defaults().iter() {
            inputs.insert(key, value);
        }
        inputs
    }
}

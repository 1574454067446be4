use crate::config::ProbeParams;
use crate::error::BfResult;
use crate::measurement::MeasurementVector;
use crate::solver::{BodyDimensions, BodySolver};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Aggregate of a randomized robustness run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeSummary {
    pub samples: usize,
    pub succeeded: usize,
    /// Failure count per error kind.
    pub failures: BTreeMap<&'static str, usize>,
    pub min_scale: f64,
    pub max_scale: f64,
    pub max_abs_weight: f64,
}

impl ProbeSummary {
    fn empty(samples: usize) -> Self {
        Self {
            samples,
            succeeded: 0,
            failures: BTreeMap::new(),
            min_scale: f64::INFINITY,
            max_scale: f64::NEG_INFINITY,
            max_abs_weight: 0.0,
        }
    }

    fn record(&mut self, outcome: &BfResult<BodyDimensions>) {
        match outcome {
            Ok(dims) => {
                self.succeeded += 1;
                for bone in &dims.body_dimension_lengths {
                    self.min_scale = self.min_scale.min(bone.value.y);
                    self.max_scale = self.max_scale.max(bone.value.y);
                }
                for w in &dims.body_dimensions {
                    self.max_abs_weight = self.max_abs_weight.max(w.value.abs());
                }
            }
            Err(e) => *self.failures.entry(e.kind()).or_insert(0) += 1,
        }
    }
}

/// Jitters every measurement of `base` by up to `probe_spread` (relative).
///
/// Sample `i` is seeded with `probe_seed + i`, so a run is reproducible no
/// matter how rayon schedules it.
pub fn perturb(base: &MeasurementVector, spread: f64, seed: u64) -> MeasurementVector {
    let mut rng = fastrand::Rng::with_seed(seed);
    base.iter()
        .map(|(key, value)| {
            let factor = 1.0 + spread * (2.0 * rng.f64() - 1.0);
            (key, value * factor)
        })
        .collect()
}

pub fn run_probe(
    solver: &BodySolver,
    base: &MeasurementVector,
    params: &ProbeParams,
) -> ProbeSummary {
    let outcomes: Vec<BfResult<BodyDimensions>> = (0..params.probe_samples)
        .into_par_iter()
        .map(|i| {
            let seed = params.probe_seed.wrapping_add(i as u64);
            solver.solve(&perturb(base, params.probe_spread, seed))
        })
        .collect();

    let mut summary = ProbeSummary::empty(params.probe_samples);
    for outcome in &outcomes {
        summary.record(outcome);
    }

    info!(
        "Probe: {}/{} solves succeeded ({} failure kinds)",
        summary.succeeded,
        summary.samples,
        summary.failures.len()
    );
    summary
}

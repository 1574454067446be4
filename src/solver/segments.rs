use crate::consts::SPINE_EXTRAPOLATION;
use crate::dataset::BodyDataset;
use crate::error::{BfResult, BodyForgeError};
use crate::measurement::{MeasurementKey, MeasurementVector};
use crate::variant::{Segment, Variant};
use tracing::trace;

/// Result of one link of the chain.
#[derive(Debug, Clone)]
pub struct SegmentStage {
    pub segment: Segment,
    /// `None` for the spine, which is driven by the torso remainder.
    pub driving_key: Option<MeasurementKey>,
    pub scale: f64,
    /// What the basis skeleton looks like once stretched through this stage.
    pub virtual_state: MeasurementVector,
}

#[derive(Debug, Clone)]
pub struct SegmentChain {
    pub stages: Vec<SegmentStage>,
}

impl SegmentChain {
    pub fn scale(&self, segment: Segment) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.segment == segment)
            .map(|s| s.scale)
    }

    /// Virtual vector after the last stage. Empty only for an empty chain.
    pub fn final_virtual(&self) -> Option<&MeasurementVector> {
        self.stages.last().map(|s| &s.virtual_state)
    }
}

/// Runs the spine stage and then every following segment in chain order.
pub fn propagate(
    dataset: &BodyDataset,
    variant: Variant,
    real: &MeasurementVector,
) -> BfResult<SegmentChain> {
    let mut stages: Vec<SegmentStage> = Vec::with_capacity(variant.segments().len());

    for &segment in variant.segments() {
        let stage = match stages.last() {
            None => spine_stage(dataset, real)?,
            Some(prev) => follow_stage(dataset, segment, &prev.virtual_state, real)?,
        };
        trace!(
            "Stage {}: scale={:.6} ({} keys)",
            segment,
            stage.scale,
            stage.virtual_state.len()
        );
        stages.push(stage);
    }

    Ok(SegmentChain { stages })
}

fn spine_stage(dataset: &BodyDataset, real: &MeasurementVector) -> BfResult<SegmentStage> {
    const STAGE: &str = "spine stage";
    let real_torso = real.get(MeasurementKey::Height, STAGE)?
        - dataset.extra.head_length
        - real.get(MeasurementKey::NeckLength, STAGE)?
        - real.get(MeasurementKey::ThighLength, STAGE)?
        - real.get(MeasurementKey::CalfLength, STAGE)?;
    let scale = real_torso / dataset.extra.torso_length;

    let row = dataset.row(Segment::Spine)?;
    let mut virtual_state = MeasurementVector::new();
    for &key in &dataset.keys {
        let base = dataset.basis.get(key, STAGE)?;
        let delta = row.get(key, STAGE)? - base;
        virtual_state.insert(key, base + SPINE_EXTRAPOLATION * delta * (scale - 1.0));
    }

    Ok(SegmentStage {
        segment: Segment::Spine,
        driving_key: None,
        scale,
        virtual_state,
    })
}

fn follow_stage(
    dataset: &BodyDataset,
    segment: Segment,
    prev: &MeasurementVector,
    real: &MeasurementVector,
) -> BfResult<SegmentStage> {
    const STAGE: &str = "segment chain";
    let driver = dataset.driving_key(segment)?;
    let real_value = real.get(driver, STAGE)?;
    let prev_value = prev.get(driver, STAGE)?;

    if prev_value == 0.0 {
        return Err(BodyForgeError::DivisionByZero {
            stage: format!("{} scale", segment),
            key: driver,
        });
    }
    let scale = real_value / prev_value;

    let row = dataset.row(segment)?;
    let denom = row.get(driver, STAGE)? - dataset.basis.get(driver, STAGE)?;
    if denom == 0.0 {
        return Err(BodyForgeError::DivisionByZero {
            stage: format!("{} coupling", segment),
            key: driver,
        });
    }

    let shift = real_value - prev_value;
    let mut virtual_state = MeasurementVector::new();
    for &key in &dataset.keys {
        let coupling = (row.get(key, STAGE)? - dataset.basis.get(key, STAGE)?) / denom;
        virtual_state.insert(key, prev.get(key, STAGE)? + coupling * shift);
    }

    Ok(SegmentStage {
        segment,
        driving_key: Some(driver),
        scale,
        virtual_state,
    })
}

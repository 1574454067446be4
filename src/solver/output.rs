use crate::consts::{NEUTRAL_TOLERANCE, OUTPUT_DECIMALS};
use crate::error::{BfResult, BodyForgeError};
use crate::solver::segments::SegmentChain;
use crate::solver::shape_keys::ShapeKeySolution;
use crate::variant::{Segment, Variant, CATEGORY_OUTPUTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn uniform(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Stretch along the bone's length (local Y) only.
    pub fn along_length(v: f64) -> Self {
        Self { x: 1.0, y: v, z: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeKeyWeight {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneScale {
    pub key: String,
    pub value: Vec3,
}

/// The two lists handed to the mesh-deformation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDimensions {
    /// Morph target weights: solved shape keys, then the size categories.
    pub body_dimensions: Vec<ShapeKeyWeight>,
    /// Per-bone scale, keyed by rig bone name.
    pub body_dimension_lengths: Vec<BoneScale>,
}

impl BodyDimensions {
    pub fn weight(&self, key: &str) -> Option<f64> {
        self.body_dimensions
            .iter()
            .find(|w| w.key == key)
            .map(|w| w.value)
    }

    pub fn bone(&self, key: &str) -> Option<Vec3> {
        self.body_dimension_lengths
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.value)
    }

    /// True when every weight is ~0 and every scale is ~1.
    pub fn is_neutral(&self) -> bool {
        let weights_zero = self
            .body_dimensions
            .iter()
            .all(|w| w.value.abs() < NEUTRAL_TOLERANCE);
        let scales_one = self.body_dimension_lengths.iter().all(|b| {
            [b.value.x, b.value.y, b.value.z]
                .iter()
                .all(|v| (v - 1.0).abs() < NEUTRAL_TOLERANCE)
        });
        weights_zero && scales_one
    }
}

/// Rounds the exact decimal value to [`OUTPUT_DECIMALS`] places, ties away
/// from zero. Negative zero comes out as `0.0`.
pub fn round_output(value: f64) -> f64 {
    let rounded = if is_decimal_tie(value) {
        // A tie has at most one more decimal, so the scaled product is exact.
        let factor = 10f64.powi(OUTPUT_DECIMALS);
        (value * factor).round() / factor
    } else {
        format!("{:.*}", OUTPUT_DECIMALS as usize, value)
            .parse()
            .unwrap_or(value)
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// True when `value` sits exactly halfway between two output decimals.
///
/// Such a value has `OUTPUT_DECIMALS + 1` decimals ending in 5, which for a
/// binary float means it is a multiple of `2^-(OUTPUT_DECIMALS + 1)`.
fn is_decimal_tie(value: f64) -> bool {
    let places = OUTPUT_DECIMALS + 1;
    if !value.is_finite() || (value * 2f64.powi(places)).fract() != 0.0 {
        return false;
    }
    format!("{:.*}", places as usize, value).ends_with('5')
}

pub fn format_outputs(
    variant: Variant,
    chain: &SegmentChain,
    solution: &ShapeKeySolution,
) -> BfResult<BodyDimensions> {
    let shape_keys = variant.shape_keys();
    if solution.weights.len() != shape_keys.len() {
        return Err(BodyForgeError::InvalidDataset(format!(
            "solved {} shape keys, expected {}",
            solution.weights.len(),
            shape_keys.len()
        )));
    }

    let solved = shape_keys
        .iter()
        .zip(&solution.weights)
        .map(|(slot, &w)| (slot.output, w));
    let categories = CATEGORY_OUTPUTS
        .iter()
        .copied()
        .zip(solution.categories.as_array());

    let body_dimensions = solved
        .chain(categories)
        .map(|(name, value)| ShapeKeyWeight {
            key: name.to_string(),
            value: round_output(value),
        })
        .collect();

    let body_dimension_lengths = variant
        .bones()
        .iter()
        .map(|slot| {
            let scale = chain.scale(slot.segment).ok_or_else(|| {
                BodyForgeError::InvalidDataset(format!(
                    "no scale computed for segment '{}'",
                    slot.segment
                ))
            })?;
            let scale = round_output(scale);
            let value = if slot.segment == Segment::Spine {
                Vec3::uniform(scale)
            } else {
                Vec3::along_length(scale)
            };
            Ok(BoneScale {
                key: slot.rig.to_string(),
                value,
            })
        })
        .collect::<BfResult<Vec<_>>>()?;

    Ok(BodyDimensions {
        body_dimensions,
        body_dimension_lengths,
    })
}

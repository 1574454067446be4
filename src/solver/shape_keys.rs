use crate::dataset::{BodyDataset, SizeRow};
use crate::error::{BfResult, BodyForgeError};
use crate::measurement::{MeasurementKey, MeasurementVector};
use crate::solver::linear;
use crate::variant::Variant;
use tracing::trace;

const STAGE: &str = "shape-key solve";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryFractions {
    pub overweight: f64,
    pub skinny: f64,
    pub muscular: f64,
}

impl CategoryFractions {
    /// Output order: overweight, skinny, muscular.
    pub fn as_array(&self) -> [f64; 3] {
        [self.overweight, self.skinny, self.muscular]
    }
}

#[derive(Debug, Clone)]
pub struct ShapeKeySolution {
    /// Solved weights, in the variant's shape-key order. Not rounded.
    pub weights: Vec<f64>,
    pub categories: CategoryFractions,
    pub virtual_adjusted: MeasurementVector,
    /// Right-hand side handed to the linear solve.
    pub deltas: Vec<f64>,
}

/// Derives the category fractions and solves for the remaining shape keys.
pub fn solve_shape_keys(
    dataset: &BodyDataset,
    variant: Variant,
    real: &MeasurementVector,
    virtual_state: &MeasurementVector,
) -> BfResult<ShapeKeySolution> {
    let real_fat = real.get(MeasurementKey::BodyFat, STAGE)?;
    let basis_fat = dataset.basis.get(MeasurementKey::BodyFat, STAGE)?;

    let overweight = real_fat > basis_fat;
    let size_row = if overweight {
        &dataset.size_rows.b_main_overweight
    } else {
        &dataset.size_rows.b_main_skinny
    };

    let fat_span = size_row.point1.get(MeasurementKey::BodyFat, STAGE)? - basis_fat;
    if fat_span == 0.0 {
        return Err(BodyForgeError::DivisionByZero {
            stage: "body-fat fraction".to_string(),
            key: MeasurementKey::BodyFat,
        });
    }
    let fat_fraction = (real_fat - basis_fat) / fat_span * size_row.multiplier;

    let mut categories = CategoryFractions {
        muscular: muscle_fraction(dataset, real)?,
        ..CategoryFractions::default()
    };
    if overweight {
        categories.overweight = fat_fraction;
    } else {
        categories.skinny = fat_fraction;
    }

    let virtual_adjusted = adjust_for_fat(dataset, size_row, fat_span, real_fat, virtual_state)?;

    let targets = dataset.shape_key_targets(variant)?;
    let deltas = targets
        .iter()
        .map(|&key| Ok(real.get(key, STAGE)? - virtual_adjusted.get(key, STAGE)?))
        .collect::<BfResult<Vec<f64>>>()?;

    let weights = linear::solve(&dataset.size_coeff_matrix, &deltas)?;
    trace!(
        "Categories: overweight={:.6} skinny={:.6} muscular={:.6}",
        categories.overweight,
        categories.skinny,
        categories.muscular
    );

    Ok(ShapeKeySolution {
        weights,
        categories,
        virtual_adjusted,
        deltas,
    })
}

/// Shifts every non-fat key along the chosen size row by the body-fat offset.
fn adjust_for_fat(
    dataset: &BodyDataset,
    size_row: &SizeRow,
    fat_span: f64,
    real_fat: f64,
    virtual_state: &MeasurementVector,
) -> BfResult<MeasurementVector> {
    let virtual_fat = virtual_state.get(MeasurementKey::BodyFat, STAGE)?;
    let mut adjusted = MeasurementVector::new();

    for &key in &dataset.keys {
        let current = virtual_state.get(key, STAGE)?;
        if key == MeasurementKey::BodyFat {
            adjusted.insert(key, current);
            continue;
        }
        let base = dataset.basis.get(key, STAGE)?;
        let point = size_row.point1.value(key).unwrap_or(base);
        let coupling = (point - base) / fat_span;
        adjusted.insert(key, current + coupling * (real_fat - virtual_fat));
    }

    Ok(adjusted)
}

/// Muscle share of the muscular size row.
///
/// Unlike the fat fraction, a degenerate row yields zero instead of failing.
fn muscle_fraction(dataset: &BodyDataset, real: &MeasurementVector) -> BfResult<f64> {
    let row = &dataset.size_rows.b_main_muscular;
    let span = row.point1.get(MeasurementKey::Muscle, STAGE)?
        - row.basis.get(MeasurementKey::Muscle, STAGE)?;
    if span == 0.0 {
        return Ok(0.0);
    }
    let offset = real.get(MeasurementKey::Muscle, STAGE)?
        - dataset.basis.get(MeasurementKey::Muscle, STAGE)?;
    Ok(offset / span * row.multiplier)
}

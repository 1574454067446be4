use crate::error::{BfResult, BodyForgeError};
use crate::measurement::{MeasurementKey, MeasurementVector};
use crate::variant::{Segment, Variant};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Scalars that are part of the skeleton but not of the user-facing vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extra {
    #[serde(rename = "Head Length")]
    pub head_length: f64,
    #[serde(rename = "Torso Length")]
    pub torso_length: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeRow {
    /// Sparse: keys left out fall back to the dataset basis.
    #[serde(rename = "Point1")]
    pub point1: MeasurementVector,
    #[serde(rename = "Basis", default)]
    pub basis: MeasurementVector,
    #[serde(rename = "ShapeKeyMultiplier")]
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeRows {
    pub b_main_overweight: SizeRow,
    pub b_main_skinny: SizeRow,
    pub b_main_muscular: SizeRow,
}

/// Static measurement tables for one variant.
///
/// Loaded once and shared read-only between every solve. All structural
/// checks happen in [`BodyDataset::validate`] so the solve itself only fails
/// on numeric conditions that depend on the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDataset {
    pub keys: Vec<MeasurementKey>,
    pub extra: Extra,
    pub basis: MeasurementVector,
    pub rows: HashMap<Segment, MeasurementVector>,
    pub ctrl: HashMap<Segment, MeasurementKey>,
    pub size_rows: SizeRows,
    pub shape_key_map: HashMap<String, MeasurementKey>,
    pub size_coeff_matrix: Vec<Vec<f64>>,
}

/// Keys the spine stage and the category fractions read directly.
const CHAIN_KEYS: [MeasurementKey; 6] = [
    MeasurementKey::Height,
    MeasurementKey::NeckLength,
    MeasurementKey::ThighLength,
    MeasurementKey::CalfLength,
    MeasurementKey::BodyFat,
    MeasurementKey::Muscle,
];

fn invalid(msg: impl Into<String>) -> BodyForgeError {
    BodyForgeError::InvalidDataset(msg.into())
}

impl BodyDataset {
    pub fn load_from_file<P: AsRef<Path>>(path: P, variant: Variant) -> BfResult<Self> {
        let path = path.as_ref();
        info!("Loading {} dataset from {:?}", variant, path);
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), variant)
    }

    pub fn from_reader<R: Read>(reader: R, variant: Variant) -> BfResult<Self> {
        let dataset: BodyDataset = serde_json::from_reader(reader)?;
        dataset.validate(variant)?;
        debug!(
            "Dataset ready: {} keys, {} rows, {}x{} coefficients",
            dataset.keys.len(),
            dataset.rows.len(),
            dataset.size_coeff_matrix.len(),
            dataset.size_coeff_matrix.first().map_or(0, Vec::len)
        );
        Ok(dataset)
    }

    /// Structural checks. Everything the solve indexes must exist here.
    pub fn validate(&self, variant: Variant) -> BfResult<()> {
        if self.keys.is_empty() {
            return Err(invalid("'keys' is empty"));
        }
        let mut seen = HashSet::new();
        for &key in &self.keys {
            if !seen.insert(key) {
                return Err(invalid(format!("duplicate key '{}'", key)));
            }
            if !variant.accepts(key) {
                return Err(invalid(format!(
                    "key '{}' does not belong to the {} variant",
                    key, variant
                )));
            }
        }
        for key in CHAIN_KEYS {
            if !seen.contains(&key) {
                return Err(invalid(format!("'keys' is missing '{}'", key)));
            }
        }

        self.check_complete(&self.basis, "basis")?;

        if !self.extra.head_length.is_finite() || !self.extra.torso_length.is_finite() {
            return Err(invalid("'extra' holds a non-finite value"));
        }
        if self.extra.torso_length == 0.0 {
            return Err(invalid("'extra.Torso Length' must be non-zero"));
        }

        for &segment in variant.segments() {
            let row = self
                .rows
                .get(&segment)
                .ok_or_else(|| invalid(format!("'rows' has no '{}' row", segment)))?;
            self.check_complete(row, segment.name())?;

            if segment == Segment::Spine {
                continue;
            }
            let driver = self
                .ctrl
                .get(&segment)
                .ok_or_else(|| invalid(format!("'ctrl' has no entry for '{}'", segment)))?;
            if !seen.contains(driver) {
                return Err(invalid(format!(
                    "'ctrl.{}' points at '{}', which is not in 'keys'",
                    segment, driver
                )));
            }
        }

        self.validate_size_rows()?;

        for slot in variant.shape_keys() {
            let target = self.shape_key_map.get(slot.id).ok_or_else(|| {
                invalid(format!("'shape_key_map' has no entry for '{}'", slot.id))
            })?;
            if !seen.contains(target) {
                return Err(invalid(format!(
                    "'shape_key_map.{}' points at '{}', which is not in 'keys'",
                    slot.id, target
                )));
            }
        }

        let n = variant.shape_keys().len();
        if self.size_coeff_matrix.len() != n {
            return Err(invalid(format!(
                "'size_coeff_matrix' must have {} rows, found {}",
                n,
                self.size_coeff_matrix.len()
            )));
        }
        for (i, row) in self.size_coeff_matrix.iter().enumerate() {
            if row.len() != n {
                return Err(invalid(format!(
                    "'size_coeff_matrix' row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!(
                    "'size_coeff_matrix' row {} holds a non-finite value",
                    i
                )));
            }
        }

        Ok(())
    }

    fn validate_size_rows(&self) -> BfResult<()> {
        let fat_rows = [
            ("b_main_overweight", &self.size_rows.b_main_overweight),
            ("b_main_skinny", &self.size_rows.b_main_skinny),
        ];
        for (name, row) in fat_rows {
            if row.point1.value(MeasurementKey::BodyFat).is_none() {
                return Err(invalid(format!("'{}.Point1' has no 'Body Fat'", name)));
            }
        }

        let muscular = &self.size_rows.b_main_muscular;
        if muscular.point1.value(MeasurementKey::Muscle).is_none()
            || muscular.basis.value(MeasurementKey::Muscle).is_none()
        {
            return Err(invalid(
                "'b_main_muscular' needs 'Muscle' in both 'Point1' and 'Basis'",
            ));
        }

        let all_rows = [
            &self.size_rows.b_main_overweight,
            &self.size_rows.b_main_skinny,
            muscular,
        ];
        for row in all_rows {
            let finite = row.multiplier.is_finite()
                && row.point1.iter().all(|(_, v)| v.is_finite())
                && row.basis.iter().all(|(_, v)| v.is_finite());
            if !finite {
                return Err(invalid("'size_rows' holds a non-finite value"));
            }
        }
        Ok(())
    }

    fn check_complete(&self, vector: &MeasurementVector, name: &str) -> BfResult<()> {
        for &key in &self.keys {
            match vector.value(key) {
                Some(v) if v.is_finite() => {}
                Some(_) => {
                    return Err(invalid(format!("'{}' has a non-finite '{}'", name, key)))
                }
                None => return Err(invalid(format!("'{}' is missing '{}'", name, key))),
            }
        }
        Ok(())
    }

    pub fn row(&self, segment: Segment) -> BfResult<&MeasurementVector> {
        self.rows
            .get(&segment)
            .ok_or_else(|| invalid(format!("'rows' has no '{}' row", segment)))
    }

    pub fn driving_key(&self, segment: Segment) -> BfResult<MeasurementKey> {
        self.ctrl
            .get(&segment)
            .copied()
            .ok_or_else(|| invalid(format!("'ctrl' has no entry for '{}'", segment)))
    }

    /// Measurement targets of the variant's shape keys, in solve order.
    pub fn shape_key_targets(&self, variant: Variant) -> BfResult<Vec<MeasurementKey>> {
        variant
            .shape_keys()
            .iter()
            .map(|slot| {
                self.shape_key_map.get(slot.id).copied().ok_or_else(|| {
                    invalid(format!("'shape_key_map' has no entry for '{}'", slot.id))
                })
            })
            .collect()
    }
}

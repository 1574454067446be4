use crate::error::{BfResult, BodyForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every anthropometric dimension known to either population variant.
///
/// The string form is the label used by dataset documents and CSV headers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum MeasurementKey {
    #[strum(serialize = "Height")]
    Height,
    #[strum(serialize = "Thigh Length")]
    ThighLength,
    #[strum(serialize = "Calf Length")]
    CalfLength,
    #[strum(serialize = "Feet Length")]
    FeetLength,
    #[strum(serialize = "Neck Length")]
    NeckLength,
    #[strum(serialize = "Shoulder Width")]
    ShoulderWidth,
    #[strum(serialize = "Upper Arm Length")]
    UpperArmLength,
    #[strum(serialize = "Forearm Length")]
    ForearmLength,
    #[strum(serialize = "Hand Length")]
    HandLength,
    #[strum(serialize = "Muscle")]
    Muscle,
    #[strum(serialize = "Body Fat")]
    BodyFat,
    #[strum(serialize = "Neck Thickness")]
    NeckThickness,
    #[strum(serialize = "Chest")]
    Chest,
    #[strum(serialize = "Rib")]
    Rib,
    #[strum(serialize = "Bust")]
    Bust,
    #[strum(serialize = "Underbust")]
    Underbust,
    #[strum(serialize = "Cup")]
    Cup,
    #[strum(serialize = "Waist")]
    Waist,
    #[strum(serialize = "Belly")]
    Belly,
    #[strum(serialize = "Hips")]
    Hips,
    #[strum(serialize = "Thigh Size")]
    ThighSize,
    #[strum(serialize = "Calf Size")]
    CalfSize,
    #[strum(serialize = "Upper Arm Size")]
    UpperArmSize,
    #[strum(serialize = "Forearm Size")]
    ForearmSize,
    #[strum(serialize = "Hand Size")]
    HandSize,
    #[strum(serialize = "Head Scale")]
    HeadScale,
    #[strum(serialize = "Head Rotation X")]
    HeadRotationX,
    #[strum(serialize = "Head Rotation Y")]
    HeadRotationY,
    #[strum(serialize = "Head Rotation Z")]
    HeadRotationZ,
}

impl MeasurementKey {
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Keys entered as 0-100 percentages and consumed as 0-1 fractions.
    pub fn is_percentage(self) -> bool {
        matches!(self, Self::Muscle | Self::BodyFat)
    }
}

impl TryFrom<String> for MeasurementKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|_| format!("unknown measurement '{}'", s))
    }
}

impl From<MeasurementKey> for String {
    fn from(key: MeasurementKey) -> Self {
        key.label().to_string()
    }
}

/// Parses one measurement value. `NaN` and infinities are refused.
pub fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A named set of measurements. Iteration follows `MeasurementKey` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementVector(BTreeMap<MeasurementKey, f64>);

impl MeasurementVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required lookup: an absent key fails the calling stage.
    pub fn get(&self, key: MeasurementKey, stage: &'static str) -> BfResult<f64> {
        self.0
            .get(&key)
            .copied()
            .ok_or(BodyForgeError::MissingKey { key, stage })
    }

    pub fn value(&self, key: MeasurementKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn insert(&mut self, key: MeasurementKey, value: f64) -> Option<f64> {
        self.0.insert(key, value)
    }

    pub fn remove(&mut self, key: MeasurementKey) -> Option<f64> {
        self.0.remove(&key)
    }

    pub fn contains(&self, key: MeasurementKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MeasurementKey, f64)> for MeasurementVector {
    fn from_iter<I: IntoIterator<Item = (MeasurementKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(MeasurementKey, f64); N]> for MeasurementVector {
    fn from(pairs: [(MeasurementKey, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

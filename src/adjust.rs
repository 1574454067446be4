use crate::consts::PERCENT_SCALE;
use crate::measurement::{MeasurementKey, MeasurementVector};
use crate::variant::{Variant, PASSTHROUGH_KEYS};
use tracing::trace;

/// Converts raw slider values into the vector the solver consumes.
///
/// Percentages become fractions and the variant's cup rule adds `Cup`
/// (plus the mirrored girth, if any). A missing girth simply skips the
/// derivation; the solve reports the gap later if `Cup` is actually needed.
pub fn adjust_inputs(raw: &MeasurementVector, variant: Variant) -> MeasurementVector {
    let mut adjusted: MeasurementVector = raw
        .iter()
        .map(|(key, value)| {
            if key.is_percentage() {
                (key, value / PERCENT_SCALE)
            } else {
                (key, value)
            }
        })
        .collect();

    let rule = variant.cup_rule();
    if let (Some(minuend), Some(subtrahend)) = (raw.value(rule.minuend), raw.value(rule.subtrahend))
    {
        adjusted.insert(MeasurementKey::Cup, minuend - subtrahend);
        if let Some(mirror) = rule.mirror {
            adjusted.insert(mirror, minuend);
        }
    } else {
        trace!(
            "Cup not derived: '{}' or '{}' absent",
            rule.minuend,
            rule.subtrahend
        );
    }

    adjusted
}

/// Inverse of [`adjust_inputs`] for seeding sliders from a dataset basis.
///
/// Fractions are scaled back to percentages and derived keys are dropped.
pub fn to_user_facing(adjusted: &MeasurementVector, variant: Variant) -> MeasurementVector {
    let rule = variant.cup_rule();
    adjusted
        .iter()
        .filter(|(key, _)| *key != MeasurementKey::Cup && Some(*key) != rule.mirror)
        .map(|(key, value)| {
            if key.is_percentage() {
                (key, value * PERCENT_SCALE)
            } else {
                (key, value)
            }
        })
        .collect()
}

/// Neutral values for the head controls the renderer consumes.
pub fn passthrough_defaults() -> MeasurementVector {
    PASSTHROUGH_KEYS
        .iter()
        .map(|&key| {
            let neutral = if key == MeasurementKey::HeadScale {
                1.0
            } else {
                0.0
            };
            (key, neutral)
        })
        .collect()
}

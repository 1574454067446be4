/// Decimal places kept in every emitted weight and scale.
pub const OUTPUT_DECIMALS: i32 = 10;

/// Pivots smaller than this (after partial pivoting) mark the system singular.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// The spine stage extrapolates twice the spine row's deviation per unit of stretch.
pub const SPINE_EXTRAPOLATION: f64 = 2.0;

/// User-facing percentages are divided by this before solving.
pub const PERCENT_SCALE: f64 = 100.0;

/// Tolerance used when comparing against neutral outputs.
pub const NEUTRAL_TOLERANCE: f64 = 1e-9;

use std::fmt;

use crate::error::{Error, Result};
use crate::types::{
    ConstraintStatus, MarginConfig, ShadowLength, ShadowResult, SpacingResult, SpacingVerdict,
};

impl MarginConfig {
    /// Builds a margin from a mode name as stored in saved settings.
    pub fn from_mode(mode: &str, value: f64) -> Result<Self> {
        match mode {
            "factor" => Ok(MarginConfig::Factor(value)),
            "fixed" => Ok(MarginConfig::Fixed(value)),
            other => Err(Error::UnknownMarginMode(other.to_string())),
        }
    }

    pub fn apply(&self, shadow_length_m: f64) -> f64 {
        match *self {
            MarginConfig::Factor(multiplier) => shadow_length_m * multiplier,
            MarginConfig::Fixed(meters) => shadow_length_m + meters,
        }
    }
}

impl fmt::Display for MarginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginConfig::Factor(m) => write!(f, "× {m}"),
            MarginConfig::Fixed(d) => write!(f, "+ {d}m"),
        }
    }
}

/// Recommended row pitch in meters, never negative.
///
/// An unbounded or negative shadow carries no finite constraint and maps to 0.
pub fn recommended_spacing(shadow: ShadowLength, margin: MarginConfig) -> f64 {
    match shadow {
        ShadowLength::Finite(l) if l >= 0.0 => margin.apply(l).max(0.0),
        _ => 0.0,
    }
}

/// Night (unbounded basic shadow) yields 0 whatever the margin; a backside
/// sun still keeps a `Fixed` margin on top of the zero row shadow.
pub fn spacing_for(shadow: &ShadowResult, margin: MarginConfig) -> SpacingResult {
    let row = if shadow.basic.is_unbounded() {
        ShadowLength::Unbounded
    } else {
        ShadowLength::Finite(shadow.row)
    };
    SpacingResult {
        recommended_spacing: recommended_spacing(row, margin),
        status: shadow.status,
    }
}

pub fn verify_existing_spacing(existing_m: f64, spacing: &SpacingResult) -> SpacingVerdict {
    if spacing.status != ConstraintStatus::Valid {
        return SpacingVerdict::NoConstraint;
    }
    let diff = existing_m - spacing.recommended_spacing;
    if diff >= 0.0 {
        SpacingVerdict::Ok { surplus_m: diff }
    } else {
        SpacingVerdict::Shortfall { missing_m: -diff }
    }
}

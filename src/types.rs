use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(Error::InvalidLatitude(latitude));
        }
        if latitude.abs() == 90.0 {
            return Err(Error::PolarLatitude(latitude));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Sun position for the fixed winter-solstice day. `altitude` is floored at 0
/// and `azimuth` is north-referenced (0 = N, 90 = E, 180 = S).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    pub hour: f64,
    pub declination: f64,
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "meters", rename_all = "snake_case")]
pub enum ShadowLength {
    Finite(f64),
    Unbounded,
}

impl ShadowLength {
    pub fn from_meters(meters: f64) -> Self {
        if meters.is_finite() {
            ShadowLength::Finite(meters)
        } else {
            ShadowLength::Unbounded
        }
    }

    pub fn meters(&self) -> Option<f64> {
        match *self {
            ShadowLength::Finite(m) => Some(m),
            ShadowLength::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ShadowLength::Unbounded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStatus {
    Valid,
    NightNoConstraint,
    BacksideNoConstraint,
    InvalidGeometry,
}

impl ConstraintStatus {
    pub fn is_constraining(&self) -> bool {
        matches!(self, ConstraintStatus::Valid)
    }

    // InvalidGeometry > NightNoConstraint > BacksideNoConstraint > Valid
    fn rank(&self) -> u8 {
        match self {
            ConstraintStatus::Valid => 0,
            ConstraintStatus::BacksideNoConstraint => 1,
            ConstraintStatus::NightNoConstraint => 2,
            ConstraintStatus::InvalidGeometry => 3,
        }
    }

    pub fn dominant(self, other: ConstraintStatus) -> ConstraintStatus {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowResult {
    pub basic: ShadowLength,
    pub row: f64,
    pub is_backside: bool,
    pub azimuth_diff: f64,
    pub status: ConstraintStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum MarginConfig {
    /// Multiplier applied to the row-axis shadow.
    Factor(f64),
    /// Meters added to the row-axis shadow.
    Fixed(f64),
}

impl Default for MarginConfig {
    fn default() -> Self {
        MarginConfig::Factor(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingResult {
    pub recommended_spacing: f64,
    pub status: ConstraintStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub panel_length_mm: f64,
    pub vertical_count: i32,
    pub tilt_deg: f64,
    pub bottom_clearance_mm: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            panel_length_mm: 2278.0,
            vertical_count: 2,
            tilt_deg: 20.0,
            bottom_clearance_mm: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum HeightSource {
    Direct { height_m: f64 },
    Panel(PanelGeometry),
}

impl Default for HeightSource {
    fn default() -> Self {
        HeightSource::Panel(PanelGeometry::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProfilePoint {
    pub time: NaiveTime,
    pub spacing: f64,
    pub row_shadow: f64,
    pub is_backside: bool,
    pub status: ConstraintStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyProfile {
    pub(crate) points: Vec<DailyProfilePoint>,
    pub(crate) governing_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignResult {
    pub time: NaiveTime,
    pub location: GeoLocation,
    pub solar_position: SolarPosition,
    pub panel_azimuth: f64,
    pub top_height_m: f64,
    pub shadow: ShadowResult,
    pub spacing: SpacingResult,
    pub margin: MarginConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SpacingVerdict {
    NoConstraint,
    Ok { surplus_m: f64 },
    Shortfall { missing_m: f64 },
}

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::angles;
use crate::error::{Error, Result};
use crate::profile::{design_times, hour_of, parse_time_label};
use crate::shadow;
use crate::spacing;
use crate::types::{DesignResult, GeoLocation, HeightSource, MarginConfig};

/// Snapshot of the user's design inputs, passed by value on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConditions {
    pub region_id: String,
    pub time: String,
    pub panel_azimuth: f64,
    pub height: HeightSource,
    pub margin: MarginConfig,
}

impl Default for DesignConditions {
    fn default() -> Self {
        Self {
            region_id: "tokyo".to_string(),
            time: "12:00".to_string(),
            panel_azimuth: 180.0,
            height: HeightSource::default(),
            margin: MarginConfig::default(),
        }
    }
}

impl DesignConditions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn evaluate(
    conditions: &DesignConditions,
    location: &GeoLocation,
    time: NaiveTime,
) -> DesignResult {
    let (top_height_m, height_status) = conditions.height.resolve();
    let solar_position = angles::solar_position_at(location, hour_of(&time));
    let mut shadow = shadow::project_row_shadow(
        top_height_m,
        solar_position.altitude,
        solar_position.azimuth,
        conditions.panel_azimuth,
    );
    shadow.status = height_status.dominant(shadow.status);
    let spacing = spacing::spacing_for(&shadow, conditions.margin);
    DesignResult {
        time,
        location: *location,
        solar_position,
        panel_azimuth: conditions.panel_azimuth,
        top_height_m,
        shadow,
        spacing,
        margin: conditions.margin,
    }
}

/// Evaluates at one of the design-grid labels ("09:00" .. "15:00").
pub fn evaluate_at_label(
    conditions: &DesignConditions,
    location: &GeoLocation,
    label: &str,
) -> Result<DesignResult> {
    let time = parse_time_label(label)?;
    if !design_times().contains(&time) {
        return Err(Error::TimeNotInGrid(label.to_string()));
    }
    Ok(evaluate(conditions, location, time))
}

use chrono::{NaiveTime, Timelike};
use log::debug;

use crate::design::{evaluate, DesignConditions};
use crate::error::{Error, Result};
use crate::types::{DailyProfile, DailyProfilePoint, GeoLocation};

pub const DESIGN_HOURS: [u32; 7] = [9, 10, 11, 12, 13, 14, 15];

pub fn design_times() -> Vec<NaiveTime> {
    DESIGN_HOURS
        .iter()
        .filter_map(|&h| NaiveTime::from_hms_opt(h, 0, 0))
        .collect()
}

pub fn hour_of(time: &NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

pub fn time_label(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_time_label(label: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%H:%M")
        .map_err(|_| Error::InvalidTimeLabel(label.to_string()))
}

impl DailyProfilePoint {
    pub fn label(&self) -> String {
        time_label(&self.time)
    }
}

impl DailyProfile {
    pub fn points(&self) -> &[DailyProfilePoint] {
        &self.points
    }

    pub fn governing_index(&self) -> usize {
        self.governing_index
    }

    /// The hour with the largest recommended spacing; the earliest wins on ties.
    /// Only built by [`daily_profile`], which always fills the full grid.
    pub fn governing(&self) -> &DailyProfilePoint {
        &self.points[self.governing_index]
    }
}

fn governing_index(points: &[DailyProfilePoint]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.spacing > points[best].spacing {
            best = i;
        }
    }
    best
}

/// Sweeps the 09:00–15:00 design grid for one location and set of conditions.
pub fn daily_profile(conditions: &DesignConditions, location: &GeoLocation) -> DailyProfile {
    let points: Vec<DailyProfilePoint> = design_times()
        .into_iter()
        .map(|time| {
            let r = evaluate(conditions, location, time);
            DailyProfilePoint {
                time,
                spacing: r.spacing.recommended_spacing,
                row_shadow: r.shadow.row,
                is_backside: r.shadow.is_backside,
                status: r.shadow.status,
            }
        })
        .collect();

    let governing_index = governing_index(&points);
    debug!(
        "governing hour {} with spacing {:.3} m",
        time_label(&points[governing_index].time),
        points[governing_index].spacing
    );
    DailyProfile {
        points,
        governing_index,
    }
}

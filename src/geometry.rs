use log::debug;

use crate::angles::deg_to_rad;
use crate::types::{ConstraintStatus, HeightSource, PanelGeometry};

/// Height of the upper panel edge above ground level, in meters.
///
/// `None` when the panel length or row count is not positive or the clearance is negative.
pub fn top_gl_height(
    panel_length_mm: f64,
    vertical_count: i32,
    tilt_deg: f64,
    bottom_clearance_mm: f64,
) -> Option<f64> {
    if panel_length_mm <= 0.0 || vertical_count <= 0 || bottom_clearance_mm < 0.0 {
        return None;
    }
    let total_length_m = panel_length_mm * vertical_count as f64 / 1000.0;
    let relative_height_m = total_length_m * deg_to_rad(tilt_deg).sin();
    Some(bottom_clearance_mm / 1000.0 + relative_height_m)
}

impl PanelGeometry {
    pub fn top_gl_height(&self) -> Option<f64> {
        top_gl_height(
            self.panel_length_mm,
            self.vertical_count,
            self.tilt_deg,
            self.bottom_clearance_mm,
        )
    }
}

impl HeightSource {
    /// Resolves to a height in meters. Invalid geometry, or a direct height that
    /// is not a positive number, resolves to 0 with [`ConstraintStatus::InvalidGeometry`].
    pub fn resolve(&self) -> (f64, ConstraintStatus) {
        match self {
            HeightSource::Direct { height_m } if height_m.is_finite() && *height_m > 0.0 => {
                (*height_m, ConstraintStatus::Valid)
            }
            HeightSource::Direct { height_m } => {
                debug!("invalid direct top height {height_m}");
                (0.0, ConstraintStatus::InvalidGeometry)
            }
            HeightSource::Panel(geometry) => match geometry.top_gl_height() {
                Some(h) => (h, ConstraintStatus::Valid),
                None => {
                    debug!("invalid panel geometry {geometry:?}");
                    (0.0, ConstraintStatus::InvalidGeometry)
                }
            },
        }
    }
}

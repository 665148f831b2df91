use log::{debug, trace};

use crate::angles::deg_to_rad;
use crate::types::{ConstraintStatus, ShadowLength, ShadowResult};

// cos(90°) evaluates to ~6e-17; treat that as lateral.
const LATERAL_COS_TOLERANCE: f64 = 1e-12;

/// Shadow length of the upper panel edge in the vertical cross-section plane.
pub fn basic_shadow_length(top_height_m: f64, sun_altitude_deg: f64) -> ShadowLength {
    if sun_altitude_deg <= 0.0 {
        ShadowLength::Unbounded
    } else if top_height_m <= 0.0 {
        ShadowLength::Finite(0.0)
    } else {
        ShadowLength::from_meters(top_height_m / deg_to_rad(sun_altitude_deg).tan())
    }
}

/// Projects the cross-section shadow onto the row-to-row axis.
///
/// Only the component parallel to the panel azimuth can reach the next row.
/// A sun behind or exactly beside the row (cos ΔA ≤ 0) or at/below the
/// horizon yields no row shadow and sets `is_backside`.
pub fn project_row_shadow(
    top_height_m: f64,
    sun_altitude_deg: f64,
    sun_azimuth_deg: f64,
    panel_azimuth_deg: f64,
) -> ShadowResult {
    let basic = basic_shadow_length(top_height_m, sun_altitude_deg);
    let azimuth_diff = sun_azimuth_deg - panel_azimuth_deg;
    let cos_delta = deg_to_rad(azimuth_diff).cos();

    if cos_delta <= LATERAL_COS_TOLERANCE || sun_altitude_deg <= 0.0 {
        let status = if sun_altitude_deg <= 0.0 {
            ConstraintStatus::NightNoConstraint
        } else {
            ConstraintStatus::BacksideNoConstraint
        };
        debug!("no row shadow: {status:?} (altitude={sun_altitude_deg}, dA={azimuth_diff})");
        return ShadowResult {
            basic,
            row: 0.0,
            is_backside: true,
            azimuth_diff,
            status,
        };
    }

    let row = match basic {
        ShadowLength::Finite(l) => l * cos_delta,
        ShadowLength::Unbounded => 0.0,
    };
    trace!("row shadow {row:.3} m (dA={azimuth_diff:.2}, cos={cos_delta:.4})");
    ShadowResult {
        basic,
        row,
        is_backside: false,
        azimuth_diff,
        status: ConstraintStatus::Valid,
    }
}

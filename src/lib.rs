pub mod angles;
pub mod design;
pub mod error;
pub mod geometry;
pub mod profile;
pub mod regions;
pub mod shadow;
pub mod spacing;
pub mod types;

pub use angles::{
    deg_to_rad, hour_angle, local_solar_time, longitude_time_offset, normalize_angle, rad_to_deg,
    solar_altitude, solar_azimuth, solar_position, solar_position_at, solar_position_at_datetime,
    wrap_signed_angle, DEGREES_PER_HOUR, REFERENCE_MERIDIAN, WINTER_SOLSTICE_DECLINATION,
};

pub use design::{evaluate, evaluate_at_label, DesignConditions};

pub use error::{Error, Result};

pub use geometry::top_gl_height;

pub use profile::{daily_profile, design_times, parse_time_label, time_label, DESIGN_HOURS};

pub use regions::{Region, RegionCatalog};

pub use shadow::{basic_shadow_length, project_row_shadow};

pub use spacing::{recommended_spacing, spacing_for, verify_existing_spacing};

pub use types::{
    ConstraintStatus, DailyProfile, DailyProfilePoint, DesignResult, GeoLocation, HeightSource,
    MarginConfig, PanelGeometry, ShadowLength, ShadowResult, SolarPosition, SpacingResult,
    SpacingVerdict,
};

use chrono::{DateTime, TimeZone, Timelike, Utc};
use log::trace;

use crate::types::{GeoLocation, SolarPosition};

/// Solar declination on the winter solstice.
pub const WINTER_SOLSTICE_DECLINATION: f64 = -23.44;
/// Standard meridian of the design clock (UTC+9).
pub const REFERENCE_MERIDIAN: f64 = 135.0;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const EQUATION_OF_TIME_MINUTES: f64 = 0.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wraps into [-180, 180). Display helper, the shadow model keeps raw differences.
pub fn wrap_signed_angle(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

pub fn longitude_time_offset(longitude: f64) -> f64 {
    (longitude - REFERENCE_MERIDIAN) / DEGREES_PER_HOUR
}

pub fn local_solar_time(hour: f64, longitude: f64) -> f64 {
    hour + longitude_time_offset(longitude) + EQUATION_OF_TIME_MINUTES / 60.0
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

/// Unfloored altitude in degrees; negative below the horizon.
pub fn solar_altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_h = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_h.clamp(-1.0, 1.0).asin())
}

pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64, altitude: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let h_rad = deg_to_rad(altitude);
    let sin_az = dec_rad.cos() * ha_rad.sin() / h_rad.cos();
    let cos_az = (h_rad.sin() * lat_rad.sin() - dec_rad.sin()) / (h_rad.cos() * lat_rad.cos());
    rad_to_deg(sin_az.atan2(cos_az)) + 180.0
}

/// Winter-solstice sun position for a clock hour on the 135°E standard meridian.
///
/// Below the horizon the altitude is floored to 0 and the azimuth reported as 0.
/// Latitudes of exactly ±90° divide by zero in the azimuth term; use
/// [`GeoLocation::new`] to reject them up front.
pub fn solar_position(latitude: f64, longitude: f64, hour: f64) -> SolarPosition {
    let decl = WINTER_SOLSTICE_DECLINATION;
    let lst = local_solar_time(hour, longitude);
    let ha = hour_angle(lst);
    let alt = solar_altitude(latitude, decl, ha);
    let azim = if alt < 0.0 {
        0.0
    } else {
        solar_azimuth(latitude, decl, ha, alt)
    };
    trace!(
        "solar position lat={latitude} lon={longitude} hour={hour}: alt={alt:.3} az={azim:.3}"
    );
    SolarPosition {
        hour,
        declination: decl,
        local_solar_time: lst,
        hour_angle: ha,
        altitude: alt.max(0.0),
        azimuth: azim,
    }
}

pub fn solar_position_at(location: &GeoLocation, hour: f64) -> SolarPosition {
    solar_position(location.latitude, location.longitude, hour)
}

/// Uses only the time of day of `dt`, read on the reference clock; the date is ignored.
pub fn solar_position_at_datetime<Tz: TimeZone>(
    location: &GeoLocation,
    dt: &DateTime<Tz>,
) -> SolarPosition {
    let utc = dt.with_timezone(&Utc);
    let utc_hours = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let hour = (utc_hours + REFERENCE_MERIDIAN / DEGREES_PER_HOUR).rem_euclid(24.0);
    solar_position_at(location, hour)
}

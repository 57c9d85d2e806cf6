//! Inertial to geodetic conversion and the near-circular orbit figures derived
//! from the height above the ellipsoid.

use crate::units::{Angle, Length, Time, Velocity};
use nav_types::{ECEF, WGS84};
use orbtypes::time::UtcTimestamp;
use std::f64::consts::PI;

/// Earth's gravitational parameter, [km³/s²]
pub const MU: f64 = 398_600.8;

/// Radius the circular-orbit figures are referenced to, [km]
pub const REFERENCE_RADIUS_KM: f64 = 6378.135;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GeodeticPosition {
    pub latitude: Angle,
    pub longitude: Angle,
    pub height: Length,
}

/// Greenwich mean sidereal time at `t`
pub fn gmst(t: &UtcTimestamp) -> Angle {
    let naive = t.naive_utc();
    Angle::from_radians(sgp4::iau_epoch_to_sidereal_time(
        sgp4::julian_years_since_j2000(&naive),
    ))
}

/// Rotates an inertial position, [km], into the Earth-fixed frame and
/// expresses it on the WGS-84 ellipsoid
pub fn eci_to_geodetic(position: &na::Vector3<f64>, gmst: Angle) -> GeodeticPosition {
    let rot = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), -gmst.as_radians());
    let ecef_km = rot * position;
    let ecef = ECEF::new(
        ecef_km.x * 1000.0,
        ecef_km.y * 1000.0,
        ecef_km.z * 1000.0,
    );
    let wgs = WGS84::from(ecef);
    GeodeticPosition {
        latitude: Angle::from_degrees(wgs.latitude_degrees()),
        longitude: Angle::from_degrees(wgs.longitude_degrees()),
        height: Length::from_meters(wgs.altitude()),
    }
}

fn reference_radius(height: Length) -> f64 {
    height.as_kilometers() + REFERENCE_RADIUS_KM
}

/// Circular orbit speed at `height`
pub fn circular_speed(height: Length) -> Velocity {
    Velocity::from_kilometers_per_second((MU / reference_radius(height)).sqrt())
}

/// Circular orbit period at `height` (Kepler's third law)
pub fn orbital_period(height: Length) -> Time {
    let r = reference_radius(height);
    Time::from_minutes(2.0 * PI * r * (r / MU).sqrt() / 60.0)
}

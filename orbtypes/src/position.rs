use crate::catalog::CatalogNumber;
use serde::{Deserialize, Serialize};

/// Snapshot of a satellite at one instant, in the shape the store persists
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ComputedPosition {
    pub name: String,
    pub satnum: CatalogNumber,
    /// Geodetic latitude, [deg]
    pub latitude: f64,
    /// Geodetic longitude, [deg]
    pub longitude: f64,
    /// Circular orbital speed at the current height, [km/s]
    pub speed: f64,
    /// [min]
    pub orbital_period: f64,
    /// [deg]
    pub inclination: f64,
    /// Element set epoch as day-of-year with fractional day
    pub epoch_days: f64,
    pub tle_line_one: String,
    pub tle_line_two: String,
}

//! SGP4 orbital state built from an element set.

use crate::units::{Angle, Length, Time};
use chrono::{Datelike, TimeZone, Timelike, Utc};
use orbtypes::prelude::*;
use sgp4::{Constants, Elements, MinutesSinceEpoch};

/// WGS-84 equatorial radius used by the propagator
pub fn earth_equatorial_radius() -> Length {
    Length::from_kilometers(sgp4::WGS84.ae)
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid element set for '{name}': {reason}")]
    Elements { name: String, reason: String },
    #[error("Propagation of satellite {satnum} failed: {reason}")]
    Propagation {
        satnum: CatalogNumber,
        reason: String,
    },
}

/// Inertial (TEME) state vector
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EciState {
    /// Position, [km]
    pub position: na::Vector3<f64>,
    /// Velocity, [km/s]
    pub velocity: na::Vector3<f64>,
}

/// An element set paired with its initialized propagator.
///
/// Immutable once built, every refresh builds a fresh one from the stored lines.
pub struct OrbitalState {
    name: String,
    line1: String,
    line2: String,
    satnum: CatalogNumber,
    inclination: Angle,
    epoch: UtcTimestamp,
    epoch_days: f64,
    constants: Constants,
}

impl std::fmt::Debug for OrbitalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitalState")
            .field("name", &self.name)
            .field("satnum", &self.satnum)
            .field("inclination", &self.inclination)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl OrbitalState {
    pub fn from_tle(tle: &TleRecord) -> Result<Self, ModelError> {
        let elements_err = |reason: String| ModelError::Elements {
            name: tle.name.clone(),
            reason,
        };

        let elements = Elements::from_tle(
            Some(tle.name.clone()),
            tle.line1.as_bytes(),
            tle.line2.as_bytes(),
        )
        .map_err(|e| elements_err(e.to_string()))?;
        let constants = Constants::from_elements(&elements).map_err(|e| elements_err(e.to_string()))?;

        let epoch = Utc.from_utc_datetime(&elements.datetime);
        Ok(Self {
            name: tle.name.clone(),
            line1: tle.line1.clone(),
            line2: tle.line2.clone(),
            satnum: CatalogNumber::from(elements.norad_id),
            inclination: Angle::from_degrees(elements.inclination),
            epoch,
            epoch_days: epoch_days(&epoch),
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn satnum(&self) -> CatalogNumber {
        self.satnum
    }

    pub fn inclination(&self) -> Angle {
        self.inclination
    }

    pub fn epoch(&self) -> &UtcTimestamp {
        &self.epoch
    }

    /// Epoch as day-of-year plus the fraction of the day
    pub fn epoch_days(&self) -> f64 {
        self.epoch_days
    }

    pub fn time_since_epoch(&self, t: &UtcTimestamp) -> Time {
        Time::from_chrono_duration(*t - self.epoch)
    }

    pub fn propagate(&self, t: &UtcTimestamp) -> Result<EciState, ModelError> {
        let minutes = self.time_since_epoch(t).as_minutes();
        let prediction = self
            .constants
            .propagate(MinutesSinceEpoch(minutes))
            .map_err(|e| ModelError::Propagation {
                satnum: self.satnum,
                reason: e.to_string(),
            })?;
        Ok(EciState {
            position: na::Vector3::from(prediction.position),
            velocity: na::Vector3::from(prediction.velocity),
        })
    }
}

fn epoch_days(epoch: &UtcTimestamp) -> f64 {
    let secs = f64::from(epoch.num_seconds_from_midnight())
        + f64::from(epoch.nanosecond()) / 1_000_000_000.0;
    f64::from(epoch.ordinal()) + secs / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn iss() -> TleRecord {
        TleRecord::new(
            "ISS (ZARYA)",
            "1 25544U 98067A   20148.21301450  .00001715  00000-0  38778-4 0  9992",
            "2 25544  51.6435  92.2789 0002570 358.0648 144.9972 15.49396855228767",
        )
    }

    #[test]
    fn derived_fields() {
        let state = OrbitalState::from_tle(&iss()).unwrap();
        assert_eq!(state.name(), "ISS (ZARYA)");
        assert_eq!(state.satnum(), CatalogNumber::from(25544));
        assert_relative_eq!(state.inclination().as_degrees(), 51.6435, epsilon = 1e-9);
        assert_relative_eq!(state.epoch_days(), 148.21301450, epsilon = 1e-6);
        assert_eq!(state.line1(), iss().line1);
        assert_eq!(state.line2(), iss().line2);
        assert_relative_eq!(earth_equatorial_radius().as_kilometers(), 6378.137);
    }

    #[test]
    fn propagates_near_epoch() {
        let state = OrbitalState::from_tle(&iss()).unwrap();
        let t = Utc.with_ymd_and_hms(2020, 5, 27, 6, 0, 0).unwrap();
        let eci = state.propagate(&t).unwrap();
        let radius = eci.position.norm();
        // ~400 km above the surface
        assert!(radius > 6650.0 && radius < 6850.0, "radius {radius}");
        let speed = eci.velocity.norm();
        assert!(speed > 7.0 && speed < 8.0, "speed {speed}");
    }

    #[test]
    fn rejects_bad_elements() {
        let mut tle = iss();
        tle.line1.truncate(40);
        match OrbitalState::from_tle(&tle) {
            Err(ModelError::Elements { name, .. }) => assert_eq!(name, "ISS (ZARYA)"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn epoch_day_fraction() {
        let t = Utc.with_ymd_and_hms(2023, 2, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(epoch_days(&t), 32.5);
    }
}

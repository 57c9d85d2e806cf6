//! A handful of unit newtypes so degrees, kilometers and minutes don't get mixed up.

use serde::Serialize;
use std::ops::{Add, Sub};

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

impl Add<Length> for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Self::Output {
        Length::from_meters(self.as_meters() + rhs.as_meters())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Time {
    seconds: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.seconds)
    }
}

impl Time {
    pub fn from_secs(seconds: f64) -> Time {
        Time { seconds }
    }

    pub fn from_minutes(minutes: f64) -> Time {
        Time {
            seconds: minutes * 60.0,
        }
    }

    pub fn from_chrono_duration(duration: chrono::Duration) -> Time {
        Time {
            seconds: duration.num_milliseconds() as f64 / 1000.0,
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    pub fn as_minutes(&self) -> f64 {
        self.seconds / 60.0
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Angle {
    radians: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn as_radians(&self) -> f64 {
        self.radians
    }
}

impl Add<Angle> for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() + rhs.as_radians())
    }
}

impl Sub<Angle> for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() - rhs.as_radians())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Velocity {
    meters_per_second: f64,
}

impl std::fmt::Debug for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m/s", self.meters_per_second)
    }
}

impl Velocity {
    pub fn from_meters_per_second(meters_per_second: f64) -> Velocity {
        Velocity { meters_per_second }
    }

    pub fn from_kilometers_per_second(km_per_second: f64) -> Velocity {
        Velocity {
            meters_per_second: km_per_second * 1000.0,
        }
    }

    pub fn as_meters_per_second(&self) -> f64 {
        self.meters_per_second
    }

    pub fn as_kilometers_per_second(&self) -> f64 {
        self.meters_per_second / 1000.0
    }
}

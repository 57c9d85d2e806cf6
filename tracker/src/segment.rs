//! Splits a ground track wherever the longitude wraps so a map can draw each
//! piece as a plain polyline.

use crate::units::Angle;
use orbtypes::prelude::*;

/// Direction the sub-satellite point moves in longitude.
///
/// Decided by inclination alone (`0 <= inc < 90` is prograde), an approximation
/// that ignores node geometry.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OrbitDirection {
    Prograde,
    Retrograde,
}

impl OrbitDirection {
    pub fn from_inclination(inclination: Angle) -> Self {
        let deg = inclination.as_degrees();
        if (0.0..90.0).contains(&deg) {
            OrbitDirection::Prograde
        } else {
            OrbitDirection::Retrograde
        }
    }

    /// True when going from `current` to `next` longitude runs against the
    /// direction of travel, i.e. the track wrapped
    fn wraps(self, current: f64, next: f64) -> bool {
        match self {
            OrbitDirection::Prograde => current > next,
            OrbitDirection::Retrograde => current < next,
        }
    }
}

/// Cuts `points` between every pair where the longitude reverses direction.
///
/// Concatenating the segments gives back `points` unchanged. Fewer than two
/// points give no segments.
pub fn segment_ground_track(
    points: Vec<GroundTrackPoint>,
    direction: OrbitDirection,
) -> GroundTrackSegments {
    if points.len() < 2 {
        return GroundTrackSegments::default();
    }

    let cuts: Vec<usize> = points
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| direction.wraps(pair[0].x, pair[1].x))
        .map(|(i, _)| i + 1)
        .collect();

    let mut segments = Vec::with_capacity(cuts.len() + 1);
    let mut rest = points;
    for cut in cuts.into_iter().rev() {
        segments.push(rest.split_off(cut));
    }
    segments.push(rest);
    segments.reverse();

    GroundTrackSegments(segments)
}

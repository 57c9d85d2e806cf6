use crate::{
    model::{ModelError, OrbitalState},
    position::locate,
};
use orbtypes::prelude::*;

pub const DEFAULT_WINDOW_MINUTES: u32 = 180;

/// Longest accepted window, one day
pub const MAX_WINDOW_MINUTES: u32 = 24 * 60;

const SAMPLE_STEP_SECONDS: i64 = 30;

/// Spacing between ground track samples
pub fn sample_step() -> chrono::Duration {
    chrono::Duration::seconds(SAMPLE_STEP_SECONDS)
}

/// Sample instants covering `window_minutes` after `start`, both ends included
pub fn sample_instants(
    start: UtcTimestamp,
    window_minutes: u32,
) -> impl Iterator<Item = UtcTimestamp> {
    let samples = i64::from(window_minutes) * 2;
    (0..=samples).map(move |i| start + chrono::Duration::seconds(SAMPLE_STEP_SECONDS * i))
}

/// Raw (unsegmented) ground track of `state` starting at `start`.
///
/// Yields `2 * window_minutes + 1` points in time order. A single failed
/// propagation fails the whole track.
pub fn generate_ground_track(
    state: &OrbitalState,
    start: UtcTimestamp,
    window_minutes: u32,
) -> Result<Vec<GroundTrackPoint>, ModelError> {
    sample_instants(start, window_minutes)
        .map(|t| -> Result<GroundTrackPoint, ModelError> {
            let geo = locate(state, &t)?;
            Ok(GroundTrackPoint {
                x: geo.longitude.as_degrees(),
                y: geo.latitude.as_degrees(),
                time_stamp: t.format(TRACK_TIMESTAMP_FORMAT).to_string(),
            })
        })
        .collect()
}

use crate::{
    geodetic::{self, GeodeticPosition},
    model::{ModelError, OrbitalState},
};
use orbtypes::prelude::*;

/// Sub-satellite point of `state` at `t`
pub fn locate(state: &OrbitalState, t: &UtcTimestamp) -> Result<GeodeticPosition, ModelError> {
    let eci = state.propagate(t)?;
    Ok(geodetic::eci_to_geodetic(&eci.position, geodetic::gmst(t)))
}

/// Position snapshot of `state` at `t`, in the shape the store persists.
///
/// Callers normally pass "now" truncated to whole seconds.
pub fn compute_position(
    state: &OrbitalState,
    t: &UtcTimestamp,
) -> Result<ComputedPosition, ModelError> {
    let geo = locate(state, t)?;
    Ok(ComputedPosition {
        name: state.name().to_owned(),
        satnum: state.satnum(),
        latitude: geo.latitude.as_degrees(),
        longitude: geo.longitude.as_degrees(),
        speed: geodetic::circular_speed(geo.height).as_kilometers_per_second(),
        orbital_period: geodetic::orbital_period(geo.height).as_minutes(),
        inclination: state.inclination().as_degrees(),
        epoch_days: state.epoch_days(),
        tle_line_one: state.line1().to_owned(),
        tle_line_two: state.line2().to_owned(),
    })
}

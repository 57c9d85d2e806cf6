pub use crate::catalog::CatalogNumber;
pub use crate::position::ComputedPosition;
pub use crate::time::{truncate_to_seconds, UtcTimestamp, TRACK_TIMESTAMP_FORMAT};
pub use crate::tle::{TleRecord, TLE_LINE_LEN};
pub use crate::track::{GroundTrackPoint, GroundTrackSegments};

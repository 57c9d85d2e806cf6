use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GroundTrackPoint {
    /// Longitude, [deg]
    pub x: f64,
    /// Latitude, [deg]
    pub y: f64,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

/// A ground track split into runs that never cross the antimeridian.
///
/// Serializes as a plain array of arrays of points.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundTrackSegments(pub Vec<Vec<GroundTrackPoint>>);

impl GroundTrackSegments {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<GroundTrackPoint>> {
        self.0.iter()
    }

    /// All points in order, as they were before segmentation
    pub fn points(&self) -> impl Iterator<Item = &GroundTrackPoint> {
        self.0.iter().flatten()
    }

    pub fn num_points(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Vec<GroundTrackPoint>>> for GroundTrackSegments {
    fn from(value: Vec<Vec<GroundTrackPoint>>) -> Self {
        GroundTrackSegments(value)
    }
}

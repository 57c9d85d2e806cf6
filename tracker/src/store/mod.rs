//! Persistence contract for the tracked catalog, plus two small implementations.

use orbtypes::prelude::*;
use serde::{Deserialize, Serialize};
use std::{io, path::PathBuf};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub mod json_file;
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Satellite {0} is not in the store")]
    UnknownSatellite(CatalogNumber),
    #[error("Satellite {0} is already in the store")]
    DuplicateSatellite(CatalogNumber),
    #[error("Store file '{path}' IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Store serialization error")]
    Json(#[from] serde_json::Error),
}

/// One persisted satellite.
///
/// The ground track is kept as the serialized segment set text.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SatelliteRow {
    pub name: String,
    pub satnum: CatalogNumber,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub orbital_period: f64,
    pub inclination: f64,
    pub epoch_days: f64,
    pub tle_line_one: String,
    pub tle_line_two: String,
    #[serde(default)]
    pub ground_track: Option<String>,
}

impl SatelliteRow {
    pub fn tle(&self) -> TleRecord {
        TleRecord::new(&self.name, &self.tle_line_one, &self.tle_line_two)
    }

    pub fn apply_position(&mut self, pos: &ComputedPosition) {
        self.name.clone_from(&pos.name);
        self.latitude = pos.latitude;
        self.longitude = pos.longitude;
        self.speed = pos.speed;
        self.orbital_period = pos.orbital_period;
        self.inclination = pos.inclination;
        self.epoch_days = pos.epoch_days;
    }

    /// Decodes the stored ground track, if there is one
    pub fn ground_track_segments(&self) -> Result<Option<GroundTrackSegments>, StoreError> {
        self.ground_track
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StoreError::from)
    }
}

impl From<&ComputedPosition> for SatelliteRow {
    fn from(pos: &ComputedPosition) -> Self {
        SatelliteRow {
            name: pos.name.clone(),
            satnum: pos.satnum,
            latitude: pos.latitude,
            longitude: pos.longitude,
            speed: pos.speed,
            orbital_period: pos.orbital_period,
            inclination: pos.inclination,
            epoch_days: pos.epoch_days,
            tle_line_one: pos.tle_line_one.clone(),
            tle_line_two: pos.tle_line_two.clone(),
            ground_track: None,
        }
    }
}

pub trait SatelliteStore {
    /// Element sets of every stored satellite
    fn fetch_two_line_elements(&self) -> Result<Vec<TleRecord>, StoreError>;

    /// Overwrites the position fields of an existing row
    fn update_satellite_position(&mut self, position: &ComputedPosition)
        -> Result<(), StoreError>;

    /// Replaces the stored ground track of an existing row
    fn update_satellite_ground_track(
        &mut self,
        satnum: CatalogNumber,
        segments: &GroundTrackSegments,
    ) -> Result<(), StoreError>;

    fn insert_new_satellite(&mut self, position: &ComputedPosition) -> Result<(), StoreError>;

    /// Replaces only the element lines of an existing row
    fn update_satellite_elements(
        &mut self,
        satnum: CatalogNumber,
        tle_line_one: &str,
        tle_line_two: &str,
    ) -> Result<(), StoreError>;

    /// When the element lines were last refreshed from the feed
    fn fetch_last_tle_update(&self) -> Result<Option<UtcTimestamp>, StoreError>;

    fn record_tle_update(&mut self, at: UtcTimestamp) -> Result<(), StoreError>;
}

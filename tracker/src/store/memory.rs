use super::{SatelliteRow, SatelliteStore, StoreError};
use orbtypes::prelude::*;
use std::collections::BTreeMap;

/// Rows kept in catalog number order
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MemoryStore {
    rows: BTreeMap<CatalogNumber, SatelliteRow>,
    last_tle_update: Option<UtcTimestamp>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I: IntoIterator<Item = SatelliteRow>>(
        rows: I,
        last_tle_update: Option<UtcTimestamp>,
    ) -> Self {
        Self {
            rows: rows.into_iter().map(|r| (r.satnum, r)).collect(),
            last_tle_update,
        }
    }

    /// Inserts or replaces a row as-is
    pub fn put_row(&mut self, row: SatelliteRow) {
        self.rows.insert(row.satnum, row);
    }

    pub fn row(&self, satnum: CatalogNumber) -> Option<&SatelliteRow> {
        self.rows.get(&satnum)
    }

    pub fn rows(&self) -> impl Iterator<Item = &SatelliteRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_tle_update(&self) -> Option<UtcTimestamp> {
        self.last_tle_update
    }

    pub fn remove_row(&mut self, satnum: CatalogNumber) -> Option<SatelliteRow> {
        self.rows.remove(&satnum)
    }

    pub(super) fn set_last_tle_update(&mut self, at: Option<UtcTimestamp>) {
        self.last_tle_update = at;
    }

    fn row_mut(&mut self, satnum: CatalogNumber) -> Result<&mut SatelliteRow, StoreError> {
        self.rows
            .get_mut(&satnum)
            .ok_or(StoreError::UnknownSatellite(satnum))
    }
}

impl SatelliteStore for MemoryStore {
    fn fetch_two_line_elements(&self) -> Result<Vec<TleRecord>, StoreError> {
        Ok(self.rows.values().map(SatelliteRow::tle).collect())
    }

    fn update_satellite_position(
        &mut self,
        position: &ComputedPosition,
    ) -> Result<(), StoreError> {
        self.row_mut(position.satnum)?.apply_position(position);
        Ok(())
    }

    fn update_satellite_ground_track(
        &mut self,
        satnum: CatalogNumber,
        segments: &GroundTrackSegments,
    ) -> Result<(), StoreError> {
        let blob = serde_json::to_string(segments)?;
        self.row_mut(satnum)?.ground_track = Some(blob);
        Ok(())
    }

    fn insert_new_satellite(&mut self, position: &ComputedPosition) -> Result<(), StoreError> {
        if self.rows.contains_key(&position.satnum) {
            return Err(StoreError::DuplicateSatellite(position.satnum));
        }
        self.rows.insert(position.satnum, SatelliteRow::from(position));
        Ok(())
    }

    fn update_satellite_elements(
        &mut self,
        satnum: CatalogNumber,
        tle_line_one: &str,
        tle_line_two: &str,
    ) -> Result<(), StoreError> {
        let row = self.row_mut(satnum)?;
        row.tle_line_one = tle_line_one.to_owned();
        row.tle_line_two = tle_line_two.to_owned();
        Ok(())
    }

    fn fetch_last_tle_update(&self) -> Result<Option<UtcTimestamp>, StoreError> {
        Ok(self.last_tle_update)
    }

    fn record_tle_update(&mut self, at: UtcTimestamp) -> Result<(), StoreError> {
        self.last_tle_update = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(satnum: u64) -> ComputedPosition {
        ComputedPosition {
            name: format!("SAT {satnum}"),
            satnum: satnum.into(),
            latitude: 1.0,
            longitude: 2.0,
            speed: 7.6,
            orbital_period: 92.0,
            inclination: 51.6,
            epoch_days: 148.2,
            tle_line_one: "1".to_owned(),
            tle_line_two: "2".to_owned(),
        }
    }

    #[test]
    fn insert_and_update() {
        let mut store = MemoryStore::new();
        store.insert_new_satellite(&position(5)).unwrap();
        store.insert_new_satellite(&position(3)).unwrap();
        assert!(matches!(
            store.insert_new_satellite(&position(3)),
            Err(StoreError::DuplicateSatellite(n)) if n == CatalogNumber::from(3)
        ));

        let mut moved = position(5);
        moved.latitude = -45.0;
        moved.tle_line_one = "ignored".to_owned();
        store.update_satellite_position(&moved).unwrap();
        let row = store.row(CatalogNumber::from(5)).unwrap();
        assert_eq!(row.latitude, -45.0);
        assert_eq!(row.tle_line_one, "1");

        store
            .update_satellite_elements(CatalogNumber::from(3), "1 new", "2 new")
            .unwrap();
        let tles = store.fetch_two_line_elements().unwrap();
        assert_eq!(tles.len(), 2);
        assert_eq!(tles[0], TleRecord::new("SAT 3", "1 new", "2 new"));
        assert_eq!(tles[1].name, "SAT 5");
    }

    #[test]
    fn unknown_satellite() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.update_satellite_position(&position(1)),
            Err(StoreError::UnknownSatellite(_))
        ));
        assert!(matches!(
            store.update_satellite_ground_track(CatalogNumber::from(1), &GroundTrackSegments::default()),
            Err(StoreError::UnknownSatellite(_))
        ));
        assert!(matches!(
            store.update_satellite_elements(CatalogNumber::from(1), "", ""),
            Err(StoreError::UnknownSatellite(_))
        ));
    }

    #[test]
    fn ground_track_blob() {
        let mut store = MemoryStore::new();
        store.insert_new_satellite(&position(7)).unwrap();
        let segs = GroundTrackSegments(vec![vec![GroundTrackPoint {
            x: 1.0,
            y: 2.0,
            time_stamp: "now".to_owned(),
        }]]);
        store
            .update_satellite_ground_track(CatalogNumber::from(7), &segs)
            .unwrap();
        let row = store.row(CatalogNumber::from(7)).unwrap();
        assert_eq!(
            row.ground_track.as_deref(),
            Some(r#"[[{"x":1.0,"y":2.0,"timeStamp":"now"}]]"#)
        );
        assert_eq!(row.ground_track_segments().unwrap(), Some(segs));
    }
}

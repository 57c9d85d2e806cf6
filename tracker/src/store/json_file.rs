use super::{MemoryStore, SatelliteRow, SatelliteStore, StoreError};
use orbtypes::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

#[derive(Default, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    last_tle_update: Option<UtcTimestamp>,
    #[serde(default)]
    satellites: Vec<SatelliteRow>,
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    last_tle_update: Option<UtcTimestamp>,
    satellites: Vec<&'a SatelliteRow>,
}

/// State a write replaced, put back when the document can't be saved
enum Undo {
    Row(CatalogNumber, Option<SatelliteRow>),
    LastTleUpdate(Option<UtcTimestamp>),
}

/// A [`MemoryStore`] mirrored to a JSON file after every write.
///
/// The file is replaced through a sibling temp file so readers never see a
/// half-written document. A write that can't be saved is undone in memory too,
/// so the in-memory rows always match the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens `path`, starting empty if it doesn't exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let doc = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<StoreDocument>(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file doesn't exist, starting empty");
                StoreDocument::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self {
            inner: MemoryStore::from_rows(doc.satellites, doc.last_tle_update),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    fn persist(&self) -> Result<(), StoreError> {
        let doc = StoreDocumentRef {
            last_tle_update: self.inner.last_tle_update(),
            satellites: self.inner.rows().collect(),
        };
        let content = serde_json::to_string_pretty(&doc)?;
        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    /// Saves the document, reverting `undo` in memory if that fails
    fn commit(&mut self, undo: Undo) -> Result<(), StoreError> {
        let err = match self.persist() {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        match undo {
            Undo::Row(_, Some(row)) => self.inner.put_row(row),
            Undo::Row(satnum, None) => {
                self.inner.remove_row(satnum);
            }
            Undo::LastTleUpdate(at) => self.inner.set_last_tle_update(at),
        }
        warn!(path = %self.path.display(), error = %err, "Store write reverted");
        Err(err)
    }

    fn row_undo(&self, satnum: CatalogNumber) -> Undo {
        Undo::Row(satnum, self.inner.row(satnum).cloned())
    }
}

impl SatelliteStore for JsonFileStore {
    fn fetch_two_line_elements(&self) -> Result<Vec<TleRecord>, StoreError> {
        self.inner.fetch_two_line_elements()
    }

    fn update_satellite_position(
        &mut self,
        position: &ComputedPosition,
    ) -> Result<(), StoreError> {
        let undo = self.row_undo(position.satnum);
        self.inner.update_satellite_position(position)?;
        self.commit(undo)
    }

    fn update_satellite_ground_track(
        &mut self,
        satnum: CatalogNumber,
        segments: &GroundTrackSegments,
    ) -> Result<(), StoreError> {
        let undo = self.row_undo(satnum);
        self.inner.update_satellite_ground_track(satnum, segments)?;
        self.commit(undo)
    }

    fn insert_new_satellite(&mut self, position: &ComputedPosition) -> Result<(), StoreError> {
        let undo = self.row_undo(position.satnum);
        self.inner.insert_new_satellite(position)?;
        self.commit(undo)
    }

    fn update_satellite_elements(
        &mut self,
        satnum: CatalogNumber,
        tle_line_one: &str,
        tle_line_two: &str,
    ) -> Result<(), StoreError> {
        let undo = self.row_undo(satnum);
        self.inner
            .update_satellite_elements(satnum, tle_line_one, tle_line_two)?;
        self.commit(undo)
    }

    fn fetch_last_tle_update(&self) -> Result<Option<UtcTimestamp>, StoreError> {
        self.inner.fetch_last_tle_update()
    }

    fn record_tle_update(&mut self, at: UtcTimestamp) -> Result<(), StoreError> {
        let undo = Undo::LastTleUpdate(self.inner.last_tle_update());
        self.inner.record_tle_update(at)?;
        self.commit(undo)
    }
}

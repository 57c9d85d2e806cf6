//! The refresh cycles run against a store, a feed and a clock.

use crate::{
    clock::Clock,
    config::{Config, ConfigError},
    ground_track::generate_ground_track,
    model::OrbitalState,
    position::compute_position,
    schedule::Cycle,
    segment::{segment_ground_track, OrbitDirection},
    source::{ElementSource, SourceError},
    store::{SatelliteStore, StoreError},
};
use elements::parse_element_sets;
use orbtypes::prelude::*;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServiceConfig {
    pub window_minutes: u32,
    pub catalog_group: String,
    pub catalog_cooldown: chrono::Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            window_minutes: crate::ground_track::DEFAULT_WINDOW_MINUTES,
            catalog_group: "stations".to_owned(),
            catalog_cooldown: chrono::Duration::hours(3),
        }
    }
}

impl TryFrom<&Config> for ServiceConfig {
    type Error = ConfigError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        let catalog_cooldown = chrono::Duration::from_std(cfg.schedule.catalog_cooldown)
            .map_err(|_| {
                ConfigError::Invalid("schedule.catalog-cooldown is out of range".to_owned())
            })?;
        Ok(Self {
            window_minutes: cfg.ground_track.window_minutes,
            catalog_group: cfg.feed.group.clone(),
            catalog_cooldown,
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct CycleReport {
    pub attempted: usize,
    pub updated: usize,
    pub failed: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CatalogRefresh {
    /// Still inside the cool-down, nothing was fetched
    Skipped { next_update: UtcTimestamp },
    Updated(CycleReport),
}

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// True once `cooldown` has fully elapsed since `last_update`
pub fn should_update(
    now: UtcTimestamp,
    last_update: UtcTimestamp,
    cooldown: chrono::Duration,
) -> bool {
    now > last_update + cooldown
}

pub struct TrackerService<S, E, C> {
    store: S,
    source: E,
    clock: C,
    config: ServiceConfig,
}

impl<S, E, C> TrackerService<S, E, C>
where
    S: SatelliteStore,
    E: ElementSource,
    C: Clock,
{
    pub fn new(store: S, source: E, clock: C, config: ServiceConfig) -> Self {
        Self {
            store,
            source,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn now(&self) -> UtcTimestamp {
        truncate_to_seconds(self.clock.now())
    }

    /// Recomputes and stores the current position of every stored satellite
    pub fn refresh_positions(&mut self) -> Result<CycleReport, CycleError> {
        let now = self.now();
        let tles = self.store.fetch_two_line_elements()?;

        let mut report = CycleReport::default();
        for tle in tles.iter() {
            report.attempted += 1;
            let position =
                match OrbitalState::from_tle(tle).and_then(|s| compute_position(&s, &now)) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(satellite = %tle.name, error = %e, "Failed to compute position");
                        report.failed += 1;
                        continue;
                    }
                };

            match self.store.update_satellite_position(&position) {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!(satnum = %position.satnum, error = %e, "Failed to store position");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Recomputes and replaces the segmented ground track of every stored satellite
    pub fn refresh_ground_tracks(&mut self) -> Result<CycleReport, CycleError> {
        let start = self.now();
        let tles = self.store.fetch_two_line_elements()?;

        let mut report = CycleReport::default();
        for tle in tles.iter() {
            report.attempted += 1;
            let state = match OrbitalState::from_tle(tle) {
                Ok(s) => s,
                Err(e) => {
                    warn!(satellite = %tle.name, error = %e, "Invalid stored element set");
                    report.failed += 1;
                    continue;
                }
            };
            let points = match generate_ground_track(&state, start, self.config.window_minutes)
            {
                Ok(p) => p,
                Err(e) => {
                    warn!(satnum = %state.satnum(), error = %e, "Failed to generate ground track");
                    report.failed += 1;
                    continue;
                }
            };
            let direction = OrbitDirection::from_inclination(state.inclination());
            let segments = segment_ground_track(points, direction);

            match self
                .store
                .update_satellite_ground_track(state.satnum(), &segments)
            {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!(satnum = %state.satnum(), error = %e, "Failed to store ground track");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Pulls fresh element lines for satellites already in the store.
    ///
    /// Nothing is fetched until the cool-down since the last update has elapsed.
    /// The update time is only recorded when every known satellite in the feed
    /// was stored. Satellites the store doesn't know are ignored, see
    /// [`Self::seed_catalog`].
    pub fn refresh_catalog(&mut self) -> Result<CatalogRefresh, CycleError> {
        let now = self.now();
        if let Some(last) = self.store.fetch_last_tle_update()? {
            if !should_update(now, last, self.config.catalog_cooldown) {
                return Ok(CatalogRefresh::Skipped {
                    next_update: last + self.config.catalog_cooldown,
                });
            }
        }

        let feed = self.source.fetch_group(&self.config.catalog_group)?;
        let fresh = parse_element_sets(&feed);
        let known = self.known_satellites()?;
        debug!(
            fetched = fresh.len(),
            known = known.len(),
            "Refreshing element sets"
        );

        let mut report = CycleReport::default();
        for tle in fresh.iter() {
            match tle.catalog_number() {
                Some(satnum) if known.contains(&satnum) => (),
                _ => continue,
            }
            report.attempted += 1;

            let state = match OrbitalState::from_tle(tle) {
                Ok(s) => s,
                Err(e) => {
                    warn!(satellite = %tle.name, error = %e, "Rejecting fetched element set");
                    report.failed += 1;
                    continue;
                }
            };

            match self
                .store
                .update_satellite_elements(state.satnum(), state.line1(), state.line2())
            {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!(satnum = %state.satnum(), error = %e, "Failed to store element set");
                    report.failed += 1;
                }
            }
        }

        // A failed write keeps the cool-down open so the next tick fetches again
        if report.failed == 0 {
            self.store.record_tle_update(now)?;
        } else {
            warn!(
                failed = report.failed,
                "Element set refresh incomplete, not recording the update time"
            );
        }
        Ok(CatalogRefresh::Updated(report))
    }

    /// Inserts every satellite in the feed that the store doesn't have yet,
    /// with its position at the current time
    pub fn seed_catalog(&mut self) -> Result<CycleReport, CycleError> {
        let now = self.now();
        let feed = self.source.fetch_group(&self.config.catalog_group)?;
        let mut known = self.known_satellites()?;

        let mut report = CycleReport::default();
        for tle in parse_element_sets(&feed).iter() {
            if tle
                .catalog_number()
                .map(|n| known.contains(&n))
                .unwrap_or(false)
            {
                continue;
            }
            report.attempted += 1;

            let position =
                match OrbitalState::from_tle(tle).and_then(|s| compute_position(&s, &now)) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(satellite = %tle.name, error = %e, "Not seeding satellite");
                        report.failed += 1;
                        continue;
                    }
                };

            match self.store.insert_new_satellite(&position) {
                Ok(()) => {
                    known.insert(position.satnum);
                    report.updated += 1;
                }
                Err(e) => {
                    warn!(satnum = %position.satnum, error = %e, "Failed to insert satellite");
                    report.failed += 1;
                }
            }
        }

        self.store.record_tle_update(now)?;
        Ok(report)
    }

    /// Runs one cycle, logging the outcome instead of returning it
    pub fn run_cycle(&mut self, cycle: Cycle) {
        let result = match cycle {
            Cycle::Positions => self.refresh_positions().map(Some),
            Cycle::GroundTracks => self.refresh_ground_tracks().map(Some),
            Cycle::Catalog => self.refresh_catalog().map(|r| match r {
                CatalogRefresh::Skipped { next_update } => {
                    debug!(%cycle, %next_update, "Element sets are fresh enough");
                    None
                }
                CatalogRefresh::Updated(report) => Some(report),
            }),
        };

        match result {
            Ok(Some(report)) if report.failed > 0 => warn!(
                %cycle,
                attempted = report.attempted,
                updated = report.updated,
                failed = report.failed,
                "Cycle finished with failures"
            ),
            Ok(Some(report)) if cycle == Cycle::Positions => debug!(
                %cycle,
                updated = report.updated,
                "Cycle finished"
            ),
            Ok(Some(report)) => info!(%cycle, updated = report.updated, "Cycle finished"),
            Ok(None) => (),
            Err(e) => error!(%cycle, error = %e, "Cycle aborted"),
        }
    }

    fn known_satellites(&self) -> Result<HashSet<CatalogNumber>, StoreError> {
        Ok(self
            .store
            .fetch_two_line_elements()?
            .iter()
            .filter_map(TleRecord::catalog_number)
            .collect())
    }
}

//! Fixed-interval ticker for the refresh cycles.

use crate::config::ScheduleConfig;
use derive_more::Display;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum Cycle {
    #[display(fmt = "positions")]
    Positions,
    #[display(fmt = "ground-tracks")]
    GroundTracks,
    #[display(fmt = "catalog")]
    Catalog,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cadence {
    interval: Duration,
    next: Instant,
}

impl Cadence {
    /// First due at `start`
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Moves to the next slot. Missed slots are skipped rather than run back to back.
    fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Schedule {
    cadences: Vec<(Cycle, Cadence)>,
}

impl Schedule {
    /// Every cycle is due immediately at `start`
    pub fn new(cfg: &ScheduleConfig, start: Instant) -> Self {
        Self {
            cadences: vec![
                (Cycle::Positions, Cadence::new(cfg.positions, start)),
                (Cycle::GroundTracks, Cadence::new(cfg.ground_tracks, start)),
                (Cycle::Catalog, Cadence::new(cfg.catalog, start)),
            ],
        }
    }

    /// Cycles due at `now`, in fixed order, each advanced to its next slot
    pub fn due(&mut self, now: Instant) -> Vec<Cycle> {
        self.cadences
            .iter_mut()
            .filter(|(_, c)| c.is_due(now))
            .map(|(cycle, c)| {
                c.advance(now);
                *cycle
            })
            .collect()
    }

    /// When the earliest cycle becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.cadences.iter().map(|(_, c)| c.next()).min()
    }

    pub fn cadence(&self, cycle: Cycle) -> Option<&Cadence> {
        self.cadences
            .iter()
            .find(|(c, _)| *c == cycle)
            .map(|(_, cadence)| cadence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ScheduleConfig {
        ScheduleConfig {
            positions: Duration::from_secs(5),
            ground_tracks: Duration::from_secs(60),
            catalog: Duration::from_secs(30),
            catalog_cooldown: Duration::from_secs(3600),
        }
    }

    #[test]
    fn everything_runs_at_start() {
        let t0 = Instant::now();
        let mut sched = Schedule::new(&cfg(), t0);
        assert_eq!(
            sched.due(t0),
            vec![Cycle::Positions, Cycle::GroundTracks, Cycle::Catalog]
        );
        assert!(sched.due(t0).is_empty());
        assert_eq!(sched.next_deadline(), Some(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn respects_intervals() {
        let t0 = Instant::now();
        let mut sched = Schedule::new(&cfg(), t0);
        sched.due(t0);

        assert!(sched.due(t0 + Duration::from_secs(4)).is_empty());
        assert_eq!(sched.due(t0 + Duration::from_secs(5)), vec![Cycle::Positions]);
        assert_eq!(
            sched.due(t0 + Duration::from_secs(30)),
            vec![Cycle::Positions, Cycle::Catalog]
        );
        assert_eq!(
            sched.cadence(Cycle::Catalog).map(Cadence::next),
            Some(t0 + Duration::from_secs(60))
        );
        assert_eq!(
            sched.due(t0 + Duration::from_secs(60)),
            vec![Cycle::Positions, Cycle::GroundTracks, Cycle::Catalog]
        );
    }

    #[test]
    fn no_burst_after_stall() {
        let t0 = Instant::now();
        let mut sched = Schedule::new(&cfg(), t0);
        sched.due(t0);

        // Positions missed many slots, it runs once and is rescheduled from now
        let late = t0 + Duration::from_secs(22);
        assert_eq!(sched.due(late), vec![Cycle::Positions]);
        assert_eq!(
            sched.cadence(Cycle::Positions).map(Cadence::next),
            Some(late + Duration::from_secs(5))
        );
        assert!(sched.due(late + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn cycle_names() {
        assert_eq!(Cycle::GroundTracks.to_string(), "ground-tracks");
        assert_eq!(Cycle::Positions.to_string(), "positions");
    }
}

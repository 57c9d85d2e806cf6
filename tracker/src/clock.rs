use chrono::Utc;
use orbtypes::time::UtcTimestamp;
use std::{cell::Cell, rc::Rc};

pub trait Clock {
    fn now(&self) -> UtcTimestamp;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcTimestamp {
        Utc::now()
    }
}

/// Manually driven clock, clones share the same time
#[derive(Clone, Debug)]
pub struct FixedClock(Rc<Cell<UtcTimestamp>>);

impl FixedClock {
    pub fn new(now: UtcTimestamp) -> Self {
        FixedClock(Rc::new(Cell::new(now)))
    }

    pub fn set(&self, now: UtcTimestamp) {
        self.0.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> UtcTimestamp {
        self.0.get()
    }
}

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{Result, SimError};

/// Whole hours, as stored in travel-time tables.
pub type Hours = u32;
pub type Location = usize;

/// Driver position in time: `(location, hour, day)`.
///
/// Fields are only reachable through accessors so every `State` in
/// circulation has been range-checked against some [`SimConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    location: Location,
    hour: usize,
    day: usize,
}

impl State {
    pub fn new(location: Location, hour: usize, day: usize, config: &SimConfig) -> Result<Self> {
        config.check_location(location)?;
        if hour >= config.hours || day >= config.days {
            return Err(SimError::InvalidTime { hour, day });
        }
        Ok(Self { location, hour, day })
    }

    /// Caller guarantees the fields are in range.
    pub(crate) const fn new_unchecked(location: Location, hour: usize, day: usize) -> Self {
        Self { location, hour, day }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn hour(&self) -> usize {
        self.hour
    }

    pub fn day(&self) -> usize {
        self.day
    }

    pub fn as_tuple(&self) -> (Location, usize, usize) {
        (self.location, self.hour, self.day)
    }

    pub(crate) fn check(&self, config: &SimConfig) -> Result<()> {
        Self::new(self.location, self.hour, self.day, config).map(|_| ())
    }
}

/// A driver decision. `Idle` is the `(0, 0)` pair: reject every request and
/// wait an hour where you are. It is never a trip from location 0 to itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Trip { pickup: Location, drop: Location },
}

impl Action {
    pub fn from_pair(pickup: Location, drop: Location, config: &SimConfig) -> Result<Self> {
        if pickup == 0 && drop == 0 {
            return Ok(Action::Idle);
        }
        config.check_location(pickup)?;
        config.check_location(drop)?;
        if pickup == drop {
            return Err(SimError::InvalidAction { pickup, drop });
        }
        Ok(Action::Trip { pickup, drop })
    }

    pub fn as_pair(&self) -> (Location, Location) {
        match *self {
            Action::Idle => (0, 0),
            Action::Trip { pickup, drop } => (pickup, drop),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Action::Idle)
    }

    pub(crate) fn check(&self, config: &SimConfig) -> Result<()> {
        let (pickup, drop) = self.as_pair();
        Self::from_pair(pickup, drop, config).map(|_| ())
    }
}

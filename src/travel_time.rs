use fxhash::FxHashMap;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::types::{Hours, Location};

/// Caller-owned lookup of whole-hour travel times, indexed by
/// `(origin, destination, hour, day)`.
pub trait TravelTimes {
    fn travel_time(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Option<Hours>;

    fn lookup(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Result<Hours> {
        self.travel_time(origin, destination, hour, day)
            .ok_or(SimError::MissingTravelTimeEntry {
                origin,
                destination,
                hour,
                day,
            })
    }
}

impl<T: TravelTimes + ?Sized> TravelTimes for &T {
    fn travel_time(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Option<Hours> {
        (**self).travel_time(origin, destination, hour, day)
    }
}

/// Dense `m x m x t x d` table, stored flat.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelTimeMatrix {
    locations: usize,
    hours: usize,
    days: usize,
    data: Vec<Hours>,
}

impl TravelTimeMatrix {
    pub fn from_fn<F>(config: &SimConfig, mut f: F) -> Self
    where
        F: FnMut(Location, Location, usize, usize) -> Hours,
    {
        let (m, t, d) = (config.locations, config.hours, config.days);
        let mut data = Vec::with_capacity(m * m * t * d);
        for origin in 0..m {
            for destination in 0..m {
                for hour in 0..t {
                    for day in 0..d {
                        data.push(f(origin, destination, hour, day));
                    }
                }
            }
        }
        Self {
            locations: m,
            hours: t,
            days: d,
            data,
        }
    }

    /// Builds the table from `table[origin][destination][hour][day]`, checking
    /// every dimension against `config`.
    pub fn from_nested(config: &SimConfig, table: &[Vec<Vec<Vec<Hours>>>]) -> Result<Self> {
        check_len("origin", table.len(), config.locations)?;
        let mut data = Vec::with_capacity(config.locations.pow(2) * config.hours * config.days);
        for by_destination in table {
            check_len("destination", by_destination.len(), config.locations)?;
            for by_hour in by_destination {
                check_len("hour", by_hour.len(), config.hours)?;
                for by_day in by_hour {
                    check_len("day", by_day.len(), config.days)?;
                    data.extend_from_slice(by_day);
                }
            }
        }
        Ok(Self {
            locations: config.locations,
            hours: config.hours,
            days: config.days,
            data,
        })
    }

    pub fn set(&mut self, origin: Location, destination: Location, hour: usize, day: usize, value: Hours) -> Result<()> {
        let index = self.offset(origin, destination, hour, day).ok_or_else(|| {
            SimError::TableShape(format!(
                "entry ({origin}, {destination}, {hour}, {day}) is outside a {m}x{m}x{t}x{d} table",
                m = self.locations,
                t = self.hours,
                d = self.days
            ))
        })?;
        self.data[index] = value;
        Ok(())
    }

    fn offset(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Option<usize> {
        if origin >= self.locations || destination >= self.locations || hour >= self.hours || day >= self.days {
            return None;
        }
        Some(((origin * self.locations + destination) * self.hours + hour) * self.days + day)
    }
}

impl TravelTimes for TravelTimeMatrix {
    fn travel_time(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Option<Hours> {
        self.offset(origin, destination, hour, day).map(|i| self.data[i])
    }
}

fn check_len(axis: &str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SimError::TableShape(format!(
            "{axis} axis has {actual} entries, expected {expected}"
        )))
    }
}

/// Table holding only the entries that were inserted.
#[derive(Clone, Debug, Default)]
pub struct SparseTravelTimes {
    entries: FxHashMap<(Location, Location, usize, usize), Hours>,
}

impl SparseTravelTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: Location, destination: Location, hour: usize, day: usize, value: Hours) -> Option<Hours> {
        self.entries.insert((origin, destination, hour, day), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TravelTimes for SparseTravelTimes {
    fn travel_time(&self, origin: Location, destination: Location, hour: usize, day: usize) -> Option<Hours> {
        self.entries.get(&(origin, destination, hour, day)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            locations: 2,
            hours: 3,
            days: 2,
            request_means: vec![1.0, 1.0],
            ..SimConfig::default()
        }
    }

    #[test]
    fn from_fn_indexes_every_axis() {
        let config = small_config();
        let table = TravelTimeMatrix::from_fn(&config, |o, d, h, day| (o * 1000 + d * 100 + h * 10 + day) as Hours);
        assert_eq!(table.travel_time(1, 0, 2, 1), Some(1021));
        assert_eq!(table.travel_time(0, 1, 1, 0), Some(110));
        assert_eq!(table.travel_time(2, 0, 0, 0), None);
        assert_eq!(table.travel_time(0, 0, 3, 0), None);
    }

    #[test]
    fn nested_table_matches_from_fn() {
        let config = small_config();
        let nested: Vec<Vec<Vec<Vec<Hours>>>> = (0..2)
            .map(|o| {
                (0..2)
                    .map(|d| (0..3).map(|h| (0..2).map(|day| (o + d + h + day) as Hours).collect()).collect())
                    .collect()
            })
            .collect();
        let dense = TravelTimeMatrix::from_nested(&config, &nested).unwrap();
        let expected = TravelTimeMatrix::from_fn(&config, |o, d, h, day| (o + d + h + day) as Hours);
        assert_eq!(dense, expected);
    }

    #[test]
    fn nested_table_with_wrong_shape_is_rejected() {
        let config = small_config();
        let nested = vec![vec![vec![vec![1; 2]; 3]; 2]; 3];
        assert!(matches!(
            TravelTimeMatrix::from_nested(&config, &nested),
            Err(SimError::TableShape(_))
        ));
        let short_days = vec![vec![vec![vec![1; 1]; 3]; 2]; 2];
        assert!(TravelTimeMatrix::from_nested(&config, &short_days).is_err());
    }

    #[test]
    fn set_overwrites_one_entry() {
        let config = small_config();
        let mut table = TravelTimeMatrix::from_fn(&config, |_, _, _, _| 1);
        table.set(0, 1, 2, 1, 9).unwrap();
        assert_eq!(table.travel_time(0, 1, 2, 1), Some(9));
        assert_eq!(table.travel_time(0, 1, 2, 0), Some(1));
        assert!(matches!(table.set(0, 1, 3, 0, 9), Err(SimError::TableShape(_))));
        assert!(matches!(table.set(2, 0, 0, 0, 9), Err(SimError::TableShape(_))));
    }

    #[test]
    fn sparse_lookup_reports_missing_entries() {
        let mut table = SparseTravelTimes::new();
        assert!(table.is_empty());
        assert_eq!(table.insert(0, 2, 10, 3, 1), None);
        assert_eq!(table.insert(0, 2, 10, 3, 2), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(0, 2, 10, 3).unwrap(), 2);
        assert!(matches!(
            table.lookup(2, 4, 11, 3),
            Err(SimError::MissingTravelTimeEntry {
                origin: 2,
                destination: 4,
                hour: 11,
                day: 3
            })
        ));
    }
}

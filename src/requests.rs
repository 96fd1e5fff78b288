use rand::Rng;
use rand::seq::index;
use rand_distr::{Distribution, Poisson};
use tracing::{trace, warn};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::space::ActionSpace;
use crate::types::{Action, State};

/// Ride requests offered to the driver at one decision point. The last entry
/// is always the idle action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requests {
    /// Indices into the [`ActionSpace`], parallel to `actions`.
    pub indices: Vec<usize>,
    pub actions: Vec<Action>,
}

impl Requests {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of customer requests, not counting the idle action.
    pub fn customer_count(&self) -> usize {
        self.actions.len().saturating_sub(1)
    }
}

/// Draws per-location Poisson request counts and turns them into sampled
/// trip actions.
#[derive(Clone, Debug)]
pub struct RequestSampler {
    demand: Vec<Poisson<f64>>,
    max_requests: usize,
}

impl RequestSampler {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let demand = config
            .request_means
            .iter()
            .enumerate()
            .map(|(location, &mean)| {
                Poisson::new(mean).map_err(|e| {
                    SimError::InvalidConfiguration(format!(
                        "request mean {mean} for location {location}: {e}"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            demand,
            max_requests: config.max_requests,
        })
    }

    /// Unclamped Poisson draw for `location`.
    pub fn raw_request_count<R: Rng + ?Sized>(&self, location: usize, rng: &mut R) -> Result<usize> {
        let dist = self.demand.get(location).ok_or(SimError::InvalidLocation {
            location,
            locations: self.demand.len(),
        })?;
        Ok(dist.sample(rng) as usize)
    }

    pub fn request_count<R: Rng + ?Sized>(&self, location: usize, rng: &mut R) -> Result<usize> {
        let raw = self.raw_request_count(location, rng)?;
        if raw > self.max_requests {
            warn!(location, raw, cap = self.max_requests, "clamping request count");
        }
        Ok(raw.min(self.max_requests))
    }

    pub fn sample<R: Rng + ?Sized>(&self, state: &State, actions: &ActionSpace, rng: &mut R) -> Result<Requests> {
        let count = self.request_count(state.location(), rng)?;
        choose_requests(actions, count, rng)
    }
}

/// Picks `count` distinct trips uniformly without replacement and appends the
/// idle action.
pub fn choose_requests<R: Rng + ?Sized>(actions: &ActionSpace, count: usize, rng: &mut R) -> Result<Requests> {
    let available = actions.trip_count();
    if count > available {
        return Err(SimError::InvalidSampleSize {
            requested: count,
            available,
        });
    }

    let mut indices: Vec<usize> = index::sample(rng, available, count)
        .into_iter()
        .map(|i| i + 1)
        .collect();
    indices.push(ActionSpace::IDLE_INDEX);

    let space = actions.as_slice();
    let actions = indices.iter().map(|&i| space[i]).collect();
    trace!(count, ?indices, "sampled requests");
    Ok(Requests { indices, actions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn busy_location_averages_its_mean() {
        let config = SimConfig::default();
        let sampler = RequestSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 20_000;
        let total: usize = (0..draws)
            .map(|_| sampler.raw_request_count(1, &mut rng).unwrap())
            .sum();
        let mean = total as f64 / draws as f64;
        assert!((mean - 12.0).abs() < 0.3, "mean was {mean}");
    }

    #[test]
    fn count_never_exceeds_cap() {
        let config = SimConfig {
            request_means: vec![2.0, 40.0, 4.0, 7.0, 8.0],
            ..SimConfig::default()
        };
        let sampler = RequestSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(sampler.request_count(1, &mut rng).unwrap() <= 15);
        }
    }

    #[test]
    fn sampled_requests_are_distinct_trips_plus_idle() {
        let config = SimConfig::default();
        let space = ActionSpace::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        let requests = choose_requests(&space, 15, &mut rng).unwrap();

        assert_eq!(requests.len(), 16);
        assert_eq!(requests.customer_count(), 15);
        assert_eq!(requests.actions.last(), Some(&Action::Idle));
        assert_eq!(requests.indices.last(), Some(&ActionSpace::IDLE_INDEX));

        let trips = &requests.indices[..15];
        let mut unique = trips.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 15);
        assert!(trips.iter().all(|&i| (1..=20).contains(&i)));
        for (i, action) in requests.indices.iter().zip(&requests.actions) {
            assert_eq!(space.get(*i), Some(*action));
        }
    }

    #[test]
    fn zero_requests_leaves_only_idle() {
        let space = ActionSpace::new(&SimConfig::default());
        let mut rng = StdRng::seed_from_u64(0);
        let requests = choose_requests(&space, 0, &mut rng).unwrap();
        assert!(!requests.is_empty());
        assert_eq!(requests.customer_count(), 0);
        assert_eq!(requests.actions, vec![Action::Idle]);
    }

    #[test]
    fn oversized_sample_fails() {
        let config = SimConfig {
            locations: 2,
            request_means: vec![12.0, 12.0],
            ..SimConfig::default()
        };
        let space = ActionSpace::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            choose_requests(&space, 3, &mut rng),
            Err(SimError::InvalidSampleSize {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn unknown_location_fails() {
        let sampler = RequestSampler::new(&SimConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sampler.raw_request_count(5, &mut rng),
            Err(SimError::InvalidLocation { location: 5, locations: 5 })
        ));
    }
}

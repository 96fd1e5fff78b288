use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::clock;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::requests::{RequestSampler, Requests};
use crate::space::{ActionSpace, StateSpace};
use crate::travel_time::TravelTimes;
use crate::types::{Action, Hours, State};

/// Outcome of applying one action. At most one of `hold_time` and
/// `transit_time + ride_time` is non-zero. The total is widened to `u64` so
/// table entries up to `u32::MAX` cannot overflow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next_state: State,
    pub ride_time: Hours,
    pub transit_time: Hours,
    pub hold_time: Hours,
}

impl Transition {
    pub fn total_time(&self) -> u64 {
        u64::from(self.ride_time) + u64::from(self.transit_time) + u64::from(self.hold_time)
    }
}

/// A transition together with the reward it earned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub transition: Transition,
    pub reward: f64,
}

pub struct TripSimulator {
    config: SimConfig,
    action_space: ActionSpace,
    state_space: StateSpace,
    sampler: RequestSampler,
    initial_state: State,
}

impl TripSimulator {
    pub fn new<R: Rng + ?Sized>(config: SimConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let action_space = ActionSpace::new(&config);
        let state_space = StateSpace::new(&config);
        let sampler = RequestSampler::new(&config)?;
        let initial_state = random_state(&state_space, rng)?;
        debug!(?initial_state, actions = action_space.len(), states = state_space.len(), "simulator ready");
        Ok(Self {
            config,
            action_space,
            state_space,
            sampler,
            initial_state,
        })
    }

    /// Draws a fresh initial state. The spaces are left untouched.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(&ActionSpace, &StateSpace, State)> {
        self.initial_state = random_state(&self.state_space, rng)?;
        Ok((&self.action_space, &self.state_space, self.initial_state))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    /// Builds a state checked against this simulator's configuration.
    pub fn state(&self, location: usize, hour: usize, day: usize) -> Result<State> {
        State::new(location, hour, day, &self.config)
    }

    /// Builds an action checked against this simulator's configuration.
    pub fn action(&self, pickup: usize, drop: usize) -> Result<Action> {
        Action::from_pair(pickup, drop, &self.config)
    }

    pub fn requests<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Result<Requests> {
        state.check(&self.config)?;
        self.sampler.sample(state, &self.action_space, rng)
    }

    pub fn next_state<T: TravelTimes + ?Sized>(&self, state: &State, action: &Action, times: &T) -> Result<Transition> {
        state.check(&self.config)?;
        action.check(&self.config)?;

        let (location, hour, day) = state.as_tuple();
        let transition = match *action {
            Action::Idle => {
                let (hour, day) = self.advance(hour, day, 1);
                Transition {
                    next_state: State::new_unchecked(location, hour, day),
                    ride_time: 0,
                    transit_time: 0,
                    hold_time: 1,
                }
            }
            Action::Trip { pickup, drop } if pickup == location => {
                let ride_time = times.lookup(location, drop, hour, day)?;
                let (hour, day) = self.advance(hour, day, ride_time);
                Transition {
                    next_state: State::new_unchecked(drop, hour, day),
                    ride_time,
                    transit_time: 0,
                    hold_time: 0,
                }
            }
            Action::Trip { pickup, drop } => {
                let transit_time = times.lookup(location, pickup, hour, day)?;
                let (pickup_hour, pickup_day) = self.advance(hour, day, transit_time);
                let ride_time = times.lookup(pickup, drop, pickup_hour, pickup_day)?;
                let (hour, day) = self.advance(pickup_hour, pickup_day, ride_time);
                Transition {
                    next_state: State::new_unchecked(drop, hour, day),
                    ride_time,
                    transit_time,
                    hold_time: 0,
                }
            }
        };

        debug!(
            ?state,
            ?action,
            next = ?transition.next_state,
            ride = transition.ride_time,
            transit = transition.transit_time,
            hold = transition.hold_time,
            "transition"
        );
        Ok(transition)
    }

    /// Revenue for carrying a passenger minus running cost over all elapsed time.
    pub fn reward_for(&self, transition: &Transition) -> f64 {
        let revenue = self.config.revenue_rate * f64::from(transition.ride_time);
        let cost = self.config.cost_rate * transition.total_time() as f64;
        revenue - cost
    }

    /// returns `(reward, next_state, total_time)`
    pub fn reward<T: TravelTimes + ?Sized>(&self, state: &State, action: &Action, times: &T) -> Result<(f64, State, u64)> {
        let step = self.step(state, action, times)?;
        Ok((step.reward, step.transition.next_state, step.transition.total_time()))
    }

    pub fn step<T: TravelTimes + ?Sized>(&self, state: &State, action: &Action, times: &T) -> Result<Step> {
        let transition = self.next_state(state, action, times)?;
        Ok(Step {
            reward: self.reward_for(&transition),
            transition,
        })
    }

    fn advance(&self, hour: usize, day: usize, duration: Hours) -> (usize, usize) {
        clock::advance(hour, day, duration, self.config.hours, self.config.days)
    }
}

fn random_state<R: Rng + ?Sized>(states: &StateSpace, rng: &mut R) -> Result<State> {
    states
        .as_slice()
        .choose(rng)
        .copied()
        .ok_or_else(|| SimError::InvalidConfiguration("state space is empty".to_string()))
}

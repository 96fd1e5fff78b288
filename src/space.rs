use fxhash::FxHashMap;

use crate::config::SimConfig;
use crate::types::{Action, State};

/// Every action the driver can take. Index 0 is [`Action::Idle`]; indices
/// `1..=trip_count` hold the trips in `(pickup, drop)` row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace {
    actions: Vec<Action>,
    index: FxHashMap<Action, usize>,
}

impl ActionSpace {
    pub const IDLE_INDEX: usize = 0;

    pub fn new(config: &SimConfig) -> Self {
        let m = config.locations;
        let actions: Vec<Action> = std::iter::once(Action::Idle)
            .chain((0..m).flat_map(|pickup| {
                (0..m)
                    .filter(move |&drop| drop != pickup)
                    .map(move |drop| Action::Trip { pickup, drop })
            }))
            .collect();
        let index = actions.iter().enumerate().map(|(i, &a)| (a, i)).collect();
        Self { actions, index }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of trip actions, i.e. everything but `Idle`.
    pub fn trip_count(&self) -> usize {
        self.actions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Action> {
        self.actions.get(index).copied()
    }

    pub fn index_of(&self, action: &Action) -> Option<usize> {
        self.index.get(action).copied()
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.index.contains_key(action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

/// Location x hour x day, enumerated location-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSpace {
    states: Vec<State>,
    hours: usize,
    days: usize,
}

impl StateSpace {
    pub fn new(config: &SimConfig) -> Self {
        let states = (0..config.locations)
            .flat_map(|location| {
                (0..config.hours).flat_map(move |hour| {
                    (0..config.days).map(move |day| State::new_unchecked(location, hour, day))
                })
            })
            .collect();
        Self {
            states,
            hours: config.hours,
            days: config.days,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<State> {
        self.states.get(index).copied()
    }

    pub fn index_of(&self, state: &State) -> Option<usize> {
        let index = (state.location() * self.hours + state.hour()) * self.days + state.day();
        (self.states.get(index) == Some(state)).then_some(index)
    }

    pub fn contains(&self, state: &State) -> bool {
        self.index_of(state).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[State] {
        &self.states
    }
}

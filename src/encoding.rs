//! One-hot encodings of states and state-action pairs for a learning model.

use crate::config::SimConfig;
use crate::error::Result;
use crate::types::{Action, State};

/// Length of [`encode_state`] output: `m + t + d`.
pub fn state_len(config: &SimConfig) -> usize {
    config.locations + config.hours + config.days
}

/// Length of [`encode_state_action`] output: `m + t + d + m + m`.
pub fn state_action_len(config: &SimConfig) -> usize {
    state_len(config) + 2 * config.locations
}

/// One-hot location, hour and day segments. Fails if `state` does not fit
/// `config`.
pub fn encode_state(state: &State, config: &SimConfig) -> Result<Vec<f32>> {
    state.check(config)?;
    let mut encoded = vec![0.0; state_len(config)];
    write_state(&mut encoded, state, config);
    Ok(encoded)
}

/// State segments followed by one-hot pickup and drop segments. A component
/// equal to 0 leaves its segment empty, so `Idle` adds no bits.
pub fn encode_state_action(state: &State, action: &Action, config: &SimConfig) -> Result<Vec<f32>> {
    state.check(config)?;
    action.check(config)?;
    let mut encoded = vec![0.0; state_action_len(config)];
    write_state(&mut encoded, state, config);

    let pickup_offset = state_len(config);
    let drop_offset = pickup_offset + config.locations;
    let (pickup, drop) = action.as_pair();
    if pickup != 0 {
        encoded[pickup_offset + pickup] = 1.0;
    }
    if drop != 0 {
        encoded[drop_offset + drop] = 1.0;
    }
    Ok(encoded)
}

fn write_state(encoded: &mut [f32], state: &State, config: &SimConfig) {
    encoded[state.location()] = 1.0;
    encoded[config.locations + state.hour()] = 1.0;
    encoded[config.locations + config.hours + state.day()] = 1.0;
}

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimConfig;
use crate::encoding;
use crate::env::TripSimulator;
use crate::error::SimError;
use crate::travel_time::TravelTimeMatrix;
use crate::types::{Action, Hours, State};

type StateTuple = (usize, usize, usize);
type ActionTuple = (usize, usize);

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pyclass(name = "TripSimulator")]
pub struct PyTripSimulator {
    sim: TripSimulator,
    times: TravelTimeMatrix,
    rng: StdRng,
}

impl PyTripSimulator {
    fn state(&self, state: StateTuple) -> PyResult<State> {
        Ok(self.sim.state(state.0, state.1, state.2)?)
    }

    fn action(&self, action: ActionTuple) -> PyResult<Action> {
        Ok(self.sim.action(action.0, action.1)?)
    }
}

#[pymethods]
impl PyTripSimulator {
    #[new]
    #[pyo3(signature = (time_matrix, seed = None, config_json = None))]
    fn new(time_matrix: Vec<Vec<Vec<Vec<Hours>>>>, seed: Option<u64>, config_json: Option<String>) -> PyResult<Self> {
        let config = match config_json.as_deref() {
            Some(json) => SimConfig::from_json_str(json)?,
            None => SimConfig::default(),
        };
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let times = TravelTimeMatrix::from_nested(&config, &time_matrix)?;
        let sim = TripSimulator::new(config, &mut rng)?;
        Ok(Self { sim, times, rng })
    }

    #[getter]
    fn action_space(&self) -> Vec<ActionTuple> {
        self.sim.action_space().iter().map(Action::as_pair).collect()
    }

    #[getter]
    fn state_space(&self) -> Vec<StateTuple> {
        self.sim.state_space().iter().map(State::as_tuple).collect()
    }

    #[getter]
    fn initial_state(&self) -> StateTuple {
        self.sim.initial_state().as_tuple()
    }

    fn reset(&mut self) -> PyResult<(Vec<ActionTuple>, Vec<StateTuple>, StateTuple)> {
        let (_, _, initial) = self.sim.reset(&mut self.rng)?;
        Ok((self.action_space(), self.state_space(), initial.as_tuple()))
    }

    /// returns `(indices, actions)`
    fn requests(&mut self, state: StateTuple) -> PyResult<(Vec<usize>, Vec<ActionTuple>)> {
        let state = self.state(state)?;
        let requests = self.sim.requests(&state, &mut self.rng)?;
        let actions = requests.actions.iter().map(Action::as_pair).collect();
        Ok((requests.indices, actions))
    }

    /// returns `(next_state, ride_time, transit_time, hold_time)`
    fn next_state(&self, state: StateTuple, action: ActionTuple) -> PyResult<(StateTuple, Hours, Hours, Hours)> {
        let t = self.sim.next_state(&self.state(state)?, &self.action(action)?, &self.times)?;
        Ok((t.next_state.as_tuple(), t.ride_time, t.transit_time, t.hold_time))
    }

    /// returns `(reward, next_state, total_time)`
    fn reward(&self, state: StateTuple, action: ActionTuple) -> PyResult<(f64, StateTuple, u64)> {
        let (reward, next, total) = self.sim.reward(&self.state(state)?, &self.action(action)?, &self.times)?;
        Ok((reward, next.as_tuple(), total))
    }

    fn encode_state(&self, state: StateTuple) -> PyResult<Vec<f32>> {
        Ok(encoding::encode_state(&self.state(state)?, self.sim.config())?)
    }

    fn encode_state_action(&self, state: StateTuple, action: ActionTuple) -> PyResult<Vec<f32>> {
        Ok(encoding::encode_state_action(
            &self.state(state)?,
            &self.action(action)?,
            self.sim.config(),
        )?)
    }
}

//! Trip simulator for a cab-driver MDP: a driver at `(location, hour, day)`
//! accepts a ride request or idles, and the environment returns the next
//! state, the time spent and the money earned.

pub mod clock;
pub mod config;
pub mod encoding;
pub mod env;
pub mod error;
pub mod requests;
pub mod space;
pub mod travel_time;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use config::SimConfig;
pub use env::{Step, Transition, TripSimulator};
pub use error::{Result, SimError};
pub use requests::{RequestSampler, Requests};
pub use space::{ActionSpace, StateSpace};
pub use travel_time::{SparseTravelTimes, TravelTimeMatrix, TravelTimes};
pub use types::{Action, Hours, Location, State};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn trip_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyTripSimulator>()
}

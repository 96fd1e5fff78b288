use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid location {location}: expected a value in [0, {locations})")]
    InvalidLocation { location: usize, locations: usize },

    #[error("Invalid time: hour {hour}, day {day}")]
    InvalidTime { hour: usize, day: usize },

    #[error("Invalid action ({pickup}, {drop}): pickup and drop must differ")]
    InvalidAction { pickup: usize, drop: usize },

    #[error("Cannot sample {requested} distinct requests from {available} actions")]
    InvalidSampleSize { requested: usize, available: usize },

    #[error("No travel time from {origin} to {destination} at hour {hour}, day {day}")]
    MissingTravelTimeEntry {
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
    },

    #[error("Travel time table shape mismatch: {0}")]
    TableShape(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Immutable parameters of the trip MDP.
///
/// `request_means[i]` is the Poisson mean of ride requests seen at location `i`,
/// so its length must equal `locations`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub locations: usize,
    pub hours: usize,
    pub days: usize,
    /// Fuel and other costs per elapsed hour.
    pub cost_rate: f64,
    /// Revenue per hour spent carrying a passenger.
    pub revenue_rate: f64,
    pub request_means: Vec<f64>,
    pub max_requests: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            locations: 5,
            hours: 24,
            days: 7,
            cost_rate: 5.0,
            revenue_rate: 9.0,
            request_means: vec![2.0, 12.0, 4.0, 7.0, 8.0],
            max_requests: 15,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.locations < 2 {
            return Err(invalid(format!(
                "at least 2 locations are needed to form a trip, got {}",
                self.locations
            )));
        }
        if self.hours == 0 || self.days == 0 {
            return Err(invalid(format!(
                "hours and days must be positive, got {} hours and {} days",
                self.hours, self.days
            )));
        }
        for (name, rate) in [("cost_rate", self.cost_rate), ("revenue_rate", self.revenue_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {rate}")));
            }
        }
        if self.request_means.len() != self.locations {
            return Err(invalid(format!(
                "expected {} request means, one per location, got {}",
                self.locations,
                self.request_means.len()
            )));
        }
        if let Some((location, mean)) = self
            .request_means
            .iter()
            .enumerate()
            .find(|(_, mean)| !mean.is_finite() || **mean <= 0.0)
        {
            return Err(invalid(format!(
                "request mean for location {location} must be positive, got {mean}"
            )));
        }
        if self.max_requests == 0 {
            return Err(invalid("max_requests must be positive".to_string()));
        }
        Ok(())
    }

    /// Number of real trip actions, excluding the idle action.
    pub fn trip_count(&self) -> usize {
        self.locations * (self.locations - 1)
    }

    pub fn check_location(&self, location: usize) -> Result<()> {
        if location < self.locations {
            Ok(())
        } else {
            Err(SimError::InvalidLocation {
                location,
                locations: self.locations,
            })
        }
    }
}

fn invalid(msg: String) -> SimError {
    SimError::InvalidConfiguration(msg)
}

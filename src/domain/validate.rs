use serde::Serialize;

use crate::domain::error::InvalidConfigurationError;
use crate::domain::parameters::RunConfiguration;

/// Bounds for the solver time limit input, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverTimeLimits {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub fn validate_configuration(
    configuration: &RunConfiguration,
) -> Result<(), InvalidConfigurationError> {
    if configuration.num_vehicles == 0 {
        return Err(InvalidConfigurationError {
            details: "Number of vehicles must be positive".into(),
        });
    }

    if configuration.num_clients == 0 {
        return Err(InvalidConfigurationError {
            details: "Number of locations must be positive".into(),
        });
    }

    if !configuration.time_limit.is_finite() || configuration.time_limit <= 0.0 {
        return Err(InvalidConfigurationError {
            details: format!(
                "Solver time limit must be a positive number of seconds, got {}",
                configuration.time_limit
            ),
        });
    }

    Ok(())
}

pub fn validate_time_limit(
    time_limit: f64,
    limits: &SolverTimeLimits,
) -> Result<(), InvalidConfigurationError> {
    if !(limits.min..=limits.max).contains(&time_limit) {
        return Err(InvalidConfigurationError {
            details: format!(
                "Solver time limit {} is outside the allowed range {}..={}",
                time_limit, limits.min, limits.max
            ),
        });
    }

    Ok(())
}

use log::info;

use crate::domain::error::SolverExecutionError;
use crate::domain::parameters::ProblemParameters;
use crate::domain::sampler::{CancelToken, Sampler, Solution};

/// Classical backend
pub struct ClassicalSampler;

impl ClassicalSampler {
    pub fn new() -> Self {
        ClassicalSampler
    }
}

impl Sampler for ClassicalSampler {
    fn sample(
        &self,
        parameters: &ProblemParameters,
        cancel: &CancelToken,
    ) -> Result<Solution, SolverExecutionError> {
        if cancel.is_cancelled() {
            return Ok(Solution::default());
        }

        // TODO: plug in a clustering + TSP heuristic once the routing model lands
        info!(
            "{} sampler has no routing model yet (time limit {}s)",
            self.name(),
            parameters.time_limit
        );

        Ok(Solution::default())
    }

    fn name(&self) -> &str {
        "Classical"
    }
}

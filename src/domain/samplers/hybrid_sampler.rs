use log::info;

use crate::domain::error::SolverExecutionError;
use crate::domain::parameters::ProblemParameters;
use crate::domain::sampler::{CancelToken, Sampler, Solution};

/// Quantum hybrid backend.
///
/// Routing is not implemented yet; the sampler returns an empty solution.
pub struct HybridSampler;

impl HybridSampler {
    pub fn new() -> Self {
        HybridSampler
    }
}

impl Sampler for HybridSampler {
    fn sample(
        &self,
        parameters: &ProblemParameters,
        cancel: &CancelToken,
    ) -> Result<Solution, SolverExecutionError> {
        if cancel.is_cancelled() {
            return Ok(Solution::default());
        }

        info!(
            "{} sampler has no routing model yet (time limit {}s)",
            self.name(),
            parameters.time_limit
        );

        Ok(Solution::default())
    }

    fn name(&self) -> &str {
        "Quantum Hybrid"
    }
}

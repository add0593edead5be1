use log::debug;
use std::time::Instant;

use crate::domain::error::SolverExecutionError;
use crate::domain::parameters::{ProblemParameters, SamplerType};
use crate::domain::sampler::{CancelToken, Sampler, Solution};

/// Runs the routing problem for one set of parameters and keeps the solution.
///
/// A solver is built per run and dropped once its results are read.
pub struct Solver {
    parameters: ProblemParameters,
    sampler: Box<dyn Sampler>,
    cancel: CancelToken,
    solution: Option<Solution>,
}

impl Solver {
    /// Solver backed by the given sampler, see
    /// [`create_sampler`](crate::domain::sampler_factory::create_sampler) for the defaults.
    pub fn with_sampler(parameters: ProblemParameters, sampler: Box<dyn Sampler>) -> Self {
        Solver {
            parameters,
            sampler,
            cancel: CancelToken::new(),
            solution: None,
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn parameters(&self) -> &ProblemParameters {
        &self.parameters
    }

    pub fn sampler_type(&self) -> SamplerType {
        self.parameters.sampler_type
    }

    pub fn time_limit(&self) -> f64 {
        self.parameters.time_limit
    }

    /// Solution from the last call to [`Solver::generate`], if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Generate a solution and return the wall clock time in seconds.
    ///
    /// Calling this again discards the previous solution and solves from scratch.
    pub fn generate(&mut self) -> Result<f64, SolverExecutionError> {
        self.solution = None;
        let start = Instant::now();

        let solution = self.sampler.sample(&self.parameters, &self.cancel)?;

        let wall_clock_time = start.elapsed().as_secs_f64();
        debug!(
            "{} sampler finished in {:.6}s",
            self.sampler.name(),
            wall_clock_time
        );
        self.solution = Some(solution);

        Ok(wall_clock_time)
    }
}

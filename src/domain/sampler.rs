use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::error::SolverExecutionError;
use crate::domain::parameters::ProblemParameters;

/// Cost breakdown keyed by cost name (e.g. "distance")
pub type CostBreakdown = BTreeMap<String, f64>;

/// Routes found by a sampler, reduced to what the dashboard reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Solution {
    /// Per-vehicle cost breakdowns, keyed by vehicle id
    pub vehicle_costs: BTreeMap<String, CostBreakdown>,
}

impl Solution {
    pub fn is_empty(&self) -> bool {
        self.vehicle_costs.values().all(|costs| costs.is_empty())
    }

    /// Sum every cost key across all vehicles.
    pub fn total_cost(&self) -> CostBreakdown {
        let mut total = CostBreakdown::new();
        for costs in self.vehicle_costs.values() {
            for (key, value) in costs {
                *total.entry(key.clone()).or_insert(0.0) += value;
            }
        }
        total
    }
}

/// Shared flag the host flips to abandon a run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Common interface for routing backends
pub trait Sampler: Send + Sync {
    /// Search for routes within `parameters.time_limit` seconds.
    ///
    /// Backends should poll `cancel` and return early once it is set; whatever
    /// they return after cancellation is discarded.
    fn sample(
        &self,
        parameters: &ProblemParameters,
        cancel: &CancelToken,
    ) -> Result<Solution, SolverExecutionError>;

    /// Get the sampler name for logging/debugging
    fn name(&self) -> &str;
}

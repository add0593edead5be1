use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::fingerprint::Fingerprint;
use crate::domain::parameters::{RunConfiguration, SamplerType, VehicleType};
use crate::domain::validate::SolverTimeLimits;

// ---------- API (wire) types: owned & serde-friendly ----------

/// Total solution cost per solver family ("classical" / "quantum")
pub type CostComparison = BTreeMap<String, f64>;

#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// Id of the control that fired the request
    #[serde(default)]
    pub trigger: String,
    /// Total number of times the run button has been clicked; `null` before the first click
    #[serde(default)]
    pub run_clicks: Option<u32>,
    pub sampler_type: SamplerType,
    pub vehicle_type: VehicleType,
    pub num_vehicles: u32,
    pub num_clients: u32,
    pub time_limit: f64,
    #[serde(default)]
    pub previous_fingerprint: Option<Fingerprint>,
    #[serde(default)]
    pub cost_comparison: CostComparison,
}

impl RunRequest {
    pub fn clicks(&self) -> u32 {
        self.run_clicks.unwrap_or(0)
    }

    pub fn configuration(&self) -> RunConfiguration {
        RunConfiguration {
            sampler_type: self.sampler_type,
            vehicle_type: self.vehicle_type,
            num_vehicles: self.num_vehicles,
            num_clients: self.num_clients,
            time_limit: self.time_limit,
        }
    }
}

/// New text for a wall clock cell; `NoUpdate` (serialized as `null`) keeps
/// whatever the dashboard currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WallClockDisplay {
    Set(String),
    NoUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResultBundle {
    /// "classical" or "quantum"
    pub sampler_type: String,
    pub reset_results: bool,
    pub parameter_hash: Fingerprint,
    pub cost_comparison: CostComparison,
    /// Percent by which the quantum cost beats the classical one
    pub performance_improvement_quantum: Option<f64>,
    pub problem_size: u64,
    pub search_space: String,
    pub wall_clock_time_classical: WallClockDisplay,
    pub wall_clock_time_quantum: WallClockDisplay,
    pub num_locations: u32,
    pub vehicles_deployed: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunResponse {
    Completed { result: RunResultBundle },
    NoUpdate,
    Cancelled,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollapseRequest {
    #[serde(default)]
    pub class_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollapseResponse {
    pub class_name: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub label: &'static str,
    pub value: u64,
}

/// Static settings the dashboard needs to build its controls
#[derive(Debug, Serialize)]
pub struct DashboardSettings {
    pub app_title: String,
    pub solver_time: SolverTimeLimits,
    pub sampler_options: Vec<OptionEntry>,
    pub vehicle_options: Vec<OptionEntry>,
    pub run_in_progress: bool,
}

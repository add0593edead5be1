//! Run lifecycle: decide whether a request is a real run, solve, and work out
//! which of the displayed results survive.

use log::{debug, info};

use crate::domain::error::{InvalidTrigger, RunError};
use crate::domain::fingerprint::fingerprint;
use crate::domain::parameters::SamplerType;
use crate::domain::sampler::{CancelToken, Sampler, Solution};
use crate::domain::sampler_factory::create_sampler;
use crate::domain::solver::Solver;
use crate::domain::validate::validate_configuration;
use crate::models::{CostComparison, RunRequest, RunResultBundle, WallClockDisplay};

/// Id of the control that starts a run
pub const RUN_TRIGGER: &str = "run-button";

const SEARCH_SPACE_PRECISION: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The request was not a run; the dashboard keeps everything as is.
    NoUpdate,
    Completed(RunResultBundle),
}

pub fn validate_trigger(trigger: &str, run_clicks: u32) -> Result<(), InvalidTrigger> {
    if trigger != RUN_TRIGGER {
        return Err(InvalidTrigger::NotRunAction(trigger.to_string()));
    }
    if run_clicks == 0 {
        return Err(InvalidTrigger::NoClicks);
    }
    Ok(())
}

/// Run the optimization with the default sampler for the selected family.
pub fn run_optimization(request: &RunRequest, cancel: &CancelToken) -> Result<RunOutcome, RunError> {
    run_optimization_with(request, cancel, create_sampler)
}

/// Run the optimization with a caller supplied sampler factory.
///
/// Nothing is constructed when the request is not a genuine run. Any error
/// aborts the run without producing a bundle.
pub fn run_optimization_with<F>(
    request: &RunRequest,
    cancel: &CancelToken,
    make_sampler: F,
) -> Result<RunOutcome, RunError>
where
    F: FnOnce(SamplerType) -> Box<dyn Sampler>,
{
    if let Err(reason) = validate_trigger(&request.trigger, request.clicks()) {
        debug!("Ignoring run request: {}", reason);
        return Ok(RunOutcome::NoUpdate);
    }

    let configuration = request.configuration();
    validate_configuration(&configuration)?;

    let parameters = configuration.problem_parameters();
    let mut solver = Solver::with_sampler(parameters, make_sampler(parameters.sampler_type))
        .with_cancel_token(cancel.clone());
    let sampler_type = solver.sampler_type();
    info!(
        "Starting {} run: {} vehicles, {} locations, {}s limit",
        sampler_type,
        configuration.num_vehicles,
        configuration.num_clients,
        solver.time_limit()
    );

    if cancel.is_cancelled() {
        return Err(RunError::Cancelled);
    }
    let wall_clock_time = solver.generate()?;
    if cancel.is_cancelled() {
        info!("{} run cancelled after {:.3}s", sampler_type, wall_clock_time);
        return Err(RunError::Cancelled);
    }

    let problem_size = u64::from(configuration.num_vehicles) * u64::from(configuration.num_clients);
    let search_space = format_search_space(configuration.num_vehicles, configuration.num_clients);

    let parameter_hash = fingerprint(&configuration.fingerprint_values())?;
    let reset_results = request.previous_fingerprint.as_ref() != Some(&parameter_hash);
    debug!(
        "Parameter hash {} (previous {:?}), reset results: {}",
        parameter_hash, request.previous_fingerprint, reset_results
    );

    let cost_comparison = updated_cost_comparison(
        &request.cost_comparison,
        sampler_type,
        solver.solution(),
        reset_results,
    );
    let performance_improvement_quantum = performance_improvement(&cost_comparison);

    let (wall_clock_time_classical, wall_clock_time_quantum) =
        updated_wall_clock_times(wall_clock_time, sampler_type, reset_results);

    info!(
        "{} run finished in {:.3}s (limit {}s)",
        sampler_type,
        wall_clock_time,
        solver.parameters().time_limit
    );

    Ok(RunOutcome::Completed(RunResultBundle {
        sampler_type: sampler_type.result_key().to_string(),
        reset_results,
        parameter_hash,
        cost_comparison,
        performance_improvement_quantum,
        problem_size,
        search_space,
        wall_clock_time_classical,
        wall_clock_time_quantum,
        num_locations: configuration.num_clients,
        vehicles_deployed: configuration.num_vehicles,
    }))
}

/// Determine which wall clock times to update, as (classical, quantum).
pub fn updated_wall_clock_times(
    wall_clock_time: f64,
    sampler_type: SamplerType,
    reset_results: bool,
) -> (WallClockDisplay, WallClockDisplay) {
    let ran = WallClockDisplay::Set(format_wall_clock(wall_clock_time));
    let other = if reset_results {
        WallClockDisplay::Set(String::new())
    } else {
        WallClockDisplay::NoUpdate
    };

    match sampler_type {
        SamplerType::Classical => (ran, other),
        SamplerType::Hybrid => (other, ran),
    }
}

/// Start from an empty comparison on reset, then record this run's total cost.
pub fn updated_cost_comparison(
    previous: &CostComparison,
    sampler_type: SamplerType,
    solution: Option<&Solution>,
    reset_results: bool,
) -> CostComparison {
    let mut comparison = if reset_results {
        CostComparison::new()
    } else {
        previous.clone()
    };

    if let Some(solution) = solution.filter(|s| !s.is_empty()) {
        let total: f64 = solution.total_cost().values().sum();
        comparison.insert(sampler_type.result_key().to_string(), total);
    }

    comparison
}

/// Relative improvement of the quantum cost over the classical cost, in percent.
pub fn performance_improvement(comparison: &CostComparison) -> Option<f64> {
    let classical = *comparison.get(SamplerType::Classical.result_key())?;
    let quantum = *comparison.get(SamplerType::Hybrid.result_key())?;
    if classical == 0.0 {
        return None;
    }
    Some((classical - quantum) / classical * 100.0)
}

pub fn format_wall_clock(seconds: f64) -> String {
    format!("{:.3}s", seconds)
}

/// `vehicles^locations` in scientific notation, e.g. `8.10e+01`.
pub fn format_search_space(num_vehicles: u32, num_clients: u32) -> String {
    let exact = u128::from(num_vehicles).checked_pow(num_clients);
    match exact {
        Some(value) => format_scientific(value as f64, SEARCH_SPACE_PRECISION),
        None => format_huge_power(num_vehicles, num_clients, SEARCH_SPACE_PRECISION),
    }
}

/// Scientific notation with a signed, at least two digit exponent.
pub fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    if let Some((mantissa, exponent)) = formatted.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            return join_exponent(mantissa, exponent);
        }
    }
    formatted
}

// Powers past u128 are formatted from their base-10 logarithm.
fn format_huge_power(base: u32, exponent: u32, precision: usize) -> String {
    let log10 = f64::from(exponent) * f64::from(base).log10();
    let mut power = log10.floor();
    let mut mantissa = format!("{:.*}", precision, 10f64.powf(log10 - power));
    if mantissa.starts_with("10") {
        mantissa = format!("{:.*}", precision, 1.0);
        power += 1.0;
    }
    join_exponent(&mantissa, power as i32)
}

fn join_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

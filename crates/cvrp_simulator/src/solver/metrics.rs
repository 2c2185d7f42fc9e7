use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{problem::problem_instance::ProblemInstance, utils::round::round_to};

use super::solve_result::SolveResult;

/// Headline figures shown for the current solution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub distance: f64,
    pub vehicles_used: usize,
    pub capacity_violations: f64,
    pub runtime_ms: u64,
    pub feasible: bool,
}

/// Without a solution every figure is zero and the result counts as feasible.
pub fn compute_metrics(solution: Option<&SolveResult>) -> DashboardMetrics {
    match solution {
        Some(solution) => DashboardMetrics {
            distance: round_to(solution.distance, 2),
            vehicles_used: solution.vehicles_used,
            capacity_violations: solution.violations.capacity,
            runtime_ms: solution.runtime_ms,
            feasible: solution.feasible,
        },
        None => DashboardMetrics {
            feasible: true,
            ..DashboardMetrics::default()
        },
    }
}

/// Share of the instance demand that the routes serve, in percent.
pub fn served_demand_utilization(instance: &ProblemInstance, solution: &SolveResult) -> f64 {
    let total_demand = instance.total_demand();
    if total_demand <= 0.0 {
        return 0.0;
    }

    round_to((solution.served_demand() / total_demand * 100.0).min(100.0), 1)
}

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        fleet::Fleet,
        node::{Customer, Depot},
        problem_instance::ProblemInstance,
    },
    solver::{
        algorithm::AlgorithmId,
        run_config::SolverRunConfig,
        solve_result::{RoutePlan, SolveResult},
    },
    utils::round::round_to,
};

use super::tab_id::ResultTabId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAlgorithmInfo {
    pub id: AlgorithmId,
    pub name: String,
    pub code: String,
}

impl From<AlgorithmId> for RunAlgorithmInfo {
    fn from(id: AlgorithmId) -> Self {
        RunAlgorithmInfo {
            id,
            name: id.name().to_owned(),
            code: id.code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResultSummary {
    pub distance: f64,
    pub vehicles_used: usize,
    pub runtime_ms: u64,
    pub feasible: bool,
    pub capacity_violations: f64,
    pub total_demand: f64,
    pub fleet_capacity: u64,
    /// Total demand over fleet capacity, in percent with one decimal.
    pub utilization: f64,
}

impl RunResultSummary {
    pub fn new(instance: &ProblemInstance, fleet: &Fleet, solution: &SolveResult) -> Self {
        let total_demand = instance.total_demand();
        let fleet_capacity = fleet.total_capacity();
        let utilization = if fleet_capacity == 0 {
            0.0
        } else {
            round_to(total_demand / fleet_capacity as f64 * 100.0, 1)
        };

        RunResultSummary {
            distance: solution.distance,
            vehicles_used: solution.vehicles_used,
            runtime_ms: solution.runtime_ms,
            feasible: solution.feasible,
            capacity_violations: solution.violations.capacity,
            total_demand,
            fleet_capacity,
            utilization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    pub depot: Depot,
    pub routes: Vec<RoutePlan>,
}

/// The request exactly as it was solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRequest {
    pub config: SolverRunConfig,
    pub instance: ProblemInstance,
}

/// Everything a result tab shows, before the store gives it an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTabPayload {
    pub algorithm: RunAlgorithmInfo,
    pub summary: RunResultSummary,
    pub vehicles: Fleet,
    pub customers: Vec<Customer>,
    pub geometry: RouteGeometry,
    pub raw_request: RawRequest,
    pub raw_response: SolveResult,
}

impl ResultTabPayload {
    pub fn new(config: SolverRunConfig, instance: ProblemInstance, solution: SolveResult) -> Self {
        ResultTabPayload {
            algorithm: RunAlgorithmInfo::from(config.algorithm),
            summary: RunResultSummary::new(&instance, &config.vehicles, &solution),
            vehicles: config.vehicles.clone(),
            customers: instance.customers.clone(),
            geometry: RouteGeometry {
                depot: instance.depot,
                routes: solution.routes.clone(),
            },
            raw_request: RawRequest { config, instance },
            raw_response: solution,
        }
    }
}

/// A registered run. Records never change once the store created them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTabRecord {
    pub id: ResultTabId,
    pub title: String,
    pub run_number: u64,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub payload: ResultTabPayload,
}

impl ResultTabRecord {
    pub fn new(payload: ResultTabPayload, run_number: u64, created_at: Timestamp) -> Self {
        let title = format!(
            "Result #{run_number} — {} · {} km",
            payload.algorithm.code,
            payload.summary.distance.round()
        );

        ResultTabRecord {
            id: ResultTabId::new(created_at, run_number),
            title,
            run_number,
            created_at,
            payload,
        }
    }
}

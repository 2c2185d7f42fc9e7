use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::node::DEPOT_ID;

/// One vehicle's tour. `nodes` starts and ends at the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutePlan {
    pub vehicle: u32,
    pub nodes: Vec<u32>,
    pub load: f64,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RoutePlan {
    pub fn empty(vehicle: u32, color: Option<String>) -> Self {
        RoutePlan {
            vehicle,
            nodes: vec![DEPOT_ID, DEPOT_ID],
            load: 0.0,
            distance: 0.0,
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }

    pub fn customer_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes.iter().copied().filter(|&id| id != DEPOT_ID)
    }

    /// Inserts before the closing depot.
    pub fn push_customer(&mut self, customer_id: u32) {
        let closing_depot = self.nodes.len() - 1;
        self.nodes.insert(closing_depot, customer_id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Violations {
    pub capacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvergencePoint {
    pub iteration: u32,
    pub best_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuntimeSlice {
    pub label: String,
    pub ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub distance: f64,
    pub runtime_ms: u64,
    pub feasible: bool,
    pub vehicles_used: usize,
    pub routes: Vec<RoutePlan>,
    pub violations: Violations,
    pub log: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convergence: Option<Vec<ConvergencePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_breakdown: Option<Vec<RuntimeSlice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
}

impl SolveResult {
    pub fn served_demand(&self) -> f64 {
        self.routes.iter().map(|route| route.load).sum()
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::fleet::Fleet;

use super::algorithm::{AlgorithmId, AlgorithmParameters, resolve_parameters};

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolverRunConfig {
    pub dataset_id: String,
    pub vehicles: Fleet,
    pub algorithm: AlgorithmId,
    pub parameters: AlgorithmParameters,
    pub seed: String,
}

impl Default for SolverRunConfig {
    fn default() -> Self {
        let algorithm = AlgorithmId::Tabu;

        Self {
            dataset_id: String::from("city-grid"),
            vehicles: Fleet::uniform(4, 60),
            algorithm,
            parameters: resolve_parameters(algorithm, &AlgorithmParameters::new()),
            seed: String::from("12345"),
        }
    }
}

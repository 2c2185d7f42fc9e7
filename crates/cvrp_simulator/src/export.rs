use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    problem::problem_instance::ProblemInstance,
    solver::{run_config::SolverRunConfig, solve_result::SolveResult},
    store::result_tab::ResultTabRecord,
};

/// Self-contained description of one run, enough to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportDocument {
    pub config: SolverRunConfig,
    pub instance: ProblemInstance,
    pub solution: SolveResult,
}

impl ExportDocument {
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&ResultTabRecord> for ExportDocument {
    fn from(record: &ResultTabRecord) -> Self {
        ExportDocument {
            config: record.payload.raw_request.config.clone(),
            instance: record.payload.raw_request.instance.clone(),
            solution: record.payload.raw_response.clone(),
        }
    }
}

pub fn generate_json_schema() -> Result<String> {
    Ok(serde_json::to_string_pretty(&schema_for!(ExportDocument))?)
}

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// Tunable values keyed by parameter key. They are echoed into run logs and
/// reports; the simulated construction does not read them.
pub type AlgorithmParameters = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Tabu,
    Ga,
    Sa,
    Aco,
    Rl,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 5] = [
        AlgorithmId::Tabu,
        AlgorithmId::Ga,
        AlgorithmId::Sa,
        AlgorithmId::Aco,
        AlgorithmId::Rl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Tabu => "tabu",
            AlgorithmId::Ga => "ga",
            AlgorithmId::Sa => "sa",
            AlgorithmId::Aco => "aco",
            AlgorithmId::Rl => "rl",
        }
    }

    /// Short label used in result titles.
    pub fn code(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn summary(&self) -> &'static AlgorithmSummary {
        &ALGORITHMS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.summary().name
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = SimulatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or_else(|| SimulatorError::UnknownAlgorithm(value.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmParameterDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: [AlgorithmParameterDefinition; 2],
}

const fn parameter(
    key: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default_value: f64,
) -> AlgorithmParameterDefinition {
    AlgorithmParameterDefinition {
        key,
        label,
        min,
        max,
        step,
        default_value,
    }
}

// Indexed by `AlgorithmId as usize`.
static ALGORITHMS: [AlgorithmSummary; 5] = [
    AlgorithmSummary {
        id: AlgorithmId::Tabu,
        name: "Tabu Search",
        description: "Adaptive tabu with aspiration criteria.",
        parameters: [
            parameter("iterations", "Iterations", 50.0, 500.0, 10.0, 200.0),
            parameter("tabuTenure", "Tabu Tenure", 5.0, 40.0, 1.0, 15.0),
        ],
    },
    AlgorithmSummary {
        id: AlgorithmId::Ga,
        name: "Genetic Algorithm",
        description: "Elitist GA with partially mapped crossover.",
        parameters: [
            parameter("population", "Population", 10.0, 200.0, 5.0, 60.0),
            parameter("mutation", "Mutation %", 1.0, 40.0, 1.0, 8.0),
        ],
    },
    AlgorithmSummary {
        id: AlgorithmId::Sa,
        name: "Simulated Annealing",
        description: "Geometric cooling schedule with reheats.",
        parameters: [
            parameter("startTemp", "Start Temp", 10.0, 200.0, 5.0, 100.0),
            parameter("cooling", "Cooling Rate", 0.80, 0.99, 0.01, 0.92),
        ],
    },
    AlgorithmSummary {
        id: AlgorithmId::Aco,
        name: "Ant Colony",
        description: "Max-Min Ant System with pheromone evaporation.",
        parameters: [
            parameter("ants", "Ants", 5.0, 80.0, 1.0, 20.0),
            parameter("evaporation", "Evaporation", 0.1, 0.9, 0.05, 0.45),
        ],
    },
    AlgorithmSummary {
        id: AlgorithmId::Rl,
        name: "Reinforcement Learning",
        description: "Policy gradient with experience replay.",
        parameters: [
            parameter("episodes", "Episodes", 50.0, 500.0, 10.0, 120.0),
            parameter("gamma", "Gamma", 0.5, 0.99, 0.01, 0.9),
        ],
    },
];

pub fn algorithms() -> &'static [AlgorithmSummary] {
    &ALGORITHMS
}

/// Parameter definitions for an algorithm code, empty when the code is unknown.
pub fn parameters_for(code: &str) -> &'static [AlgorithmParameterDefinition] {
    code.parse::<AlgorithmId>()
        .map(|id| &id.summary().parameters[..])
        .unwrap_or(&[])
}

/// Supplied values for the algorithm's parameters, defaults for the missing
/// ones. Keys the algorithm does not define are dropped.
pub fn resolve_parameters(
    algorithm: AlgorithmId,
    supplied: &AlgorithmParameters,
) -> AlgorithmParameters {
    algorithm
        .summary()
        .parameters
        .iter()
        .map(|definition| {
            let value = supplied
                .get(definition.key)
                .copied()
                .unwrap_or(definition.default_value);
            (definition.key.to_owned(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_id() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.summary().id, id);
        }
        assert_eq!(algorithms().len(), 5);
        assert_eq!(AlgorithmId::Sa.name(), "Simulated Annealing");
    }

    #[test]
    fn test_parse_algorithm_id() {
        assert_eq!("aco".parse::<AlgorithmId>().unwrap(), AlgorithmId::Aco);
        assert_eq!(AlgorithmId::Rl.to_string(), "rl");
        assert_eq!(AlgorithmId::Tabu.code(), "TABU");
        assert!(matches!(
            "ALNS".parse::<AlgorithmId>(),
            Err(SimulatorError::UnknownAlgorithm(code)) if code == "ALNS"
        ));
    }

    #[test]
    fn test_parameters_for_unknown_code_is_empty() {
        assert!(parameters_for("unknown").is_empty());
        assert_eq!(parameters_for("ga")[0].key, "population");
    }

    #[test]
    fn test_resolve_parameters_fills_defaults() {
        let mut supplied = AlgorithmParameters::new();
        supplied.insert(String::from("iterations"), 300.0);
        supplied.insert(String::from("unrelated"), 1.0);

        let resolved = resolve_parameters(AlgorithmId::Tabu, &supplied);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["iterations"], 300.0);
        assert_eq!(resolved["tabuTenure"], 15.0);
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        assert_eq!(serde_json::to_string(&AlgorithmId::Aco).unwrap(), "\"aco\"");
        let parsed: AlgorithmId = serde_json::from_str("\"sa\"").unwrap();
        assert_eq!(parsed, AlgorithmId::Sa);
    }
}

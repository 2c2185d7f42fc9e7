use rayon::prelude::*;

use crate::{
    error::Result,
    problem::{fleet::Fleet, problem_instance::ProblemInstance},
};

use super::{
    algorithm::{AlgorithmId, AlgorithmParameters, resolve_parameters},
    simulation::SimulationEngine,
    solve_result::SolveResult,
};

#[derive(Debug)]
pub struct AlgorithmComparison {
    pub algorithm: AlgorithmId,
    pub parameters: AlgorithmParameters,
    pub result: Result<SolveResult>,
}

/// Simulates every algorithm on the same instance, fleet and seed, each with
/// its default parameters. Results come back in catalog order.
pub fn compare_algorithms(
    engine: &SimulationEngine,
    instance: &ProblemInstance,
    fleet: &Fleet,
    seed: &str,
) -> Vec<AlgorithmComparison> {
    AlgorithmId::ALL
        .par_iter()
        .map(|&algorithm| {
            let parameters = resolve_parameters(algorithm, &AlgorithmParameters::new());
            let result = engine.simulate(instance, fleet, algorithm, &parameters, seed);

            AlgorithmComparison {
                algorithm,
                parameters,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_compare_all_algorithms() {
        let engine = SimulationEngine::default();
        let instance = test_utils::create_location_grid_instance(3, 4, 6.0);
        let fleet = Fleet::uniform(3, 30);

        let comparisons = compare_algorithms(&engine, &instance, &fleet, "cmp");

        assert_eq!(
            comparisons.iter().map(|c| c.algorithm).collect::<Vec<_>>(),
            AlgorithmId::ALL.to_vec()
        );

        for comparison in &comparisons {
            let result = comparison.result.as_ref().unwrap();
            let expected = engine
                .simulate(
                    &instance,
                    &fleet,
                    comparison.algorithm,
                    &comparison.parameters,
                    "cmp",
                )
                .unwrap();

            assert_eq!(result.routes, expected.routes);
            assert_eq!(result.gap, expected.gap);
            assert_eq!(comparison.parameters.len(), 2);
        }
    }
}

use serde_json::{Value, json};

use crate::{
    problem::{
        dataset::{DatasetDefinition, DatasetKind},
        fleet::Fleet,
        node::{Customer, Depot},
        problem_instance::ProblemInstance,
    },
    scenario::dataset_store::{StoredCustomer, StoredDataset},
    solver::{
        algorithm::{AlgorithmId, AlgorithmParameters},
        run_config::SolverRunConfig,
        simulation::SimulationEngine,
        simulation_params::SimulationParams,
        solve_result::SolveResult,
    },
    store::result_tab::ResultTabPayload,
};

pub fn create_instance(customers: Vec<(f64, f64, f64)>) -> ProblemInstance {
    ProblemInstance {
        id: String::from("test"),
        name: String::from("Test"),
        depot: Depot::new(50.0, 50.0),
        customers: customers
            .into_iter()
            .enumerate()
            .map(|(index, (x, y, demand))| Customer::new(index as u32 + 1, x, y, demand))
            .collect(),
    }
}

/// Depot at (50, 50), customers 1 at (20, 20) and 2 at (80, 80), both with
/// demand 10.
pub fn two_customer_instance() -> ProblemInstance {
    create_instance(vec![(20.0, 20.0, 10.0), (80.0, 80.0, 10.0)])
}

pub fn create_location_grid_instance(rows: usize, cols: usize, demand: f64) -> ProblemInstance {
    let mut customers = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            customers.push((10.0 + x as f64 * 10.0, 10.0 + y as f64 * 10.0, demand));
        }
    }

    create_instance(customers)
}

pub fn simulate(instance: &ProblemInstance, fleet: &Fleet, seed: &str) -> SolveResult {
    SimulationEngine::default()
        .simulate(
            instance,
            fleet,
            AlgorithmId::Tabu,
            &AlgorithmParameters::new(),
            seed,
        )
        .unwrap()
}

pub fn stored_dataset(id: &str) -> StoredDataset {
    StoredDataset {
        definition: DatasetDefinition {
            id: id.to_owned(),
            name: format!("Dataset {id}"),
            description: String::from("Imported for tests"),
            size: 3,
            kind: DatasetKind::Preset,
        },
        depot: Depot::new(10.0, 10.0),
        customers: vec![
            StoredCustomer { id: Some(1.0), x: 1.0, y: 1.0, demand: 3.0 },
            StoredCustomer { id: Some(2.0), x: 2.0, y: 5.0, demand: 4.0 },
            StoredCustomer { id: Some(3.0), x: 7.0, y: 3.0, demand: 5.0 },
        ],
    }
}

pub fn stored_dataset_json(id: &str) -> Value {
    json!({
        "definition": {
            "id": id,
            "name": format!("Dataset {id}"),
            "description": "Imported for tests",
            "size": 2,
            "kind": "preset"
        },
        "depot": { "x": 0, "y": 0 },
        "customers": [
            { "id": 1, "x": 1, "y": 1, "demand": 3 },
            { "id": 2, "x": 4, "y": 1, "demand": 6 }
        ]
    })
}

pub fn run_config(fleet: Fleet, seed: &str) -> SolverRunConfig {
    SolverRunConfig {
        dataset_id: String::from("test"),
        vehicles: fleet,
        algorithm: AlgorithmId::Tabu,
        parameters: AlgorithmParameters::new(),
        seed: seed.to_owned(),
    }
}

pub fn result_payload(seed: &str) -> ResultTabPayload {
    let instance = two_customer_instance();
    let fleet = Fleet::uniform(1, 25);
    let solution = SimulationEngine::new(SimulationParams::default())
        .simulate(
            &instance,
            &fleet,
            AlgorithmId::Tabu,
            &AlgorithmParameters::new(),
            seed,
        )
        .unwrap();

    ResultTabPayload::new(run_config(fleet, seed), instance, solution)
}

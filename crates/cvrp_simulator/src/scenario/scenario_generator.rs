use tracing::{Level, debug, instrument};

use crate::{
    combine_seeds,
    error::{Result, SimulatorError},
    problem::{
        dataset::DatasetDefinition,
        node::{Customer, Depot},
        problem_instance::ProblemInstance,
    },
    random::seeded_rng::SeededRng,
    utils::round::round_to,
};

use super::{
    dataset_store::{DatasetStore, InMemoryDatasetStore, StoredDataset},
    presets::{RANDOM_DATASET_ID, builtin_datasets, preset},
};

const MIN_RANDOM_CUSTOMERS: usize = 10;
const MAX_RANDOM_CUSTOMERS: usize = 30;
const COORDINATE_MIN: f64 = 8.0;
const COORDINATE_MAX: f64 = 92.0;
const DEMAND_MIN: f64 = 4.0;
const DEMAND_MAX: f64 = 18.0;

/// Builds problem instances from the random generator, imported datasets
/// and built-in presets, in that order of priority.
pub struct ScenarioGenerator<S = InMemoryDatasetStore> {
    store: S,
}

impl Default for ScenarioGenerator<InMemoryDatasetStore> {
    fn default() -> Self {
        ScenarioGenerator::new(InMemoryDatasetStore::default())
    }
}

impl<S: DatasetStore> ScenarioGenerator<S> {
    pub fn new(store: S) -> Self {
        ScenarioGenerator { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Built-in definitions, with imported definitions replacing a built-in
    /// of the same id or appended after them.
    pub fn datasets(&self) -> Vec<DatasetDefinition> {
        let mut definitions = builtin_datasets();

        for dataset in self.store.imported_datasets() {
            let definition = dataset.definition;
            match definitions.iter().position(|item| item.id == definition.id) {
                Some(index) => definitions[index] = definition,
                None => definitions.push(definition),
            }
        }

        definitions
    }

    #[instrument(skip(self), level = Level::DEBUG)]
    pub fn create_instance(&self, dataset_id: &str, seed: &str) -> Result<ProblemInstance> {
        if dataset_id == RANDOM_DATASET_ID {
            return Ok(random_instance(dataset_id, seed));
        }

        if let Some(dataset) = self.store.dataset(dataset_id) {
            debug!("Using imported dataset");
            return Ok(imported_instance(dataset));
        }

        let preset = preset(dataset_id)
            .ok_or_else(|| SimulatorError::DatasetNotFound(dataset_id.to_owned()))?;

        Ok(ProblemInstance {
            id: dataset_id.to_owned(),
            name: preset.name.to_owned(),
            depot: preset.depot,
            customers: preset.customers,
        })
    }
}

fn random_instance(dataset_id: &str, seed: &str) -> ProblemInstance {
    let mut rng = SeededRng::new(combine_seeds!(dataset_id, seed));
    let count =
        MIN_RANDOM_CUSTOMERS + rng.next_int(MAX_RANDOM_CUSTOMERS - MIN_RANDOM_CUSTOMERS + 1);

    let customers = (1..=count)
        .map(|id| {
            let x = round_to(rng.next_range(COORDINATE_MIN, COORDINATE_MAX), 2);
            let y = round_to(rng.next_range(COORDINATE_MIN, COORDINATE_MAX), 2);
            let demand = rng.next_range(DEMAND_MIN, DEMAND_MAX).round().max(DEMAND_MIN);

            Customer::new(id as u32, x, y, demand)
        })
        .collect();

    ProblemInstance {
        id: format!("{dataset_id}-{seed}-{count}"),
        name: format!("Random {count} customers"),
        depot: Depot::new(50.0, 50.0),
        customers,
    }
}

/// Stored ids are kept (rounded, at least 1) unless one of them is missing,
/// in which case every customer is renumbered `1..=N` in list order.
fn imported_instance(dataset: StoredDataset) -> ProblemInstance {
    let renumber = dataset
        .customers
        .iter()
        .any(|customer| !customer.id.is_some_and(f64::is_finite));

    let customers = dataset
        .customers
        .iter()
        .enumerate()
        .map(|(index, customer)| {
            let id = match customer.id {
                Some(id) if !renumber => id.round().max(1.0) as u32,
                _ => index as u32 + 1,
            };

            Customer::new(id, customer.x, customer.y, customer.demand)
        })
        .collect();

    ProblemInstance {
        id: dataset.definition.id,
        name: dataset.definition.name,
        depot: Depot::new(dataset.depot.x, dataset.depot.y),
        customers,
    }
}

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::{
    error::Result,
    scenario::{
        dataset_store::{DatasetStore, InMemoryDatasetStore},
        scenario_generator::ScenarioGenerator,
    },
    solver::{
        algorithm::resolve_parameters, run_config::SolverRunConfig, simulation::SimulationEngine,
    },
    store::{
        result_tab::{ResultTabPayload, ResultTabRecord},
        run_result_store::{RunResultStore, RunResultStoreState},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(Arc<ResultTabRecord>),
    /// A newer run started while this one was solving; nothing was stored.
    Superseded,
}

/// Runs configurations end to end: instance creation, the simulated solve and
/// registration in the result store. Only the most recently started run may
/// register its result.
pub struct RunSession<S = InMemoryDatasetStore> {
    generator: ScenarioGenerator<S>,
    engine: SimulationEngine,
    store: Mutex<RunResultStore>,
    run_token: AtomicU64,
}

impl<S: DatasetStore> RunSession<S> {
    pub fn new(generator: ScenarioGenerator<S>, engine: SimulationEngine) -> Self {
        RunSession {
            generator,
            engine,
            store: Mutex::new(RunResultStore::new()),
            run_token: AtomicU64::new(0),
        }
    }

    pub fn generator(&self) -> &ScenarioGenerator<S> {
        &self.generator
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn store(&self) -> MutexGuard<'_, RunResultStore> {
        self.store.lock()
    }

    pub fn subscribe(&self) -> watch::Receiver<RunResultStoreState> {
        self.store.lock().subscribe()
    }

    #[instrument(skip_all, fields(dataset = %config.dataset_id, algorithm = %config.algorithm))]
    pub async fn run(&self, config: &SolverRunConfig) -> Result<RunOutcome> {
        let token = self.run_token.fetch_add(1, Ordering::SeqCst) + 1;

        let instance = self
            .generator
            .create_instance(&config.dataset_id, &config.seed)?;
        let config = SolverRunConfig {
            parameters: resolve_parameters(config.algorithm, &config.parameters),
            ..config.clone()
        };

        let solution = self
            .engine
            .solve(
                &instance,
                &config.vehicles,
                config.algorithm,
                &config.parameters,
                &config.seed,
            )
            .await?;

        if self.run_token.load(Ordering::SeqCst) != token {
            info!(token, "Discarding result of a superseded run");
            return Ok(RunOutcome::Superseded);
        }

        let record = self
            .store
            .lock()
            .register_result(ResultTabPayload::new(config, instance, solution));

        Ok(RunOutcome::Completed(record))
    }
}

impl Default for RunSession<InMemoryDatasetStore> {
    fn default() -> Self {
        RunSession::new(ScenarioGenerator::default(), SimulationEngine::default())
    }
}

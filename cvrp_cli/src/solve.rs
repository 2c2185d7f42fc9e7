use std::{path::PathBuf, time::Duration};

use anyhow::bail;
use clap::Args;
use comfy_table::Table;
use cvrp_simulator::{
    export::ExportDocument,
    random::seed::{Seed, normalize_seed},
    scenario::scenario_generator::ScenarioGenerator,
    session::{RunOutcome, RunSession},
    solver::{
        algorithm::{AlgorithmId, AlgorithmParameters},
        metrics::served_demand_utilization,
        run_config::SolverRunConfig,
        simulation::SimulationEngine,
        simulation_params::SimulationParams,
    },
    store::result_tab::ResultTabRecord,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{datasets::dataset_store, fleet_args::FleetArgs, parsers};

#[derive(Args)]
pub struct SolveArgs {
    /// Dataset id: `city-grid`, `clustered`, `random` or an imported id
    #[arg(short, long, default_value = "city-grid")]
    dataset: String,

    #[arg(short, long, default_value = "tabu")]
    algorithm: AlgorithmId,

    #[command(flatten)]
    fleet: FleetArgs,

    /// Algorithm parameter as key=value, repeatable
    #[arg(short, long = "param", value_parser = parsers::parse_parameter)]
    params: Vec<(String, f64)>,

    /// Seed of the run, the current time when omitted
    #[arg(short, long)]
    seed: Option<String>,

    /// Simulated solver processing time (e.g., "1s", "PT2S", "0")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "1s")]
    latency: jiff::SignedDuration,

    /// Write the run as a JSON document to this file
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

impl SolveArgs {
    fn run_config(&self) -> SolverRunConfig {
        SolverRunConfig {
            dataset_id: self.dataset.clone(),
            vehicles: self.fleet.fleet(),
            algorithm: self.algorithm,
            parameters: self.params.iter().cloned().collect::<AlgorithmParameters>(),
            seed: normalize_seed(self.seed.as_ref().map(Seed::from).as_ref()),
        }
    }
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let config = args.run_config();
    let session = RunSession::new(
        ScenarioGenerator::new(dataset_store()),
        SimulationEngine::new(SimulationParams {
            latency: args.latency,
            ..SimulationParams::default()
        }),
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg} ({elapsed})")?);
    spinner.set_message(format!("Running {}", config.algorithm.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = session.run(&config).await;
    spinner.finish_and_clear();

    let RunOutcome::Completed(record) = outcome? else {
        bail!("Run was superseded");
    };

    print_record(&record);

    if let Some(out) = args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&out, ExportDocument::from(&*record).to_pretty_json()?)?;
        info!("Exported run to {:?}", out);
    }

    Ok(())
}

fn print_record(record: &ResultTabRecord) {
    let summary = &record.payload.summary;
    let solution = &record.payload.raw_response;
    let instance = &record.payload.raw_request.instance;

    info!(
        "{}: distance = {:.2}, vehicles = {}, runtime = {}ms, gap = {}%",
        record.title,
        summary.distance,
        summary.vehicles_used,
        summary.runtime_ms,
        solution.gap.unwrap_or_default(),
    );
    info!(
        "Demand {} / capacity {} ({}% utilization, {}% served), {}",
        summary.total_demand,
        summary.fleet_capacity,
        summary.utilization,
        served_demand_utilization(instance, solution),
        if summary.feasible {
            String::from("feasible")
        } else {
            format!("{} units over capacity", summary.capacity_violations)
        }
    );

    for line in &solution.log {
        info!("{line}");
    }

    let mut table = Table::new();
    table.set_header(vec!["Vehicle", "Stops", "Load", "Capacity", "Distance", "Route"]);

    for (route, vehicle) in solution.routes.iter().zip(record.payload.vehicles.vehicles()) {
        let path = route
            .nodes
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" → ");

        table.add_row(vec![
            route.vehicle.to_string(),
            route.customer_ids().count().to_string(),
            route.load.to_string(),
            vehicle.capacity.to_string(),
            format!("{:.2}", route.distance),
            path,
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        solve: SolveArgs,
    }

    #[test]
    fn test_run_config() {
        let cli = TestCli::parse_from([
            "cvrp",
            "--dataset",
            "clustered",
            "-a",
            "sa",
            "--capacities",
            "50,30",
            "-p",
            "cooling=0.95",
            "--seed",
            "42",
        ]);

        let config = cli.solve.run_config();

        assert_eq!(config.dataset_id, "clustered");
        assert_eq!(config.algorithm, AlgorithmId::Sa);
        assert_eq!(config.vehicles.capacity_signature(), "50/30");
        assert_eq!(config.parameters["cooling"], 0.95);
        assert_eq!(config.seed, "42");
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(TestCli::try_parse_from(["cvrp", "-a", "bogus"]).is_err());
    }

    #[test]
    fn test_missing_seed_uses_timestamp() {
        let cli = TestCli::parse_from(["cvrp"]);

        let seed = cli.solve.run_config().seed;
        assert!(seed.parse::<i64>().is_ok());
    }
}

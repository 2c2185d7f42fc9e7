use clap::Args;
use comfy_table::Table;
use cvrp_simulator::{
    scenario::scenario_generator::ScenarioGenerator,
    solver::{comparison::compare_algorithms, simulation::SimulationEngine},
};
use tracing::{info, warn};

use crate::{datasets::dataset_store, fleet_args::FleetArgs};

#[derive(Args)]
pub struct CompareArgs {
    #[arg(short, long, default_value = "city-grid")]
    dataset: String,

    #[command(flatten)]
    fleet: FleetArgs,

    #[arg(short, long, default_value = "12345")]
    seed: String,
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    let generator = ScenarioGenerator::new(dataset_store());
    let instance = generator.create_instance(&args.dataset, &args.seed)?;
    let fleet = args.fleet.fleet();

    info!(
        "Comparing algorithms on {} ({} customers), seed {}",
        instance.name,
        instance.customers.len(),
        args.seed
    );

    let engine = SimulationEngine::default();
    let comparisons = compare_algorithms(&engine, &instance, &fleet, &args.seed);

    let mut table = Table::new();
    table.set_header(vec![
        "Algorithm",
        "Distance",
        "Gap %",
        "Runtime ms",
        "Vehicles",
        "Feasible",
    ]);

    for comparison in comparisons {
        match comparison.result {
            Ok(result) => {
                table.add_row(vec![
                    comparison.algorithm.name().to_owned(),
                    format!("{:.2}", result.distance),
                    result.gap.map(|gap| format!("{gap:.2}")).unwrap_or_default(),
                    result.runtime_ms.to_string(),
                    result.vehicles_used.to_string(),
                    result.feasible.to_string(),
                ]);
            }
            Err(error) => warn!("{} failed: {error}", comparison.algorithm.name()),
        }
    }

    println!("{table}");
    Ok(())
}

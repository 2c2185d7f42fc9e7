use comfy_table::Table;
use cvrp_simulator::solver::algorithm::algorithms;

pub fn run() {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Description", "Parameters"]);

    for algorithm in algorithms() {
        let parameters = algorithm
            .parameters
            .iter()
            .map(|parameter| {
                format!(
                    "{} ({}): {}..{} step {}, default {}",
                    parameter.key,
                    parameter.label,
                    parameter.min,
                    parameter.max,
                    parameter.step,
                    parameter.default_value
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            algorithm.id.to_string(),
            algorithm.name.to_owned(),
            algorithm.description.to_owned(),
            parameters,
        ]);
    }

    println!("{table}");
}

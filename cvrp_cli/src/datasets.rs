use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Subcommand;
use comfy_table::Table;
use cvrp_simulator::{
    parsers::cvrplib,
    scenario::{
        dataset_store::{DatasetStore, JsonFileDatasetStore, StoredDataset, normalize_record},
        scenario_generator::ScenarioGenerator,
    },
};
use tracing::info;

#[derive(Subcommand)]
pub enum DatasetsSubcommands {
    /// Built-in and imported datasets
    List,
    /// Import a stored dataset record (.json) or a CVRPLIB instance
    Import {
        #[arg(short, long)]
        file: PathBuf,

        /// Dataset id for CVRPLIB files, derived from NAME when omitted
        #[arg(long)]
        id: Option<String>,
    },
}

/// The folder named by `CVRP_DATASETS_FOLDER`, the working directory otherwise.
pub fn dataset_store() -> JsonFileDatasetStore {
    JsonFileDatasetStore::from_env().unwrap_or_else(|| JsonFileDatasetStore::from_folder("."))
}

pub fn run(subcommand: DatasetsSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        DatasetsSubcommands::List => {
            let generator = ScenarioGenerator::new(dataset_store());

            let mut table = Table::new();
            table.set_header(vec!["Id", "Name", "Kind", "Size", "Description"]);
            for definition in generator.datasets() {
                table.add_row(vec![
                    definition.id,
                    definition.name,
                    format!("{:?}", definition.kind).to_lowercase(),
                    definition.size.to_string(),
                    definition.description,
                ]);
            }

            println!("{table}");
        }
        DatasetsSubcommands::Import { file, id } => {
            let dataset = read_dataset(&file, id.as_deref())?;
            let store = dataset_store();
            store.save_dataset(&dataset)?;

            info!(
                "Imported {} ({} customers) into {:?}",
                dataset.definition.id,
                dataset.customers.len(),
                store.path()
            );
        }
    }

    Ok(())
}

fn read_dataset(file: &Path, id: Option<&str>) -> anyhow::Result<StoredDataset> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Cannot read {file:?}"))?;

    if file.extension().is_some_and(|extension| extension == "json") {
        let value: serde_json::Value = serde_json::from_str(&content)?;
        return normalize_record(&value)
            .ok_or_else(|| anyhow!("{file:?} is not a valid dataset record"));
    }

    Ok(cvrplib::parse(&content)?.into_stored_dataset(id)?)
}

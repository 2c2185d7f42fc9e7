use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::Result,
    problem::{
        dataset::{DatasetDefinition, DatasetKind},
        node::Depot,
    },
};

pub const DATASETS_FOLDER_ENV_VAR: &str = "CVRP_DATASETS_FOLDER";

/// Namespace of the key-value store holding imported datasets.
pub const DATASETS_STORAGE_KEY: &str = "cvrp-imported-datasets";

/// Customer as persisted by the import boundary. The id is optional: records
/// coming from hand-written files may omit it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StoredCustomer {
    pub id: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StoredDataset {
    pub definition: DatasetDefinition,
    pub depot: Depot,
    pub customers: Vec<StoredCustomer>,
}

pub trait DatasetStore {
    /// Every well-formed imported dataset. Returned values are copies.
    fn imported_datasets(&self) -> Vec<StoredDataset>;

    /// Replaces any dataset with the same id.
    fn save_dataset(&self, dataset: &StoredDataset) -> Result<()>;

    fn dataset(&self, id: &str) -> Option<StoredDataset> {
        self.imported_datasets()
            .into_iter()
            .find(|dataset| dataset.definition.id == id)
    }
}

#[derive(Default)]
pub struct InMemoryDatasetStore {
    datasets: RwLock<Vec<StoredDataset>>,
}

impl InMemoryDatasetStore {
    pub fn with_datasets(datasets: Vec<StoredDataset>) -> Self {
        InMemoryDatasetStore {
            datasets: RwLock::new(datasets),
        }
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn imported_datasets(&self) -> Vec<StoredDataset> {
        self.datasets.read().clone()
    }

    fn save_dataset(&self, dataset: &StoredDataset) -> Result<()> {
        let mut datasets = self.datasets.write();
        datasets.retain(|item| item.definition.id != dataset.definition.id);
        datasets.push(dataset.clone());

        Ok(())
    }
}

/// Datasets kept as a JSON array in `<folder>/cvrp-imported-datasets.json`.
pub struct JsonFileDatasetStore {
    path: PathBuf,
}

impl JsonFileDatasetStore {
    pub fn from_folder<P: AsRef<Path>>(folder: P) -> Self {
        JsonFileDatasetStore {
            path: folder
                .as_ref()
                .join(format!("{DATASETS_STORAGE_KEY}.json")),
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var(DATASETS_FOLDER_ENV_VAR)
            .ok()
            .map(JsonFileDatasetStore::from_folder)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<Value>> {
        if !self.path.is_file() {
            return Ok(vec![]);
        }

        let file = std::fs::File::open(&self.path)?;
        let value: Value = serde_json::from_reader(std::io::BufReader::new(file))?;

        Ok(match value {
            Value::Array(records) => records,
            _ => vec![],
        })
    }
}

impl DatasetStore for JsonFileDatasetStore {
    fn imported_datasets(&self) -> Vec<StoredDataset> {
        match self.read_records() {
            Ok(records) => records.iter().filter_map(normalize_record).collect(),
            Err(error) => {
                warn!(path = ?self.path, %error, "Ignoring unreadable dataset store");
                vec![]
            }
        }
    }

    fn save_dataset(&self, dataset: &StoredDataset) -> Result<()> {
        // An unreadable file must not be overwritten with a partial list.
        let mut datasets: Vec<StoredDataset> = self
            .read_records()?
            .iter()
            .filter_map(normalize_record)
            .filter(|item| item.definition.id != dataset.definition.id)
            .collect();
        datasets.push(dataset.clone());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &datasets)?;
        writer.flush()?;

        debug!(id = %dataset.definition.id, path = ?self.path, "Saved dataset");
        Ok(())
    }
}

fn extract_string(value: Option<&Value>) -> Option<String> {
    let trimmed = value?.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Accepts JSON numbers and numeric strings.
fn extract_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// Validates one raw record and returns its cleaned form, or `None` when the
/// record is malformed.
pub fn normalize_record(value: &Value) -> Option<StoredDataset> {
    let definition = value.get("definition")?.as_object()?;

    let id = extract_string(definition.get("id"))?;
    let name = extract_string(definition.get("name"))?;
    let description = extract_string(definition.get("description"))?;
    let kind = match definition.get("kind")?.as_str()? {
        "preset" => DatasetKind::Preset,
        "random" => DatasetKind::Random,
        _ => return None,
    };

    let depot = value.get("depot")?;
    let depot = Depot::new(
        extract_number(depot.get("x"))?,
        extract_number(depot.get("y"))?,
    );

    let raw_customers = value.get("customers")?.as_array()?;
    if raw_customers.is_empty() {
        return None;
    }

    let customers = raw_customers
        .iter()
        .map(|customer| {
            Some(StoredCustomer {
                id: extract_number(customer.get("id")).map(|id| id.round().max(1.0)),
                x: extract_number(customer.get("x"))?,
                y: extract_number(customer.get("y"))?,
                demand: extract_number(customer.get("demand"))?,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(StoredDataset {
        definition: DatasetDefinition {
            id,
            name,
            description,
            size: customers.len(),
            kind,
        },
        depot,
        customers,
    })
}

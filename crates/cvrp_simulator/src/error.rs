use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Unknown dataset id: {0}")]
    DatasetNotFound(String),
    #[error("Cannot pick from an empty collection")]
    EmptyInput,
    #[error("Fleet has no vehicles")]
    EmptyFleet,
    #[error("Unknown algorithm id: {0}")]
    UnknownAlgorithm(String),
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("Dataset store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Dataset store contains invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

pub mod dataset_store;
pub mod presets;
pub mod scenario_generator;

pub mod algorithm;
pub mod comparison;
pub mod metrics;
pub mod run_config;
pub mod simulation;
pub mod simulation_params;
pub mod solve_result;

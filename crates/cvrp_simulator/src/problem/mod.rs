pub mod dataset;
pub mod fleet;
pub mod node;
pub mod problem_instance;

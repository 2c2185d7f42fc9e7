pub mod error;
pub mod export;
pub mod geometry;
pub mod parsers;
pub mod problem;
pub mod random;
pub mod scenario;
pub mod session;
pub mod solver;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

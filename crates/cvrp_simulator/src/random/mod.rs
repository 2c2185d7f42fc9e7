pub mod seed;
pub mod seeded_rng;

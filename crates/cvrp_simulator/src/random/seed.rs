use std::fmt::Display;

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A seed as accepted by [`SeededRng::new`](super::seeded_rng::SeededRng::new).
///
/// Numbers and strings hash differently, so `Seed::Number(42.0)` and
/// `Seed::Text("42")` produce unrelated streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Seed {
    Number(f64),
    Text(String),
}

impl Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seed::Number(value) => write!(f, "{value}"),
            Seed::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

impl From<&String> for Seed {
    fn from(value: &String) -> Self {
        Seed::Text(value.clone())
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Number(value)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Number(value as f64)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Number(f64::from(value))
    }
}

/// Joins the parts with `-` in the given order.
///
/// The result is only as unique as its parts: `("a-b", "c")` and
/// `("a", "b-c")` combine to the same seed.
pub fn combine_seeds<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: Display,
{
    parts
        .into_iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Missing seeds fall back to the current Unix time in milliseconds.
pub fn normalize_seed(seed: Option<&Seed>) -> String {
    match seed {
        Some(seed) => seed.to_string(),
        None => Timestamp::now().as_millisecond().to_string(),
    }
}

#[macro_export]
macro_rules! combine_seeds {
    ($($part:expr),+ $(,)?) => {
        $crate::random::seed::combine_seeds([$($part.to_string()),+])
    };
}

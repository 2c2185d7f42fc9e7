use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Node id reserved for the depot.
pub const DEPOT_ID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Depot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Depot {
    pub fn new(x: f64, y: f64) -> Self {
        Depot { id: DEPOT_ID, x, y }
    }

    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Customer {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
}

impl Customer {
    pub fn new(id: u32, x: f64, y: f64, demand: f64) -> Self {
        Customer { id, x, y, demand }
    }

    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.x, self.y)
    }
}

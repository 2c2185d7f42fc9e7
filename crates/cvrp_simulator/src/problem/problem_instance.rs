use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::node::{Customer, Depot};

/// A depot and its customers. Instances are replaced, never edited, when the
/// dataset or seed changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProblemInstance {
    pub id: String,
    pub name: String,
    pub depot: Depot,
    pub customers: Vec<Customer>,
}

impl ProblemInstance {
    pub fn customer(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(|customer| customer.demand).sum()
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MAX_VEHICLES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Vehicle {
    pub id: u32,
    pub capacity: u32,
}

/// Ordered vehicles with contiguous 1-based ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fleet {
    pub vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Builds one vehicle per capacity. The count is clamped to
    /// `1..=MAX_VEHICLES` and every capacity to at least 1; missing vehicles
    /// reuse the last capacity given.
    pub fn from_capacities(capacities: &[u32]) -> Self {
        let count = capacities.len().clamp(1, MAX_VEHICLES);
        let fallback = capacities.last().copied().unwrap_or(1);

        let vehicles = (0..count)
            .map(|index| Vehicle {
                id: index as u32 + 1,
                capacity: capacities.get(index).copied().unwrap_or(fallback).max(1),
            })
            .collect();

        Fleet { vehicles }
    }

    pub fn uniform(count: usize, capacity: u32) -> Self {
        let count = count.clamp(1, MAX_VEHICLES);
        Fleet::from_capacities(&vec![capacity; count])
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .map(|vehicle| u64::from(vehicle.capacity))
            .sum()
    }

    /// The shared capacity of a uniform fleet, otherwise every capacity
    /// joined with `/` in fleet order.
    pub fn capacity_signature(&self) -> String {
        if let Some(capacity) = self.uniform_capacity() {
            return capacity.to_string();
        }

        self.vehicles
            .iter()
            .map(|vehicle| vehicle.capacity.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn uniform_capacity(&self) -> Option<u32> {
        let (first, rest) = self.vehicles.split_first()?;
        rest.iter()
            .all(|vehicle| vehicle.capacity == first.capacity)
            .then_some(first.capacity)
    }
}

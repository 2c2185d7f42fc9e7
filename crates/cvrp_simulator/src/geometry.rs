use fxhash::FxHashMap;
use geo::{Distance, Euclidean};

use crate::{
    problem::node::{Customer, DEPOT_ID, Depot},
    utils::round::round_to,
};

pub fn euclidean_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    Euclidean.distance(&geo::Point::new(ax, ay), &geo::Point::new(bx, by))
}

/// Resolves node ids to coordinates. Id `0` is the depot; for duplicated
/// customer ids the first customer wins.
pub struct NodeLookup {
    points: FxHashMap<u32, geo::Point>,
}

impl NodeLookup {
    pub fn new(depot: &Depot, customers: &[Customer]) -> Self {
        let mut points = FxHashMap::default();
        points.insert(DEPOT_ID, depot.point());

        for customer in customers {
            points.entry(customer.id).or_insert_with(|| customer.point());
        }

        NodeLookup { points }
    }

    #[inline]
    pub fn point(&self, id: u32) -> Option<&geo::Point> {
        self.points.get(&id)
    }

    /// `0` when either id is unknown.
    pub fn distance(&self, a: u32, b: u32) -> f64 {
        match (self.point(a), self.point(b)) {
            (Some(a), Some(b)) => Euclidean.distance(a, b),
            _ => 0.0,
        }
    }
}

pub fn distance_between_nodes(a: u32, b: u32, depot: &Depot, customers: &[Customer]) -> f64 {
    let resolve = |id: u32| {
        if id == DEPOT_ID {
            Some(depot.point())
        } else {
            customers
                .iter()
                .find(|customer| customer.id == id)
                .map(Customer::point)
        }
    };

    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => Euclidean.distance(&a, &b),
        _ => 0.0,
    }
}

/// Length of the path through `nodes`, rounded to 2 decimals.
pub fn route_distance(nodes: &[u32], depot: &Depot, customers: &[Customer]) -> f64 {
    let lookup = NodeLookup::new(depot, customers);

    let distance: f64 = nodes
        .windows(2)
        .map(|pair| lookup.distance(pair[0], pair[1]))
        .sum();

    round_to(distance, 2)
}

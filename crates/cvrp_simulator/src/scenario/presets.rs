use crate::problem::{
    dataset::{DatasetDefinition, DatasetKind},
    node::{Customer, Depot},
};

pub const RANDOM_DATASET_ID: &str = "random";

pub struct Preset {
    pub name: &'static str,
    pub depot: Depot,
    pub customers: Vec<Customer>,
}

pub fn builtin_datasets() -> Vec<DatasetDefinition> {
    vec![
        DatasetDefinition {
            id: String::from("city-grid"),
            name: String::from("City Grid (15 customers)"),
            description: String::from("Customers distributed evenly around a central depot."),
            size: 15,
            kind: DatasetKind::Preset,
        },
        DatasetDefinition {
            id: String::from("clustered"),
            name: String::from("Clustered Demand (18 customers)"),
            description: String::from("Tight customer clusters to showcase routing trade-offs."),
            size: 18,
            kind: DatasetKind::Preset,
        },
        DatasetDefinition {
            id: String::from(RANDOM_DATASET_ID),
            name: String::from("Random Instance"),
            description: String::from("Procedurally generated customers between 10 and 30."),
            size: 0,
            kind: DatasetKind::Random,
        },
    ]
}

fn customers(rows: &[(u32, f64, f64, f64)]) -> Vec<Customer> {
    rows.iter()
        .map(|&(id, x, y, demand)| Customer::new(id, x, y, demand))
        .collect()
}

pub fn preset(id: &str) -> Option<Preset> {
    match id {
        "city-grid" => Some(Preset {
            name: "City Grid",
            depot: Depot::new(50.0, 50.0),
            customers: customers(&[
                (1, 20.0, 20.0, 12.0),
                (2, 40.0, 20.0, 7.0),
                (3, 60.0, 20.0, 6.0),
                (4, 80.0, 20.0, 8.0),
                (5, 20.0, 40.0, 10.0),
                (6, 40.0, 40.0, 9.0),
                (7, 60.0, 40.0, 11.0),
                (8, 80.0, 40.0, 5.0),
                (9, 20.0, 60.0, 14.0),
                (10, 40.0, 60.0, 13.0),
                (11, 60.0, 60.0, 9.0),
                (12, 80.0, 60.0, 12.0),
                (13, 20.0, 80.0, 7.0),
                (14, 40.0, 80.0, 6.0),
                (15, 60.0, 80.0, 8.0),
            ]),
        }),
        "clustered" => Some(Preset {
            name: "Clustered Demand",
            depot: Depot::new(50.0, 50.0),
            customers: customers(&[
                (1, 30.0, 30.0, 6.0),
                (2, 31.0, 33.0, 7.0),
                (3, 35.0, 28.0, 8.0),
                (4, 70.0, 25.0, 10.0),
                (5, 74.0, 22.0, 9.0),
                (6, 77.0, 27.0, 12.0),
                (7, 25.0, 75.0, 11.0),
                (8, 28.0, 78.0, 7.0),
                (9, 32.0, 72.0, 13.0),
                (10, 65.0, 68.0, 9.0),
                (11, 68.0, 72.0, 10.0),
                (12, 72.0, 65.0, 5.0),
                (13, 54.0, 82.0, 8.0),
                (14, 58.0, 85.0, 9.0),
                (15, 62.0, 88.0, 6.0),
                (16, 85.0, 55.0, 7.0),
                (17, 88.0, 58.0, 8.0),
                (18, 90.0, 53.0, 10.0),
            ]),
        }),
        _ => None,
    }
}

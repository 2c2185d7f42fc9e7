use geo::Coord;

use crate::{
    error::{Result, SimulatorError},
    problem::{
        dataset::{DatasetDefinition, DatasetKind},
        node::Depot,
    },
    scenario::dataset_store::{StoredCustomer, StoredDataset},
};

/// The parts of a CVRPLIB `.vrp` file the simulator uses.
#[derive(Debug, Clone)]
pub struct CvrpInstance {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub capacity: Option<f64>,
    pub coords: Vec<Coord<f64>>,
    pub demands: Vec<f64>,
    pub depots: Vec<usize>,
}

impl CvrpInstance {
    /// The first depot becomes the dataset depot, every other node a customer
    /// numbered `1..=N` in file order.
    pub fn into_stored_dataset(self, id: Option<&str>) -> Result<StoredDataset> {
        if self.coords.len() != self.demands.len() {
            return Err(invalid(format!(
                "{} coordinates but {} demands",
                self.coords.len(),
                self.demands.len()
            )));
        }

        let depot_index = self.depots.first().copied().unwrap_or(0);
        let depot = self
            .coords
            .get(depot_index)
            .map(|coord| Depot::new(coord.x, coord.y))
            .ok_or_else(|| invalid(format!("Depot node {} is out of range", depot_index + 1)))?;

        let customers: Vec<StoredCustomer> = self
            .coords
            .iter()
            .zip(&self.demands)
            .enumerate()
            .filter(|(index, _)| !self.depots.contains(index))
            .enumerate()
            .map(|(position, (_, (coord, demand)))| StoredCustomer {
                id: Some(position as f64 + 1.0),
                x: coord.x,
                y: coord.y,
                demand: *demand,
            })
            .collect();

        if customers.is_empty() {
            return Err(invalid(String::from("Instance has no customers")));
        }

        let name = self
            .name
            .unwrap_or_else(|| String::from("CVRPLIB instance"));
        let id = id
            .map(str::to_owned)
            .unwrap_or_else(|| name.to_lowercase().replace(char::is_whitespace, "-"));
        let description = self.comment.unwrap_or_else(|| match self.capacity {
            Some(capacity) => format!("Imported from CVRPLIB, vehicle capacity {capacity}"),
            None => String::from("Imported from CVRPLIB"),
        });

        Ok(StoredDataset {
            definition: DatasetDefinition {
                id,
                name,
                description,
                size: customers.len(),
                kind: DatasetKind::Preset,
            },
            depot,
            customers,
        })
    }
}

fn invalid(message: String) -> SimulatorError {
    SimulatorError::InvalidDataset(message)
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("Invalid {what}: {value}")))
}

fn is_section_end(line: &str) -> bool {
    line.contains("SECTION") || line == "EOF"
}

pub fn parse(text: &str) -> Result<CvrpInstance> {
    let mut name: Option<String> = None;
    let mut comment: Option<String> = None;
    let mut capacity: Option<f64> = None;
    let mut coords: Option<Vec<Coord<f64>>> = None;
    let mut demands: Option<Vec<f64>> = None;
    let mut depots: Option<Vec<usize>> = None;

    let lines: Vec<&str> = text.lines().map(|l| l.trim()).collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_empty() || line == "EOF" {
            i += 1;
            continue;
        }

        if line.contains("NODE_COORD_SECTION") {
            i += 1;
            let mut parsed_coords = Vec::new();
            while i < lines.len() && !is_section_end(lines[i]) {
                let parts: Vec<&str> = lines[i].split_whitespace().collect();
                if parts.len() >= 3 {
                    parsed_coords.push(Coord {
                        x: parse_number(parts[1], "x coordinate")?,
                        y: parse_number(parts[2], "y coordinate")?,
                    });
                }
                i += 1;
            }
            coords = Some(parsed_coords);
            continue;
        }

        if line.contains("DEMAND_SECTION") {
            i += 1;
            let mut parsed_demands = Vec::new();
            while i < lines.len() && !is_section_end(lines[i]) {
                let parts: Vec<&str> = lines[i].split_whitespace().collect();
                if parts.len() >= 2 {
                    parsed_demands.push(parse_number(parts[1], "demand")?);
                }
                i += 1;
            }
            demands = Some(parsed_demands);
            continue;
        }

        if line.contains("DEPOT_SECTION") {
            i += 1;
            let mut parsed_depots = Vec::new();
            'section: while i < lines.len() && !is_section_end(lines[i]) {
                for part in lines[i].split_whitespace() {
                    let index: i64 = parse_number(part, "depot index")?;
                    if index == -1 {
                        i += 1;
                        break 'section;
                    }
                    if index < 1 {
                        return Err(invalid(format!("Invalid depot index: {index}")));
                    }
                    // 1-based in the file
                    parsed_depots.push(index as usize - 1);
                }
                i += 1;
            }
            depots = Some(parsed_depots);
            continue;
        }

        // KEY : VALUE specifications
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();

            match key.trim().to_uppercase().as_str() {
                "NAME" => name = Some(value.to_owned()),
                "COMMENT" => comment = Some(value.to_owned()),
                "CAPACITY" => capacity = Some(parse_number(value, "capacity")?),
                _ => {}
            }
        }

        i += 1;
    }

    Ok(CvrpInstance {
        name,
        comment,
        capacity,
        coords: coords.ok_or_else(|| invalid(String::from("Missing NODE_COORD_SECTION")))?,
        demands: demands.ok_or_else(|| invalid(String::from("Missing DEMAND_SECTION")))?,
        depots: depots
            .filter(|depots| !depots.is_empty())
            .unwrap_or_else(|| vec![0]),
    })
}

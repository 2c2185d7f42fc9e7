use clap::Args;
use cvrp_simulator::problem::fleet::Fleet;

#[derive(Args, Debug, Clone)]
pub struct FleetArgs {
    /// Number of vehicles (1 to 8)
    #[arg(short = 'n', long, default_value_t = 4)]
    vehicles: usize,

    /// Capacity of every vehicle
    #[arg(short, long, default_value_t = 60)]
    capacity: u32,

    /// Per-vehicle capacities, e.g. `60,60,40`. Overrides --vehicles and --capacity
    #[arg(long, value_delimiter = ',')]
    capacities: Option<Vec<u32>>,
}

impl FleetArgs {
    pub fn fleet(&self) -> Fleet {
        match &self.capacities {
            Some(capacities) => Fleet::from_capacities(capacities),
            None => Fleet::uniform(self.vehicles, self.capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        fleet: FleetArgs,
    }

    #[test]
    fn test_uniform_fleet() {
        let cli = TestCli::parse_from(["cvrp", "-n", "3", "--capacity", "45"]);

        assert_eq!(cli.fleet.fleet(), Fleet::uniform(3, 45));
    }

    #[test]
    fn test_capacities_override() {
        let cli = TestCli::parse_from(["cvrp", "-n", "3", "--capacities", "60,0,40"]);

        assert_eq!(cli.fleet.fleet().capacity_signature(), "60/1/40");
    }

    #[test]
    fn test_vehicle_count_is_clamped() {
        let cli = TestCli::parse_from(["cvrp", "-n", "12"]);

        assert_eq!(cli.fleet.fleet().len(), 8);
    }
}

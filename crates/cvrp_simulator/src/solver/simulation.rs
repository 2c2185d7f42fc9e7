use jiff::Timestamp;
use tracing::{Level, debug, info, instrument};

use crate::{
    combine_seeds,
    error::{Result, SimulatorError},
    geometry::route_distance,
    problem::{fleet::Fleet, problem_instance::ProblemInstance},
    random::seeded_rng::SeededRng,
    utils::round::round_to,
};

use super::{
    algorithm::{AlgorithmId, AlgorithmParameters},
    simulation_params::SimulationParams,
    solve_result::{ConvergencePoint, RoutePlan, RuntimeSlice, SolveResult, Violations},
};

pub const ROUTE_COLORS: [&str; 10] = [
    "#3b82f6", "#ec4899", "#22c55e", "#f97316", "#8b5cf6", "#06b6d4", "#facc15", "#ef4444",
    "#14b8a6", "#a855f7",
];

pub const RUNTIME_STAGES: [&str; 4] = [
    "Preprocessing",
    "Construction",
    "Improvement",
    "Post-processing",
];

struct ConstructedRoutes {
    routes: Vec<RoutePlan>,
    total_demand: f64,
    capacity_violations: f64,
}

/// Produces reproducible, solver-shaped results. Routes come from a seeded
/// first-fit construction, the performance figures are synthesized from the
/// same seed.
#[derive(Default)]
pub struct SimulationEngine {
    params: SimulationParams,
}

impl SimulationEngine {
    pub fn new(params: SimulationParams) -> Self {
        SimulationEngine { params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Simulates the run and reports it once the configured latency elapsed.
    #[instrument(skip_all, fields(%algorithm, %seed), level = Level::INFO)]
    pub async fn solve(
        &self,
        instance: &ProblemInstance,
        fleet: &Fleet,
        algorithm: AlgorithmId,
        parameters: &AlgorithmParameters,
        seed: &str,
    ) -> Result<SolveResult> {
        let result = self.simulate(instance, fleet, algorithm, parameters, seed)?;

        tokio::time::sleep(self.params.latency.unsigned_abs()).await;

        info!(
            distance = result.distance,
            vehicles_used = result.vehicles_used,
            feasible = result.feasible,
            "Solve finished"
        );
        Ok(result)
    }

    /// Synchronous core of [`SimulationEngine::solve`].
    pub fn simulate(
        &self,
        instance: &ProblemInstance,
        fleet: &Fleet,
        algorithm: AlgorithmId,
        parameters: &AlgorithmParameters,
        seed: &str,
    ) -> Result<SolveResult> {
        if fleet.is_empty() {
            return Err(SimulatorError::EmptyFleet);
        }

        let derived_seed = combine_seeds!(
            seed,
            algorithm,
            fleet.len(),
            fleet.capacity_signature(),
            instance.customers.len()
        );
        debug!(%derived_seed, "Derived routing seed");

        let ConstructedRoutes {
            routes,
            total_demand,
            capacity_violations,
        } = build_routes(instance, fleet, &derived_seed)?;

        let total_distance: f64 = routes.iter().map(|route| route.distance).sum();
        let vehicles_used = routes.iter().filter(|route| !route.is_empty()).count();
        let feasible = capacity_violations == 0.0;

        let mut runtime_rng = SeededRng::new(format!("{derived_seed}-runtime"));
        let runtime_ms = (800.0 + runtime_rng.next_range(0.0, 400.0)).round() as u64;
        let gap = round_to(runtime_rng.next_range(3.0, 10.0), 2);

        let log = generate_logs(
            algorithm,
            parameters,
            runtime_ms,
            capacity_violations,
            total_demand,
            vehicles_used,
        );
        let convergence = self.generate_convergence(&mut runtime_rng, total_distance);
        let runtime_breakdown = generate_runtime_breakdown(&mut runtime_rng, runtime_ms);

        Ok(SolveResult {
            distance: round_to(total_distance, 2),
            runtime_ms,
            feasible,
            vehicles_used,
            routes,
            violations: Violations {
                capacity: capacity_violations,
            },
            log,
            convergence: Some(convergence),
            runtime_breakdown: Some(runtime_breakdown),
            gap: Some(gap),
        })
    }

    /// Starts 5-30% above `best` and drifts down by 2-5% of `best` per point.
    /// A step that would go below `best` lands in `[0.98, 1.01) * best`.
    fn generate_convergence(&self, rng: &mut SeededRng, best: f64) -> Vec<ConvergencePoint> {
        let mut current = best * rng.next_range(1.05, 1.3);

        (1..=self.params.convergence_points)
            .map(|point| {
                current -= rng.next_range(best * 0.02, best * 0.05);
                if current < best {
                    current = best * rng.next_range(0.98, 1.01);
                }

                ConvergencePoint {
                    iteration: point * self.params.convergence_iteration_step,
                    best_distance: round_to(current, 2),
                }
            })
            .collect()
    }
}

/// First-fit assignment over a shuffled customer order. A customer no vehicle
/// can take goes to a random vehicle and the excess load is counted as a
/// capacity violation.
fn build_routes(
    instance: &ProblemInstance,
    fleet: &Fleet,
    derived_seed: &str,
) -> Result<ConstructedRoutes> {
    let mut rng = SeededRng::new(format!("{derived_seed}-routes"));

    let mut routes: Vec<RoutePlan> = fleet
        .vehicles()
        .iter()
        .enumerate()
        .map(|(index, vehicle)| {
            RoutePlan::empty(
                vehicle.id,
                Some(ROUTE_COLORS[index % ROUTE_COLORS.len()].to_owned()),
            )
        })
        .collect();

    let shuffled = rng.shuffle(&instance.customers)?;
    let mut total_demand = 0.0;
    let mut capacity_violations = 0.0;

    for customer in &shuffled {
        total_demand += customer.demand;

        let first_fit = fleet
            .vehicles()
            .iter()
            .zip(&routes)
            .position(|(vehicle, route)| {
                route.load + customer.demand <= f64::from(vehicle.capacity)
            });
        let index = first_fit.unwrap_or_else(|| rng.next_int(routes.len()));

        let capacity = f64::from(fleet.vehicles()[index].capacity);
        let route = &mut routes[index];
        let load = route.load + customer.demand;

        // Counts only the excess above both the capacity and the previous
        // load: two customers of 10 on a vehicle of capacity 5 add up to 15.
        if load > capacity {
            capacity_violations += load - route.load.max(capacity);
        }

        route.push_customer(customer.id);
        route.load = load;
    }

    for route in &mut routes {
        route.distance = route_distance(&route.nodes, &instance.depot, &instance.customers);
    }

    Ok(ConstructedRoutes {
        routes,
        total_demand,
        capacity_violations,
    })
}

fn generate_logs(
    algorithm: AlgorithmId,
    parameters: &AlgorithmParameters,
    runtime_ms: u64,
    capacity_violations: f64,
    total_demand: f64,
    vehicles_used: usize,
) -> Vec<String> {
    let parameter_summary = parameters
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!("[{}] Running {}", Timestamp::now(), algorithm.name()),
        format!(
            "Parameters -> {}",
            if parameter_summary.is_empty() {
                "default settings"
            } else {
                &parameter_summary
            }
        ),
        format!("Total demand assigned: {total_demand:.0} units across {vehicles_used} vehicles"),
        if capacity_violations > 0.0 {
            format!("Capacity violations detected: {capacity_violations:.0} units over capacity")
        } else {
            String::from("Solution is capacity-feasible")
        },
        format!("Runtime: {:.2}s", runtime_ms as f64 / 1000.0),
    ]
}

/// Splits `runtime_ms` over the fixed stages by random weights. Each share is
/// rounded on its own, so the sum may be off by a millisecond or two.
fn generate_runtime_breakdown(rng: &mut SeededRng, runtime_ms: u64) -> Vec<RuntimeSlice> {
    let weights: Vec<f64> = RUNTIME_STAGES
        .iter()
        .map(|_| rng.next_range(0.8, 2.0))
        .collect();
    let total_weight: f64 = weights.iter().sum();

    RUNTIME_STAGES
        .iter()
        .zip(&weights)
        .map(|(label, weight)| RuntimeSlice {
            label: (*label).to_owned(),
            ms: (weight / total_weight * runtime_ms as f64).round() as u64,
        })
        .collect()
}

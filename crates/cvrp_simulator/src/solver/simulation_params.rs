use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct SimulationParams {
    /// Time `solve` waits before reporting, to mimic a running solver.
    pub latency: SignedDuration,
    pub convergence_points: u32,
    pub convergence_iteration_step: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            latency: SignedDuration::from_secs(1),
            convergence_points: 10,
            convergence_iteration_step: 10,
        }
    }
}

impl SimulationParams {
    pub fn without_latency() -> Self {
        Self {
            latency: SignedDuration::ZERO,
            ..Self::default()
        }
    }
}

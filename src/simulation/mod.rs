// src/simulation/mod.rs

//! Runs Grover searches over an owned amplitude vector.
//! This module contains the `Simulator` entry point and the `GroverEngine`
//! state machine that evolves the register through superposition, iteration
//! and measurement.

mod config;
mod results;
pub mod engine;

pub use config::{RunRequest, SimulatorConfig};
pub use engine::{EngineState, GroverEngine, optimal_iterations};
pub use results::{OutcomeDistribution, RunReport};

use crate::core::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

/// Runs one search and returns the sampled outcome counts.
///
/// # Arguments
/// * `register_size` - Number of qubits `n`.
/// * `marked_value` - The hidden value, in `[0, 2^n)`.
/// * `shots` - Independent samples drawn from the final state.
/// * `iteration_override` - Oracle/diffusion rounds to apply instead of `floor(π/4 · √N)`.
/// * `rng` - Source of randomness for sampling.
///
/// # Returns
/// * `Ok(OutcomeDistribution)` whose counts sum to `shots`.
/// * `Err(GroverError)` for invalid inputs, raised before any amplitude is allocated.
pub fn run<R: Rng + ?Sized>(
    register_size: usize,
    marked_value: usize,
    shots: usize,
    iteration_override: Option<usize>,
    rng: &mut R,
) -> Result<OutcomeDistribution> {
    let request = RunRequest {
        register_size,
        marked_value,
        shots,
        iteration_override,
    };
    request.validate()?;

    let mut engine = GroverEngine::new(register_size, marked_value)?;
    if let Some(iterations) = iteration_override {
        engine = engine.with_iterations(iterations)?;
    }
    engine.run(shots, rng)
}

/// The main simulator: validates requests and drives a `GroverEngine` per run.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with the given settings.
    ///
    /// # Errors
    /// `InvalidConfig` when the settings fail validation.
    pub fn with_config(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings every run of this simulator uses.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `request` with an `StdRng` seeded from the config, so equal seeds give equal reports.
    pub fn run(&self, request: &RunRequest) -> Result<RunReport> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with_rng(request, &mut rng)
    }

    /// Runs `request` drawing samples from `rng`.
    ///
    /// Every input is validated before the amplitude vector is allocated.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, request: &RunRequest, rng: &mut R) -> Result<RunReport> {
        request.validate()?;

        let mut engine = GroverEngine::new(request.register_size, request.marked_value)?;
        if let Some(iterations) = request.iteration_override {
            engine = engine.with_iterations(iterations)?;
        }
        if self.config.validate_each_step {
            engine = engine.with_step_validation(self.config.norm_tolerance);
        }

        engine.superpose()?;
        engine.iterate()?;
        let success_probability = engine.success_probability();
        let distribution = engine.measure(request.shots, rng)?;

        let report = RunReport {
            request: request.clone(),
            iterations: engine.iterations(),
            success_probability,
            distribution,
        };
        info!(
            register_size = request.register_size,
            marked_value = request.marked_value,
            iterations = report.iterations,
            success_probability,
            observed = report.observed_success_rate(),
            "grover run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroverError, MAX_REGISTER_SIZE};

    #[test]
    fn test_simulator_finds_marked_value() -> Result<()> {
        let simulator = Simulator::with_config(SimulatorConfig::strict())?;
        for marked in 0..16 {
            let report = simulator.run(&RunRequest::new(4, marked, 512))?;
            assert_eq!(report.iterations, 3);
            assert_eq!(report.distribution.total_shots(), 512);
            assert!(report.found_marked_value(), "marked {} not found:\n{}", marked, report);
        }
        Ok(())
    }

    #[test]
    fn test_seeded_runs_are_reproducible() -> Result<()> {
        let request = RunRequest::new(5, 19, 2048).with_iterations(2);
        let a = Simulator::with_config(SimulatorConfig::default().with_seed(7))?.run(&request)?;
        let b = Simulator::with_config(SimulatorConfig::default().with_seed(7))?.run(&request)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_invalid_requests_fail_fast() {
        let simulator = Simulator::new();
        assert_eq!(
            simulator.run(&RunRequest::new(MAX_REGISTER_SIZE + 1, 0, 1)).unwrap_err(),
            GroverError::InvalidRegisterSize { requested: MAX_REGISTER_SIZE + 1, maximum: MAX_REGISTER_SIZE }
        );
        assert!(matches!(
            simulator.run(&RunRequest::new(2, 4, 1)),
            Err(GroverError::MarkedValueOutOfRange { marked_value: 4, dimension: 4 })
        ));
        assert!(matches!(
            simulator.run(&RunRequest::new(2, 3, 0)),
            Err(GroverError::InvalidShotCount { shots: 0 })
        ));
    }

    #[test]
    fn test_free_run_honours_override() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        // k = 0 leaves the uniform distribution, so every outcome should appear
        let dist = run(3, 5, 4000, Some(0), &mut rng)?;
        assert_eq!(dist.total_shots(), 4000);
        assert!((0..8).all(|i| dist.count(i) > 0));
        assert!(run(0, 0, 10, None, &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn test_free_run_checks_inputs_in_request_order() {
        let mut rng = StdRng::seed_from_u64(0);
        // Every input is bad: the register size is reported first
        assert!(matches!(run(0, 0, 0, None, &mut rng), Err(GroverError::InvalidRegisterSize { requested: 0, .. })));
        assert!(matches!(
            run(2, 4, 0, None, &mut rng),
            Err(GroverError::MarkedValueOutOfRange { marked_value: 4, dimension: 4 })
        ));
        assert!(matches!(run(2, 3, 0, Some(1), &mut rng), Err(GroverError::InvalidShotCount { shots: 0 })));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = SimulatorConfig { norm_tolerance: -1.0, ..Default::default() };
        assert!(matches!(Simulator::with_config(config), Err(GroverError::InvalidConfig { .. })));
    }
}

// src/experiment/mod.rs

//! Iteration sweeps: the same search run for a range of iteration counts, to
//! show the success probability rising towards `K` and falling past it.

use crate::core::Result;
use crate::core::constants::grover_constants::DEFAULT_SEED;
use crate::simulation::{GroverEngine, OutcomeDistribution, RunRequest, optimal_iterations};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One sweep: fixed register, marked value and shots, several iteration counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSweep {
    /// Number of qubits `n`.
    pub register_size: usize,
    /// The hidden value, in `[0, 2^n)`.
    pub marked_value: usize,
    /// Samples drawn at every point.
    pub shots: usize,
    /// Iteration counts to evaluate. Duplicates are run once.
    pub iterations: Vec<usize>,
    /// Base seed; each point derives its own stream from it (see [`IterationSweep::point_seed`]).
    pub seed: u64,
}

/// Result of one iteration count within a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Oracle/diffusion rounds applied.
    pub iterations: usize,
    /// `|a_m|²` before sampling.
    pub exact_probability: f64,
    /// Fraction of shots that hit the marked value.
    pub observed_probability: f64,
    /// Sampled outcomes at this point.
    pub distribution: OutcomeDistribution,
}

impl SweepPoint {
    /// True when this point applied more rounds than the optimum.
    pub fn is_over_rotated(&self, optimal: usize) -> bool {
        self.iterations > optimal
    }
}

impl IterationSweep {
    /// Sweep over an explicit list of iteration counts, seeded with `DEFAULT_SEED`.
    pub fn new(register_size: usize, marked_value: usize, shots: usize, iterations: Vec<usize>) -> Self {
        Self {
            register_size,
            marked_value,
            shots,
            iterations,
            seed: DEFAULT_SEED,
        }
    }

    /// Sweeps `0..=max(2K, 3)`: enough to show the rise, the peak at `K` and the decline.
    pub fn around_optimal(register_size: usize, marked_value: usize, shots: usize) -> Self {
        let upper = (2 * optimal_iterations(register_size)).max(3);
        Self::new(register_size, marked_value, shots, (0..=upper).collect())
    }

    /// Same sweep with a different base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// `floor(π/4 · √N)` for this sweep's register.
    pub fn optimal(&self) -> usize {
        optimal_iterations(self.register_size)
    }

    /// Runs every point in parallel and returns them ordered by iteration count.
    ///
    /// Each point owns its engine and RNG, so results do not depend on scheduling.
    ///
    /// # Errors
    /// The first input error, raised before any point runs, in the order
    /// register size, marked value, shots.
    pub fn run(&self) -> Result<Vec<SweepPoint>> {
        RunRequest::new(self.register_size, self.marked_value, self.shots).validate()?;

        let mut counts = self.iterations.clone();
        counts.sort_unstable();
        counts.dedup();

        counts
            .into_par_iter()
            .map(|k| self.run_point(k))
            .collect::<Result<Vec<_>>>()
    }

    /// Seed of the point with `iterations` rounds: `seed ^ (iterations · φ64)`.
    ///
    /// Point 0 uses the base seed itself.
    pub fn point_seed(&self, iterations: usize) -> u64 {
        self.seed ^ (iterations as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn run_point(&self, iterations: usize) -> Result<SweepPoint> {
        let mut rng = StdRng::seed_from_u64(self.point_seed(iterations));
        let mut engine = GroverEngine::new(self.register_size, self.marked_value)?.with_iterations(iterations)?;
        engine.superpose()?;
        engine.iterate()?;
        let exact_probability = engine.success_probability();
        let distribution = engine.measure(self.shots, &mut rng)?;
        let observed_probability = distribution.frequency(self.marked_value);

        debug!(iterations, exact_probability, observed_probability, "sweep point");
        Ok(SweepPoint {
            iterations,
            exact_probability,
            observed_probability,
            distribution,
        })
    }
}

impl fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={:>3}  P(marked) exact={:.4} observed={:.4}",
            self.iterations, self.exact_probability, self.observed_probability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GroverError;

    #[test]
    fn test_around_optimal_range() {
        assert_eq!(IterationSweep::around_optimal(3, 5, 10).iterations, vec![0, 1, 2, 3, 4]);
        assert_eq!(IterationSweep::around_optimal(1, 0, 10).iterations, vec![0, 1, 2, 3]);
        assert_eq!(IterationSweep::around_optimal(4, 0, 10).iterations.len(), 7);
    }

    #[test]
    fn test_sweep_rises_then_falls() -> Result<()> {
        let sweep = IterationSweep::around_optimal(3, 5, 4096).with_seed(42);
        let points = sweep.run()?;
        let k: Vec<usize> = points.iter().map(|p| p.iterations).collect();
        assert_eq!(k, vec![0, 1, 2, 3, 4]);

        assert!((points[0].exact_probability - 0.125).abs() < 1e-9);
        assert!((points[1].exact_probability - 0.78125).abs() < 1e-9);
        assert!(points[2].exact_probability > 0.94);
        assert!(points[3].exact_probability < points[2].exact_probability);
        assert!(points[3].is_over_rotated(sweep.optimal()));
        assert!(!points[2].is_over_rotated(sweep.optimal()));
        Ok(())
    }

    #[test]
    fn test_sweep_is_deterministic_and_deduplicated() -> Result<()> {
        let sweep = IterationSweep::new(4, 9, 1000, vec![3, 1, 3, 0]).with_seed(5);
        let first = sweep.run()?;
        let second = sweep.run()?;
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        Ok(())
    }

    #[test]
    fn test_point_seeds_do_not_alias_across_base_seeds() {
        let base = IterationSweep::new(3, 5, 10, vec![]).with_seed(40);
        let next = base.clone().with_seed(41);
        for k in 1..64 {
            assert_ne!(base.point_seed(k), next.point_seed(k - 1), "k={}", k);
            assert_ne!(base.point_seed(k), base.point_seed(k - 1));
        }
        assert_eq!(base.point_seed(0), 40);
    }

    #[test]
    fn test_sweep_reports_register_before_shots() {
        assert!(matches!(
            IterationSweep::new(0, 0, 0, vec![1]).run(),
            Err(GroverError::InvalidRegisterSize { requested: 0, .. })
        ));
    }

    #[test]
    fn test_sweep_rejects_bad_inputs() {
        assert!(matches!(
            IterationSweep::new(3, 9, 10, vec![1]).run(),
            Err(GroverError::MarkedValueOutOfRange { .. })
        ));
        assert!(matches!(
            IterationSweep::new(3, 1, 0, vec![1]).run(),
            Err(GroverError::InvalidShotCount { shots: 0 })
        ));
    }
}

// src/simulation/engine.rs
use crate::circuits::{Diffusion, Oracle, Unitary};
use crate::core::constants::grover_constants::PI;
use crate::core::{AmplitudeVector, GroverError, Result};
use crate::simulation::OutcomeDistribution;
use crate::validation::check_normalization;
use rand::Rng;
use std::fmt;
use tracing::{debug, trace, warn};

/// Optimal number of Grover iterations for an `n`-qubit register with one marked value.
///
/// `K = floor(π/4 · √N)` with `N = 2^n`: 1 for `n = 1, 2`, 2 for `n = 3`, 3 for `n = 4`.
pub fn optimal_iterations(num_qubits: usize) -> usize {
    let dimension = 2f64.powi(num_qubits as i32);
    (PI / 4.0 * dimension.sqrt()).floor().max(0.0) as usize
}

/// Lifecycle of a [`GroverEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Register still in `|0...0>`.
    Uninitialized,
    /// Equal superposition prepared, no iteration applied yet.
    Superposed,
    /// `completed` of `total` oracle/diffusion rounds applied.
    Iterating {
        /// Rounds applied so far.
        completed: usize,
        /// Rounds planned for this run.
        total: usize,
    },
    /// Outcomes have been sampled; the engine accepts no further steps.
    Measured,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Uninitialized => write!(f, "Uninitialized"),
            EngineState::Superposed => write!(f, "Superposed"),
            EngineState::Iterating { completed, total } => write!(f, "Iterating({} of {})", completed, total),
            EngineState::Measured => write!(f, "Measured"),
        }
    }
}

/// Runs Grover's search for one marked value over an owned amplitude vector.
///
/// Drives the state machine
/// `Uninitialized -> Superposed -> Iterating(k of K) -> Measured`; every
/// transition is an explicit call so intermediate states can be inspected.
#[derive(Debug, Clone)]
pub struct GroverEngine {
    state: AmplitudeVector,
    oracle: Oracle,
    diffusion: Diffusion,
    iterations: usize,
    phase: EngineState,
    /// Norm tolerance checked after every step, `None` to skip checks.
    step_validation: Option<f64>,
}

impl GroverEngine {
    /// Prepares an engine in `|0...0>` with the optimal iteration count.
    ///
    /// Inputs are validated before the amplitude vector is allocated.
    ///
    /// # Errors
    /// `InvalidRegisterSize` or `MarkedValueOutOfRange`.
    pub fn new(num_qubits: usize, marked_value: usize) -> Result<Self> {
        let oracle = Oracle::new(num_qubits, marked_value)?;
        let diffusion = Diffusion::new(num_qubits)?;
        let state = AmplitudeVector::new(num_qubits)?;
        let iterations = optimal_iterations(num_qubits);

        debug!(num_qubits, marked_value, iterations, "grover engine initialized");
        Ok(Self {
            state,
            oracle,
            diffusion,
            iterations,
            phase: EngineState::Uninitialized,
            step_validation: None,
        })
    }

    /// Replaces the iteration count.
    ///
    /// # Errors
    /// `InvalidStateTransition` once the engine has left `Uninitialized`.
    pub fn with_iterations(mut self, iterations: usize) -> Result<Self> {
        if self.phase != EngineState::Uninitialized {
            return Err(GroverError::transition(self.phase, "override iterations"));
        }
        let optimal = optimal_iterations(self.state.num_qubits());
        if iterations > 2 * optimal.max(1) {
            warn!(iterations, optimal, "iteration count far past the optimum, success probability will oscillate");
        }
        self.iterations = iterations;
        Ok(self)
    }

    /// Checks normalisation within `tolerance` after superposition and every oracle/diffusion.
    pub fn with_step_validation(mut self, tolerance: f64) -> Self {
        self.step_validation = Some(tolerance);
        self
    }

    /// Current amplitudes.
    pub fn state(&self) -> &AmplitudeVector {
        &self.state
    }

    /// Current lifecycle state.
    pub fn phase(&self) -> EngineState {
        self.phase
    }

    /// Planned number of oracle/diffusion rounds.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Rounds applied so far.
    pub fn completed_iterations(&self) -> usize {
        match self.phase {
            EngineState::Iterating { completed, .. } => completed,
            EngineState::Measured => self.iterations,
            _ => 0,
        }
    }

    /// Register size.
    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// The hidden value the oracle marks.
    pub fn marked_value(&self) -> usize {
        self.oracle.marked_value()
    }

    /// The oracle in use.
    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// The diffusion operator in use.
    pub fn diffusion(&self) -> &Diffusion {
        &self.diffusion
    }

    /// Exact probability of measuring the marked value in the current state.
    pub fn success_probability(&self) -> f64 {
        self.state.amplitudes()[self.oracle.marked_value()].norm_sqr()
    }

    /// `Uninitialized -> Superposed`: Hadamard on every bit position.
    pub fn superpose(&mut self) -> Result<()> {
        if self.phase != EngineState::Uninitialized {
            return Err(GroverError::transition(self.phase, "superpose"));
        }
        self.state.apply_hadamard_all()?;
        self.check_step()?;
        self.phase = EngineState::Superposed;
        debug!(dimension = self.state.dim(), "equal superposition prepared");
        Ok(())
    }

    /// Applies one oracle followed by one diffusion.
    ///
    /// # Errors
    /// `InvalidStateTransition` before superposition, after measurement, or once
    /// all planned iterations have run.
    pub fn step(&mut self) -> Result<()> {
        let completed = match self.phase {
            EngineState::Superposed => 0,
            EngineState::Iterating { completed, total } if completed < total => completed,
            _ => return Err(GroverError::transition(self.phase, "step")),
        };
        if completed >= self.iterations {
            return Err(GroverError::transition(self.phase, "step"));
        }

        self.oracle.apply(&mut self.state)?;
        self.check_step()?;
        self.diffusion.apply(&mut self.state)?;
        self.check_step()?;

        let completed = completed + 1;
        self.phase = EngineState::Iterating {
            completed,
            total: self.iterations,
        };
        trace!(completed, total = self.iterations, p_marked = self.success_probability(), "grover iteration");
        Ok(())
    }

    /// Runs every remaining iteration.
    pub fn iterate(&mut self) -> Result<()> {
        while self.completed_iterations() < self.iterations {
            self.step()?;
        }
        Ok(())
    }

    /// `Iterating -> Measured`: draws `shots` independent samples of the final state.
    ///
    /// The amplitudes are left in place for inspection; sampling does not collapse them.
    ///
    /// # Errors
    /// `InvalidShotCount` for zero shots, `InvalidStateTransition` unless all planned
    /// iterations have run.
    pub fn measure<R: Rng + ?Sized>(&mut self, shots: usize, rng: &mut R) -> Result<OutcomeDistribution> {
        if shots == 0 {
            return Err(GroverError::InvalidShotCount { shots });
        }
        let ready = match self.phase {
            EngineState::Superposed => self.iterations == 0,
            EngineState::Iterating { completed, total } => completed == total,
            _ => false,
        };
        if !ready {
            return Err(GroverError::transition(self.phase, "measure"));
        }

        let sampler = self.state.sampler()?;
        let mut distribution = OutcomeDistribution::new(self.state.num_qubits());
        for _ in 0..shots {
            distribution.record(sampler.draw(rng));
        }

        self.phase = EngineState::Measured;
        debug!(
            shots,
            hits = distribution.count(self.oracle.marked_value()),
            "measurement sampled"
        );
        Ok(distribution)
    }

    /// Drives the full lifecycle: superpose, iterate, measure.
    pub fn run<R: Rng + ?Sized>(&mut self, shots: usize, rng: &mut R) -> Result<OutcomeDistribution> {
        if shots == 0 {
            return Err(GroverError::InvalidShotCount { shots });
        }
        self.superpose()?;
        self.iterate()?;
        self.measure(shots, rng)
    }

    fn check_step(&self) -> Result<()> {
        match self.step_validation {
            Some(tolerance) => check_normalization(&self.state, tolerance),
            None => Ok(()),
        }
    }
}

// src/lib.rs

//! `grover_sim` - A statevector simulator for Grover's search algorithm
//!
//! An `n`-qubit register is held as `2^n` complex amplitudes. Bit position 0 is the
//! least significant bit, so the amplitude index equals the integer value of the
//! register; bitstrings are displayed most significant bit first.
//!
//! A run prepares the equal superposition, applies `floor(π/4 · √N)` rounds of
//! oracle (sign flip on the marked value) and diffusion (inversion about the mean),
//! then samples the final state.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod experiment;

// Re-export the most common types for easier top-level use
pub use crate::core::{AmplitudeVector, GroverError, Qubit, Result};
pub use operations::Gate;
pub use circuits::{Diffusion, Oracle, Unitary};
pub use simulation::{
    EngineState, GroverEngine, OutcomeDistribution, RunReport, RunRequest, Simulator, SimulatorConfig,
    optimal_iterations, run,
};
pub use validation::{check_normalization, max_amplitude_deviation, validate_state};
pub use experiment::{IterationSweep, SweepPoint};

// Example 1: Searching eight entries for |101>
// Two oracle/diffusion rounds lift the marked probability from 1/8 to about 0.945.
/// ```
/// use grover_sim::{RunRequest, Simulator, GroverError};
///
/// let simulator = Simulator::new();
/// match simulator.run(&RunRequest::new(3, 5, 2048)) {
///     Ok(report) => {
///         println!("{}", report);
///         assert_eq!(report.iterations, 2);
///         assert!(report.success_probability > 0.94);
///         assert_eq!(report.distribution.most_frequent().map(|(index, _)| index), Some(5));
///         assert_eq!(report.distribution.bitstring(5), "101");
///     }
///     Err(e) => {
///         eprintln!("Example 1 failed: {}", e);
///         assert!(false, "Example 1 failed"); // Force test failure
///     }
/// }
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Stepping the engine by hand
// Each call is one explicit state transition; the exact probability can be read in between.
/// ```
/// use grover_sim::{EngineState, GroverEngine, GroverError};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut engine = GroverEngine::new(4, 9)?;
/// engine.superpose()?;
/// let mut previous = engine.success_probability();
/// while engine.completed_iterations() < engine.iterations() {
///     engine.step()?;
///     assert!(engine.success_probability() > previous); // still below the optimum
///     previous = engine.success_probability();
/// }
/// assert_eq!(engine.phase(), EngineState::Iterating { completed: 3, total: 3 });
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let counts = engine.measure(100, &mut rng)?;
/// assert_eq!(counts.total_shots(), 100);
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

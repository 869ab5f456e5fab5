// src/operations/mod.rs

//! Gate primitives and the in-place kernels that apply them.
//!
//! Only the gates Grover's algorithm needs are provided: Hadamard and bit-flip on
//! one bit position, a multi-controlled bit-flip, and a global phase. The
//! multi-controlled phase inversion used by the oracle and diffusion operators is
//! composed from these (see [`multi_controlled_z`]).

use crate::core::{AmplitudeVector, GroverError, Qubit, Result};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// 2x2 unitary acting on the `{|0>, |1>}` amplitudes of one bit position.
type Matrix2 = [[Complex<f64>; 2]; 2];

/// A primitive gate acting on the full amplitude vector.
#[derive(Debug, Clone, PartialEq)] // f64 phase: no Eq
pub enum Gate {
    /// Hadamard on one bit position.
    Hadamard {
        /// Bit position to transform.
        target: Qubit,
    },

    /// Bit-flip (Pauli X) on one bit position.
    BitFlip {
        /// Bit position to flip.
        target: Qubit,
    },

    /// Flips `target` on every basis index whose control bits are all 1.
    ///
    /// With no controls this is a plain bit-flip.
    MultiControlledX {
        /// Bit positions that must all read 1.
        controls: Vec<Qubit>,
        /// Bit position flipped when the controls are satisfied.
        target: Qubit,
    },

    /// Multiplies every amplitude by `e^(iθ)`.
    ///
    /// Unobservable in probabilities but needed to make composed reflections
    /// agree with their textbook sign.
    GlobalPhase {
        /// Phase angle in radians.
        theta: f64,
    },
}

impl Gate {
    /// Every bit position addressed by the gate.
    pub fn qubits(&self) -> Vec<Qubit> {
        match self {
            Gate::Hadamard { target } | Gate::BitFlip { target } => vec![*target],
            Gate::MultiControlledX { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Gate::GlobalPhase { .. } => Vec::new(),
        }
    }

    /// Applies the gate to `state` in place.
    ///
    /// Every addressed bit position is validated before any amplitude changes, so
    /// a failed call leaves the state untouched.
    ///
    /// # Errors
    /// `InvalidQubitIndex` if a position lies outside `[0, n)` or a control
    /// coincides with the target.
    pub fn apply(&self, state: &mut AmplitudeVector) -> Result<()> {
        let num_qubits = state.num_qubits();
        for q in self.qubits() {
            if q.index() >= num_qubits {
                return Err(GroverError::qubit_index(self, q.index(), num_qubits));
            }
        }

        match self {
            Gate::Hadamard { target } => {
                apply_single_qubit_gate(state.amplitudes_mut(), *target, &hadamard_matrix());
            }
            Gate::BitFlip { target } => {
                apply_single_qubit_gate(state.amplitudes_mut(), *target, &bit_flip_matrix());
            }
            Gate::MultiControlledX { controls, target } => {
                if controls.contains(target) {
                    return Err(GroverError::qubit_index(self, target.index(), num_qubits));
                }
                let control_mask = controls.iter().fold(0usize, |mask, q| mask | q.mask());
                apply_multi_controlled_x(state.amplitudes_mut(), control_mask, *target);
            }
            Gate::GlobalPhase { theta } => {
                let phase = Complex::from_polar(1.0, *theta);
                for a in state.amplitudes_mut() {
                    *a *= phase;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Hadamard { target } => write!(f, "H({})", target),
            Gate::BitFlip { target } => write!(f, "X({})", target),
            Gate::MultiControlledX { controls, target } => {
                write!(f, "MCX[")?;
                for (i, c) in controls.iter().enumerate() {
                    write!(f, "{}{}", if i > 0 { "," } else { "" }, c)?;
                }
                write!(f, " -> {}]", target)
            }
            Gate::GlobalPhase { theta } => write!(f, "GP({:.4})", theta),
        }
    }
}

/// Applies `gates` to `state` in order, stopping at the first failure.
pub fn apply_gates(gates: &[Gate], state: &mut AmplitudeVector) -> Result<()> {
    for gate in gates {
        gate.apply(state)?;
    }
    Ok(())
}

/// Multi-controlled phase inversion as `H(target) · MCX(controls -> target) · H(target)`.
///
/// Negates every amplitude whose control bits and target bit all read 1 and leaves
/// the rest unchanged. This is the identity the oracle and diffusion operators
/// are built on.
pub fn multi_controlled_z(controls: &[Qubit], target: Qubit) -> Vec<Gate> {
    vec![
        Gate::Hadamard { target },
        Gate::MultiControlledX { controls: controls.to_vec(), target },
        Gate::Hadamard { target },
    ]
}

fn hadamard_matrix() -> Matrix2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn bit_flip_matrix() -> Matrix2 {
    [[Complex::zero(), Complex::one()], [Complex::one(), Complex::zero()]]
}

/// Applies a 2x2 matrix to every amplitude pair differing only at `target`.
fn apply_single_qubit_gate(amplitudes: &mut [Complex<f64>], target: Qubit, matrix: &Matrix2) {
    let k_mask = target.mask();
    let lower_mask = k_mask - 1; // bits below the target

    // Pair index i enumerates the basis states with a 0 inserted at the target bit
    for i in 0..amplitudes.len() / 2 {
        let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
        let i1 = i0 | k_mask;

        let psi_0 = amplitudes[i0];
        let psi_1 = amplitudes[i1];
        amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }
}

/// Swaps the target-0/target-1 amplitudes wherever all control bits are set.
fn apply_multi_controlled_x(amplitudes: &mut [Complex<f64>], control_mask: usize, target: Qubit) {
    let k_mask = target.mask();
    for i0 in 0..amplitudes.len() {
        if i0 & k_mask == 0 && i0 & control_mask == control_mask {
            amplitudes.swap(i0, i0 | k_mask);
        }
    }
}

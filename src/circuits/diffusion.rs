// src/circuits/diffusion.rs

use super::{Unitary, all_ones_phase_flip, fmt_gates};
use crate::core::constants::grover_constants::PI;
use crate::core::state::dimension_for;
use crate::core::{AmplitudeVector, GroverError, Qubit, Result};
use crate::operations::{Gate, apply_gates};
use std::fmt;

/// Inversion about the mean: every amplitude `a_i` becomes `2·mean(a) − a_i`.
///
/// Composed as `H^n · X^n · (all-ones phase flip) · X^n · H^n`, which equals
/// `I − 2|s><s|`, followed by a global phase of π to obtain `2|s><s| − I`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diffusion {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Diffusion {
    /// Builds the diffusion operator for an `n`-qubit register.
    pub fn new(num_qubits: usize) -> Result<Self> {
        dimension_for(num_qubits)?;

        let hadamards: Vec<Gate> = (0..num_qubits).map(|q| Gate::Hadamard { target: Qubit(q) }).collect();
        let flips: Vec<Gate> = (0..num_qubits).map(|q| Gate::BitFlip { target: Qubit(q) }).collect();

        let mut gates = Vec::with_capacity(4 * num_qubits + 4);
        gates.extend(hadamards.iter().cloned());
        gates.extend(flips.iter().cloned());
        gates.extend(all_ones_phase_flip(num_qubits));
        gates.extend(flips);
        gates.extend(hadamards);
        gates.push(Gate::GlobalPhase { theta: PI });

        Ok(Self { num_qubits, gates })
    }

    /// Register size the operator was built for.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

impl Unitary for Diffusion {
    fn apply(&self, state: &mut AmplitudeVector) -> Result<()> {
        if state.num_qubits() != self.num_qubits {
            return Err(GroverError::DimensionMismatch {
                expected: 1 << self.num_qubits,
                actual: state.dim(),
            });
        }
        apply_gates(&self.gates, state)
    }

    fn gates(&self) -> &[Gate] {
        &self.gates
    }
}

impl fmt::Display for Diffusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Diffusion(n={}): ", self.num_qubits)?;
        fmt_gates(&self.gates, f)
    }
}

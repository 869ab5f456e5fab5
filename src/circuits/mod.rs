// src/circuits/mod.rs

//! Composed unitaries for Grover's search.
//!
//! Both operators are built strictly from the primitives in
//! [`crate::operations`] and applied eagerly to an owned [`AmplitudeVector`].
//! Each keeps its gate list so that it can be inspected and logged.

pub mod diffusion;
pub mod oracle;

pub use diffusion::Diffusion;
pub use oracle::Oracle;

use crate::core::{AmplitudeVector, Qubit, Result};
use crate::operations::{Gate, multi_controlled_z};

/// A transform over the full amplitude vector.
pub trait Unitary {
    /// Applies the transform to `state` in place.
    fn apply(&self, state: &mut AmplitudeVector) -> Result<()>;

    /// The primitive gates the transform is composed of, in application order.
    fn gates(&self) -> &[Gate];
}

/// Sign flip on the all-ones basis state: `H(top) · MCX(lower bits -> top) · H(top)`.
///
/// `top` is bit `n-1`; every lower bit is a control. For `n = 1` there are no
/// controls and the sequence reduces to `H·X·H = Z`.
pub(crate) fn all_ones_phase_flip(num_qubits: usize) -> Vec<Gate> {
    let top = Qubit(num_qubits - 1);
    let controls: Vec<Qubit> = (0..num_qubits - 1).map(Qubit).collect();
    multi_controlled_z(&controls, top)
}

/// Writes a gate list as a single line, e.g. `X(q1) H(q2) MCX[q0,q1 -> q2] H(q2) X(q1)`.
pub(crate) fn fmt_gates(gates: &[Gate], f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, gate) in gates.iter().enumerate() {
        write!(f, "{}{}", if i > 0 { " " } else { "" }, gate)?;
    }
    Ok(())
}

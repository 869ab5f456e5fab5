// src/circuits/oracle.rs

use super::{Unitary, all_ones_phase_flip, fmt_gates};
use crate::core::state::dimension_for;
use crate::core::{AmplitudeVector, GroverError, Qubit, Result};
use crate::operations::{Gate, apply_gates};
use std::fmt;

/// Phase oracle marking one basis index.
///
/// Negates the amplitude at `marked_value` and leaves every other amplitude
/// unchanged, using only gate primitives:
///
/// 1. X on every bit where `marked_value` reads 0, mapping it to `|1...1>`;
/// 2. the all-ones phase flip `H(top) · MCX · H(top)`;
/// 3. the same X gates again to restore the labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Oracle {
    num_qubits: usize,
    marked_value: usize,
    gates: Vec<Gate>,
}

impl Oracle {
    /// Builds the oracle for an `n`-qubit register.
    ///
    /// # Errors
    /// `InvalidRegisterSize` for an unsupported `n`, `MarkedValueOutOfRange` if
    /// `marked_value >= 2^n`.
    pub fn new(num_qubits: usize, marked_value: usize) -> Result<Self> {
        let dimension = dimension_for(num_qubits)?;
        if marked_value >= dimension {
            return Err(GroverError::MarkedValueOutOfRange { marked_value, dimension });
        }

        let relabel: Vec<Gate> = (0..num_qubits)
            .filter(|q| (marked_value >> q) & 1 == 0)
            .map(|q| Gate::BitFlip { target: Qubit(q) })
            .collect();

        let mut gates = relabel.clone();
        gates.extend(all_ones_phase_flip(num_qubits));
        gates.extend(relabel);

        Ok(Self { num_qubits, marked_value, gates })
    }

    /// The index this oracle marks.
    pub fn marked_value(&self) -> usize {
        self.marked_value
    }

    /// Register size the oracle was built for.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

impl Unitary for Oracle {
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

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oracle(m={:0width$b}): ", self.marked_value, width = self.num_qubits)?;
        fmt_gates(&self.gates, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn superposed(num_qubits: usize) -> Result<AmplitudeVector> {
        let mut state = AmplitudeVector::new(num_qubits)?;
        state.apply_hadamard_all()?;
        Ok(state)
    }

    #[test]
    fn test_oracle_isolation_every_index() -> Result<()> {
        for n in 1..=5 {
            let before = superposed(n)?;
            for m in 0..(1usize << n) {
                let oracle = Oracle::new(n, m)?;
                let mut state = before.clone();
                oracle.apply(&mut state)?;
                for (i, (a, b)) in state.amplitudes().iter().zip(before.amplitudes()).enumerate() {
                    let expected: Complex<f64> = if i == m { -*b } else { *b };
                    assert!(
                        (a - expected).norm() < TEST_TOLERANCE,
                        "n={} m={}: index {} is {}, expected {}",
                        n, m, i, a, expected
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_oracle_gate_sequence_for_101() -> Result<()> {
        // m = 5 = 101: only bit 1 is zero, so X(q1) wraps the phase flip on q2
        let oracle = Oracle::new(3, 5)?;
        assert_eq!(oracle.to_string(), "Oracle(m=101): X(q1) H(q2) MCX[q0,q1 -> q2] H(q2) X(q1)");
        assert_eq!(oracle.gates().len(), 5);
        Ok(())
    }

    #[test]
    fn test_oracle_rejects_out_of_range_marked_value() {
        assert_eq!(
            Oracle::new(3, 8),
            Err(GroverError::MarkedValueOutOfRange { marked_value: 8, dimension: 8 })
        );
        assert!(matches!(Oracle::new(0, 0), Err(GroverError::InvalidRegisterSize { .. })));
    }

    #[test]
    fn test_oracle_rejects_foreign_register() -> Result<()> {
        let oracle = Oracle::new(2, 1)?;
        let mut state = AmplitudeVector::new(3)?;
        assert_eq!(
            oracle.apply(&mut state),
            Err(GroverError::DimensionMismatch { expected: 4, actual: 8 })
        );
        Ok(())
    }
}

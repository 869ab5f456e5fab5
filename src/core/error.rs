// src/core/error.rs

//! Error handling for register setup, gate application and sampling.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GroverError>;

/// Failures raised while building or running a Grover search.
///
/// Input errors (`InvalidRegisterSize`, `MarkedValueOutOfRange`, `InvalidShotCount`,
/// `InvalidConfig`) are reported before any amplitude is touched. The remaining
/// variants signal a broken gate composition or engine misuse and abort the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroverError {
    /// Register size is zero or too large to hold as a dense vector.
    #[error("invalid register size {requested}: must be between 1 and {maximum} qubits")]
    InvalidRegisterSize {
        /// Requested number of qubits.
        requested: usize,
        /// Largest supported register.
        maximum: usize,
    },

    /// The marked value cannot be represented in the register.
    #[error("marked value {marked_value} out of range for a search space of {dimension} states")]
    MarkedValueOutOfRange {
        /// The offending marked value.
        marked_value: usize,
        /// Search space size `2^n`.
        dimension: usize,
    },

    /// Sampling needs at least one shot.
    #[error("invalid shot count {shots}: at least one shot is required")]
    InvalidShotCount {
        /// The requested shot count.
        shots: usize,
    },

    /// A gate addressed a bit position outside the register.
    #[error("gate {gate} addresses qubit {index}, register has {num_qubits} qubits")]
    InvalidQubitIndex {
        /// Mnemonic of the offending gate.
        gate: String,
        /// Addressed bit position.
        index: usize,
        /// Register size.
        num_qubits: usize,
    },

    /// An amplitude index or vector length disagrees with the register dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension (or exclusive index bound).
        expected: usize,
        /// Dimension or index encountered.
        actual: usize,
    },

    /// The engine was asked to do something its current state does not allow.
    #[error("cannot {action} while engine is {from}")]
    InvalidStateTransition {
        /// Engine state at the time of the call.
        from: String,
        /// Attempted action.
        action: &'static str,
    },

    /// The state vector drifted away from unit norm.
    #[error("state vector norm deviated from 1: sum |a|^2 = {norm_sqr} (tolerance {tolerance})")]
    Incoherence {
        /// Measured squared norm.
        norm_sqr: f64,
        /// Allowed deviation.
        tolerance: f64,
    },

    /// A configuration field holds an unusable value.
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl GroverError {
    /// Builds an `InvalidQubitIndex` error naming the gate that caused it.
    pub(crate) fn qubit_index(gate: impl ToString, index: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex {
            gate: gate.to_string(),
            index,
            num_qubits,
        }
    }

    /// Builds an `InvalidStateTransition` error from the current engine state.
    pub(crate) fn transition(from: impl ToString, action: &'static str) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_context() {
        let err = GroverError::qubit_index("H(q7)", 7, 3);
        let msg = err.to_string();
        assert!(msg.contains("H(q7)"), "missing gate in: {}", msg);
        assert!(msg.contains('7') && msg.contains('3'));

        let err = GroverError::MarkedValueOutOfRange { marked_value: 9, dimension: 8 };
        assert!(err.to_string().contains("9"));
        assert!(err.to_string().contains("8 states"));
    }

    #[test]
    fn test_transition_error() {
        let err = GroverError::transition("Measured", "step");
        assert_eq!(err.to_string(), "cannot step while engine is Measured");
    }
}

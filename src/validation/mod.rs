// src/validation/mod.rs

//! Checks on an [`AmplitudeVector`]: normalisation and amplitude-wise comparison.

use crate::core::constants::grover_constants::NORM_TOLERANCE;
use crate::core::{AmplitudeVector, GroverError, Result};

/// Checks that the state vector is normalised (`Σ|a_i|² ≈ 1`).
///
/// # Arguments
/// * `state` - The `AmplitudeVector` to check.
/// * `tolerance` - Allowed deviation from 1.0 (e.g., 1e-9).
///
/// # Returns
/// * `Ok(())` if normalised within tolerance.
/// * `Err(GroverError::Incoherence)` otherwise.
pub fn check_normalization(state: &AmplitudeVector, tolerance: f64) -> Result<()> {
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > tolerance {
        Err(GroverError::Incoherence { norm_sqr, tolerance })
    } else {
        Ok(())
    }
}

/// Runs the standard checks with default tolerances (currently normalisation only).
pub fn validate_state(state: &AmplitudeVector) -> Result<()> {
    check_normalization(state, NORM_TOLERANCE)
}

/// Largest `|a_i − b_i|` over two states of the same register.
///
/// # Errors
/// `DimensionMismatch` if the vectors differ in length.
pub fn max_amplitude_deviation(a: &AmplitudeVector, b: &AmplitudeVector) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(GroverError::DimensionMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }
    Ok(a.amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_normalized_state_passes() -> Result<()> {
        let mut state = AmplitudeVector::new(4)?;
        state.apply_hadamard_all()?;
        validate_state(&state)
    }

    #[test]
    fn test_unnormalized_state_fails() -> Result<()> {
        let state = AmplitudeVector::from_amplitudes(1, vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)])?;
        match check_normalization(&state, 1e-9) {
            Err(GroverError::Incoherence { norm_sqr, .. }) => assert!((norm_sqr - 2.0).abs() < 1e-12),
            other => panic!("Expected Incoherence, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_max_amplitude_deviation() -> Result<()> {
        let a = AmplitudeVector::new(2)?;
        let mut b = a.clone();
        b.apply_controlled_phase_flip(0)?;
        assert!((max_amplitude_deviation(&a, &b)? - 2.0).abs() < 1e-12);
        assert!(max_amplitude_deviation(&a, &AmplitudeVector::new(3)?).is_err());
        Ok(())
    }
}

// src/simulation/config.rs
use crate::core::constants::grover_constants::{DEFAULT_SEED, NORM_TOLERANCE};
use crate::core::state::dimension_for;
use crate::core::{GroverError, Result};
use serde::{Deserialize, Serialize};

/// Simulator-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Seed for the `StdRng` each run samples from. Equal seeds give equal counts.
    pub seed: u64,
    /// Check `Σ|a|² = 1` after superposition and after every oracle/diffusion.
    pub validate_each_step: bool,
    /// Allowed deviation of the squared norm from 1 when validating.
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            validate_each_step: false,
            norm_tolerance: NORM_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    /// Config that validates normalisation after every step.
    pub fn strict() -> Self {
        Self {
            validate_each_step: true,
            ..Default::default()
        }
    }

    /// Same settings with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.norm_tolerance.is_finite() || self.norm_tolerance <= 0.0 || self.norm_tolerance >= 1.0 {
            return Err(GroverError::InvalidConfig {
                field: "norm_tolerance",
                reason: format!("must lie in (0, 1), got {}", self.norm_tolerance),
            });
        }
        Ok(())
    }
}

/// One search to run: register size, hidden value, shot count and an optional
/// explicit iteration count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Number of qubits `n`; the search space has `2^n` entries.
    pub register_size: usize,
    /// The hidden value, in `[0, 2^n)`.
    pub marked_value: usize,
    /// Independent samples drawn from the final state.
    pub shots: usize,
    /// Overrides `floor(π/4 · √N)` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_override: Option<usize>,
}

impl RunRequest {
    /// Request using the optimal iteration count.
    pub fn new(register_size: usize, marked_value: usize, shots: usize) -> Self {
        Self {
            register_size,
            marked_value,
            shots,
            iteration_override: None,
        }
    }

    /// Forces exactly `iterations` oracle/diffusion rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iteration_override = Some(iterations);
        self
    }

    /// Checks every input before any simulation work starts.
    ///
    /// # Errors
    /// `InvalidRegisterSize`, `MarkedValueOutOfRange` or `InvalidShotCount`, in that order.
    pub fn validate(&self) -> Result<()> {
        let dimension = dimension_for(self.register_size)?;
        if self.marked_value >= dimension {
            return Err(GroverError::MarkedValueOutOfRange {
                marked_value: self.marked_value,
                dimension,
            });
        }
        if self.shots == 0 {
            return Err(GroverError::InvalidShotCount { shots: self.shots });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MAX_REGISTER_SIZE;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulatorConfig::default().validate().is_ok());
        assert!(SimulatorConfig::strict().validate().is_ok());
        assert!(SimulatorConfig::strict().validate_each_step);
    }

    #[test]
    fn test_config_rejects_bad_tolerance() {
        for bad in [0.0, -1e-9, 1.0, f64::NAN, f64::INFINITY] {
            let config = SimulatorConfig { norm_tolerance: bad, ..Default::default() };
            assert!(
                matches!(config.validate(), Err(GroverError::InvalidConfig { field: "norm_tolerance", .. })),
                "tolerance {} accepted",
                bad
            );
        }
    }

    #[test]
    fn test_request_validation_order() {
        assert_eq!(
            RunRequest::new(0, 0, 10).validate(),
            Err(GroverError::InvalidRegisterSize { requested: 0, maximum: MAX_REGISTER_SIZE })
        );
        assert_eq!(
            RunRequest::new(3, 8, 10).validate(),
            Err(GroverError::MarkedValueOutOfRange { marked_value: 8, dimension: 8 })
        );
        assert_eq!(
            RunRequest::new(3, 7, 0).validate(),
            Err(GroverError::InvalidShotCount { shots: 0 })
        );
        assert!(RunRequest::new(3, 7, 1).with_iterations(0).validate().is_ok());
    }
}

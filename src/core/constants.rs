//! Numerical constants shared by the simulator.

/// Constants governing register size, tolerances and sampling defaults.
pub mod grover_constants {
    /// Used for the iteration count `floor(π/4 · √N)` and phase angles.
    pub const PI: f64 = std::f64::consts::PI;
    /// Largest register held as a dense amplitude vector (2^24 amplitudes, 256 MiB).
    pub const MAX_REGISTER_SIZE: usize = 24;
    /// Allowed deviation of `Σ|a|²` from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Squared magnitudes at or below this divided by `N` are treated as zero when sampling.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
    /// Seed used by `SimulatorConfig::default()`.
    pub const DEFAULT_SEED: u64 = 0x6_7203;
}

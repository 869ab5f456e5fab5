// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

// Re-export public types for convenient access via `grover_sim::core::TypeName`
pub use error::{GroverError, Result};
pub use qubit::Qubit;
pub use state::{AmplitudeVector, MeasurementSampler};

pub mod constants;
pub use constants::grover_constants::{DEFAULT_SEED, MAX_REGISTER_SIZE, NORM_TOLERANCE, PI};

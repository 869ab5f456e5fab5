// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::fmt;

use super::constants::grover_constants::{AMPLITUDE_TOLERANCE, MAX_REGISTER_SIZE};
use super::error::{GroverError, Result};
use super::qubit::Qubit;
use crate::operations::Gate;

/// Dense pure state of an `n`-qubit register.
///
/// Holds `N = 2^n` complex amplitudes. The amplitude at index `i` belongs to the
/// basis configuration whose bit `q` is `(i >> q) & 1` (bit 0 is least significant),
/// so the index equals the integer value of the register.
///
/// Every operation that mutates the vector does so in place and is unitary, so
/// `Σ|a_i|² = 1` holds between calls.
#[derive(Debug, Clone, PartialEq)] // No Eq for floating-point amplitudes
pub struct AmplitudeVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl AmplitudeVector {
    /// Creates the canonical `|0...0>` state: amplitude 1 at index 0, 0 elsewhere.
    ///
    /// # Errors
    /// `InvalidRegisterSize` if `num_qubits` is 0 or above `MAX_REGISTER_SIZE`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dim = dimension_for(num_qubits)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Ok(Self { amplitudes, num_qubits })
    }

    /// Wraps an explicit amplitude vector, e.g. a prepared test state.
    ///
    /// The vector is taken as is; normalisation is the caller's concern and can be
    /// checked with [`crate::validation::check_normalization`].
    ///
    /// # Errors
    /// `InvalidRegisterSize` for an unsupported register, `DimensionMismatch` when
    /// `amplitudes.len() != 2^num_qubits`.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let dim = dimension_for(num_qubits)?;
        if amplitudes.len() != dim {
            return Err(GroverError::DimensionMismatch {
                expected: dim,
                actual: amplitudes.len(),
            });
        }
        Ok(Self { amplitudes, num_qubits })
    }

    /// Number of qubits `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes `N = 2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable view for the gate kernels.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Amplitude at `index`.
    pub fn amplitude(&self, index: usize) -> Result<Complex<f64>> {
        self.check_index(index)?;
        Ok(self.amplitudes[index])
    }

    /// Measurement probability `|a_index|²`.
    pub fn probability(&self, index: usize) -> Result<f64> {
        Ok(self.amplitude(index)?.norm_sqr())
    }

    /// `|a_i|²` for every basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// `Σ|a_i|²`; 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Applies H to every bit position.
    ///
    /// This is the full `N×N` Walsh-Hadamard transform; from `|0...0>` it yields
    /// the equal superposition with every amplitude `1/√N`.
    pub fn apply_hadamard_all(&mut self) -> Result<()> {
        for q in 0..self.num_qubits {
            Gate::Hadamard { target: Qubit(q) }.apply(self)?;
        }
        Ok(())
    }

    /// Negates the amplitude at exactly `target_index`, leaving all others unchanged.
    ///
    /// # Errors
    /// `DimensionMismatch` if `target_index >= N`.
    pub fn apply_controlled_phase_flip(&mut self, target_index: usize) -> Result<()> {
        self.check_index(target_index)?;
        let a = &mut self.amplitudes[target_index];
        *a = -*a;
        Ok(())
    }

    /// Draws one basis index with probability `|a_i|²` from the supplied random source.
    ///
    /// Outcomes with `|a_i|² ≤ AMPLITUDE_TOLERANCE / N` are treated as exactly zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        Ok(self.sampler()?.draw(rng))
    }

    /// Builds a reusable sampler over the current distribution.
    ///
    /// Use this when drawing many shots: the cumulative table is built once and
    /// every draw is a binary search. Same `AMPLITUDE_TOLERANCE / N` cut-off as [`Self::sample`].
    ///
    /// # Errors
    /// `Incoherence` if the vector carries (numerically) no probability mass.
    pub fn sampler(&self) -> Result<MeasurementSampler> {
        MeasurementSampler::new(&self.probabilities())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.amplitudes.len() {
            return Err(GroverError::DimensionMismatch {
                expected: self.amplitudes.len(),
                actual: index,
            });
        }
        Ok(())
    }
}

impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Validates a register size and returns `2^n`.
pub(crate) fn dimension_for(num_qubits: usize) -> Result<usize> {
    if num_qubits == 0 || num_qubits > MAX_REGISTER_SIZE {
        return Err(GroverError::InvalidRegisterSize {
            requested: num_qubits,
            maximum: MAX_REGISTER_SIZE,
        });
    }
    Ok(1usize << num_qubits)
}

/// Cumulative probability table for repeated measurement sampling.
#[derive(Debug, Clone)]
pub struct MeasurementSampler {
    cumulative: Vec<f64>,
    total: f64,
    /// Last index carrying non-negligible probability; fallback for draws that
    /// land on `total` through rounding.
    last_nonzero: usize,
}

impl MeasurementSampler {
    fn new(probabilities: &[f64]) -> Result<Self> {
        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut total = 0.0;
        let mut last_nonzero = None;
        // Rounding residue on cancelled amplitudes must never be drawn
        let cutoff = AMPLITUDE_TOLERANCE / probabilities.len() as f64;
        for (i, &p) in probabilities.iter().enumerate() {
            if p > cutoff {
                total += p;
                last_nonzero = Some(i);
            }
            cumulative.push(total);
        }

        match last_nonzero {
            Some(last_nonzero) => Ok(Self { cumulative, total, last_nonzero }),
            None => Err(GroverError::Incoherence {
                norm_sqr: total,
                tolerance: cutoff,
            }),
        }
    }

    /// Draws one basis index.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = StandardUniform.sample(rng);
        let target = u * self.total;
        let index = self.cumulative.partition_point(|&c| c <= target);
        index.min(self.last_nonzero)
    }
}

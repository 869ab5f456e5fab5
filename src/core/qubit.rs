// src/core/qubit.rs

use std::fmt;

/// A bit position inside the register.
///
/// Position 0 is the least-significant bit of a basis index, so the amplitude
/// at index `i` describes the configuration whose qubit `q` reads `(i >> q) & 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit(pub usize);

impl Qubit {
    /// Gets the bit position.
    pub fn index(&self) -> usize {
        self.0
    }

    /// Mask selecting this qubit's bit in a basis index.
    pub fn mask(&self) -> usize {
        1usize << self.0
    }
}

impl From<usize> for Qubit {
    fn from(index: usize) -> Self {
        Qubit(index)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

// src/simulation/results.rs
use super::config::RunRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Observed counts per basis index over a fixed number of shots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    num_qubits: usize,
    shots: usize,
    /// Only indices that were observed at least once are present.
    counts: BTreeMap<usize, usize>,
}

impl OutcomeDistribution {
    /// Creates an empty distribution. (Internal visibility)
    pub(crate) fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            shots: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Records one observed outcome. (Internal visibility)
    pub(crate) fn record(&mut self, index: usize) {
        *self.counts.entry(index).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Register size the outcomes were drawn from.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of shots recorded; equals the sum of all counts.
    pub fn total_shots(&self) -> usize {
        self.shots
    }

    /// How often `index` was observed.
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Observed relative frequency of `index`, 0 for an empty distribution.
    pub fn frequency(&self, index: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(index) as f64 / self.shots as f64
    }

    /// The most often observed index with its count. Ties go to the lower index.
    pub fn most_frequent(&self) -> Option<(usize, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(usize, usize)>, (&index, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((index, count)),
            })
    }

    /// Observed `(index, count)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&index, &count)| (index, count))
    }

    /// Renders `index` as an `n`-character bitstring, most significant bit first.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Counts keyed by bitstring instead of integer index.
    pub fn to_bitstring_counts(&self) -> BTreeMap<String, usize> {
        self.iter().map(|(index, count)| (self.bitstring(index), count)).collect()
    }
}

impl fmt::Display for OutcomeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome Distribution ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        for (index, count) in self.iter() {
            writeln!(
                f,
                "  |{}> ({:>3}): {:>6}  {:.4}",
                self.bitstring(index),
                index,
                count,
                self.frequency(index)
            )?;
        }
        Ok(())
    }
}

/// Everything an external renderer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The request that produced this report.
    pub request: RunRequest,
    /// Oracle/diffusion rounds actually applied.
    pub iterations: usize,
    /// Exact `|a_m|²` of the final state, before sampling.
    pub success_probability: f64,
    /// Sampled outcomes.
    pub distribution: OutcomeDistribution,
}

impl RunReport {
    /// Fraction of shots that hit the marked value.
    pub fn observed_success_rate(&self) -> f64 {
        self.distribution.frequency(self.request.marked_value)
    }

    /// Whether the most frequent outcome is the marked value.
    pub fn found_marked_value(&self) -> bool {
        self.distribution
            .most_frequent()
            .is_some_and(|(index, _)| index == self.request.marked_value)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grover search: n={} marked=|{}> iterations={}",
            self.request.register_size,
            self.distribution.bitstring(self.request.marked_value),
            self.iterations
        )?;
        writeln!(
            f,
            "  P(marked) exact={:.4} observed={:.4}",
            self.success_probability,
            self.observed_success_rate()
        )?;
        write!(f, "{}", self.distribution)
    }
}

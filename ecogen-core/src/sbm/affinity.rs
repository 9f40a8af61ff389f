//! Block-pair edge probabilities with a hierarchical reciprocity bias.
//!
//! Every connected pair of distinct nodes is reciprocal with probability `ρ`,
//! so the overall reciprocal fraction converges on `ρ`. For a pair whose
//! directions carry probabilities `f` and `g` that probability is
//!
//! ```text
//! fg / (f + g - fg) = ρ
//! ```
//!
//! Between blocks `a < b` the forward probability `f` (for `a -> b`) is the
//! baseline density, raised to `2ρ/(1+ρ)` when the baseline alone cannot
//! reach `ρ`; solving for `g` then gives `g = ρf / (f(1+ρ) - ρ)`.
//! Within a block both directions share one probability, and the only
//! symmetric solution is `p = 2ρ/(1+ρ)`, which replaces the diagonal
//! baseline. With `ρ = 0` edges only run from lower to higher blocks, and
//! with `ρ = 1` every entry is one.

use std::cmp::Ordering;

use crate::{error::GenerationError, random::RandomSource};

/// Directed edge probabilities between blocks, stored row-major.
///
/// Entry `(from, to)` is the probability of an edge from a node in block
/// `from` to a node in block `to`.
///
/// # Examples
/// ```
/// use ecogen_core::{GraphGenerator, StochasticBlockModel};
///
/// let mut sbm = StochasticBlockModel::from_parts(9, 3, 0, 0, 1.0, Some(4))?;
/// let result = sbm.generate()?;
/// let affinity = result.record().affinity();
/// assert!(affinity.is_symmetric(1e-12));
/// assert_eq!(affinity.get(0, 2), Some(1.0));
/// # Ok::<(), ecogen_core::EcoGenError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffinityMatrix {
    n_blocks: usize,
    entries: Vec<f64>,
}

impl AffinityMatrix {
    /// Applies the hierarchical bias for `reciprocal_proportion` to a
    /// symmetric `baseline`. Diagonal baseline entries are superseded by the
    /// within-block probability.
    pub(super) fn biased(baseline: &[Vec<f64>], reciprocal_proportion: f64) -> Self {
        let n_blocks = baseline.len();
        let mut entries = vec![0.0; n_blocks * n_blocks];
        for (a, row) in baseline.iter().enumerate() {
            for (b, &density) in row.iter().enumerate() {
                let value = match a.cmp(&b) {
                    Ordering::Equal => within_block(reciprocal_proportion),
                    Ordering::Less => {
                        hierarchical_pair(density, reciprocal_proportion).0
                    }
                    Ordering::Greater => {
                        let mirror = baseline
                            .get(b)
                            .and_then(|other| other.get(a))
                            .copied()
                            .unwrap_or(density);
                        hierarchical_pair(mirror, reciprocal_proportion).1
                    }
                };
                if let Some(slot) = entries.get_mut(a * n_blocks + b) {
                    *slot = value;
                }
            }
        }
        Self { n_blocks, entries }
    }

    /// Number of blocks along each side.
    #[must_use]
    pub const fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    /// Probability of an edge from block `from` to block `to`.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.n_blocks || to >= self.n_blocks {
            return None;
        }
        self.entries.get(from * self.n_blocks + to).copied()
    }

    /// Iterates over rows in block order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.entries.chunks(self.n_blocks.max(1))
    }

    /// Returns the matrix as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Returns `true` when every entry differs from its transpose by at most
    /// `tolerance`.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n_blocks).all(|a| {
            (a + 1..self.n_blocks).all(|b| match (self.get(a, b), self.get(b, a)) {
                (Some(x), Some(y)) => (x - y).abs() <= tolerance,
                _ => false,
            })
        })
    }
}

/// Edge probability inside a block, `2ρ/(1+ρ)`, at which a connected
/// same-block pair is reciprocal with probability `rho`.
pub(crate) fn within_block(rho: f64) -> f64 {
    (2.0 * rho / (1.0 + rho)).clamp(0.0, 1.0)
}

/// Forward and reverse probabilities `(f, g)` for a block pair with baseline
/// density `baseline` and target reciprocal proportion `rho`.
pub(crate) fn hierarchical_pair(baseline: f64, rho: f64) -> (f64, f64) {
    let forward = baseline.max(within_block(rho)).clamp(0.0, 1.0);
    if rho <= 0.0 || forward <= 0.0 {
        return (forward, 0.0);
    }
    let reverse = rho * forward / (forward * (1.0 + rho) - rho);
    (forward, reverse.clamp(0.0, 1.0))
}

/// Draws a symmetric baseline with one `Uniform[0, 1)` density per unordered
/// block pair, diagonal included, in row-major upper-triangle order.
pub(super) fn draw_baseline(
    source: &mut RandomSource,
    n_blocks: usize,
) -> Result<Vec<Vec<f64>>, GenerationError> {
    let mut baseline = vec![vec![0.0; n_blocks]; n_blocks];
    for a in 0..n_blocks {
        for b in a..n_blocks {
            let density = source.uniform(0.0, 1.0)?;
            if let Some(slot) = baseline.get_mut(a).and_then(|row| row.get_mut(b)) {
                *slot = density;
            }
            if let Some(slot) = baseline.get_mut(b).and_then(|row| row.get_mut(a)) {
                *slot = density;
            }
        }
    }
    Ok(baseline)
}

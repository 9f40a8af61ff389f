//! Resolved parameters of a stochastic-block-model draw.

use crate::graph::ReciprocityCounts;

use super::{
    affinity::AffinityMatrix,
    attributes::NodeAttributes,
    config::{BlockSizing, NumericDistribution},
};

/// Everything needed to audit or replay a stochastic-block-model draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SbmRecord {
    pub(super) n_species: usize,
    pub(super) n_blocks: usize,
    pub(super) reciprocal_proportion: f64,
    pub(super) seed: u64,
    pub(super) block_sizing: BlockSizing,
    pub(super) numeric_distribution: NumericDistribution,
    pub(super) min_max_scaling: bool,
    pub(super) block_sizes: Vec<usize>,
    pub(super) block_labels: Vec<usize>,
    pub(super) baseline: Vec<Vec<f64>>,
    pub(super) affinity: AffinityMatrix,
    pub(super) attribute_names: Vec<String>,
    pub(super) attributes: Vec<NodeAttributes>,
    pub(super) attributes_supplied: bool,
    pub(super) between_block_reciprocity: ReciprocityCounts,
    pub(super) overall_reciprocity: ReciprocityCounts,
}

impl SbmRecord {
    /// Number of nodes.
    #[must_use]
    pub const fn n_species(&self) -> usize {
        self.n_species
    }

    /// Number of blocks.
    #[must_use]
    pub const fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    /// Requested reciprocal proportion `ρ`.
    #[must_use]
    pub const fn reciprocal_proportion(&self) -> f64 {
        self.reciprocal_proportion
    }

    /// Seed of the random source that produced the draw.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Sizing strategy the blocks were laid out with.
    #[must_use]
    pub const fn block_sizing(&self) -> &BlockSizing {
        &self.block_sizing
    }

    /// Distribution numeric attributes were drawn from.
    #[must_use]
    pub const fn numeric_distribution(&self) -> NumericDistribution {
        self.numeric_distribution
    }

    /// Whether numeric attributes were min-max scaled, drawn or supplied.
    #[must_use]
    pub const fn min_max_scaling(&self) -> bool {
        self.min_max_scaling
    }

    /// Number of nodes in each block.
    #[must_use]
    pub fn block_sizes(&self) -> &[usize] {
        &self.block_sizes
    }

    /// Block label of every node; labels are contiguous and non-decreasing.
    #[must_use]
    pub fn block_labels(&self) -> &[usize] {
        &self.block_labels
    }

    /// Block of `node`, if it exists.
    #[must_use]
    pub fn block_of(&self, node: usize) -> Option<usize> {
        self.block_labels.get(node).copied()
    }

    /// Symmetric baseline densities before the hierarchical bias.
    #[must_use]
    pub fn baseline(&self) -> &[Vec<f64>] {
        &self.baseline
    }

    /// Edge probabilities used for sampling.
    #[must_use]
    pub const fn affinity(&self) -> &AffinityMatrix {
        &self.affinity
    }

    /// Attribute names in vector order.
    #[must_use]
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Attribute vectors in node order.
    #[must_use]
    pub fn attributes(&self) -> &[NodeAttributes] {
        &self.attributes
    }

    /// Whether the attributes came from the configuration rather than being
    /// drawn.
    #[must_use]
    pub const fn attributes_supplied(&self) -> bool {
        self.attributes_supplied
    }

    /// Reciprocity tally over pairs of nodes in different blocks.
    #[must_use]
    pub const fn between_block_reciprocity(&self) -> ReciprocityCounts {
        self.between_block_reciprocity
    }

    /// Reciprocity tally over all node pairs.
    #[must_use]
    pub const fn overall_reciprocity(&self) -> ReciprocityCounts {
        self.overall_reciprocity
    }

    /// Realized fraction of connected node pairs that are reciprocal, the
    /// quantity the reciprocal proportion targets.
    #[must_use]
    pub fn realized_reciprocal_fraction(&self) -> Option<f64> {
        self.overall_reciprocity.fraction()
    }
}

//! Configuration for the stochastic block model.

use super::attributes::NodeAttributes;

/// How nodes are divided among blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockSizing {
    /// Contiguous blocks whose sizes differ by at most one; lower-indexed
    /// blocks absorb the remainder.
    #[default]
    Balanced,
    /// Caller-supplied sizes, one per block, summing to the node count.
    Explicit(Vec<usize>),
    /// Each node falls in a uniformly random block; labels are then laid out
    /// contiguously. Blocks may end up empty.
    Multinomial,
}

/// Distribution used for numeric node attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericDistribution {
    /// `Normal(0, 1)`.
    #[default]
    StandardNormal,
    /// `Uniform[0, 1)`.
    Uniform,
}

/// Inputs to [`crate::StochasticBlockModel`].
///
/// # Examples
/// ```
/// use ecogen_core::{BlockSizing, SbmConfig};
///
/// let config = SbmConfig::new(20, 3)
///     .with_attributes(1, 2)
///     .with_reciprocal_proportion(0.1)
///     .with_seed(7);
/// assert_eq!(config.n_blocks(), 3);
/// assert_eq!(config.block_sizing(), &BlockSizing::Balanced);
/// assert_eq!(config.n_binary_attributes() + config.n_numeric_attributes(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SbmConfig {
    n_species: usize,
    n_blocks: usize,
    n_binary_attributes: usize,
    n_numeric_attributes: usize,
    reciprocal_proportion: f64,
    seed: Option<u64>,
    block_sizing: BlockSizing,
    baseline: Option<Vec<Vec<f64>>>,
    numeric_distribution: NumericDistribution,
    min_max_scaling: bool,
    species_attributes: Option<Vec<NodeAttributes>>,
}

/// Reciprocal proportion used when none is configured.
pub const DEFAULT_RECIPROCAL_PROPORTION: f64 = 0.1;

impl SbmConfig {
    /// Creates a configuration for `n_species` nodes in `n_blocks` balanced
    /// blocks with no attributes, the default reciprocal proportion, a random
    /// baseline, and an entropy-drawn seed.
    #[must_use]
    pub const fn new(n_species: usize, n_blocks: usize) -> Self {
        Self {
            n_species,
            n_blocks,
            n_binary_attributes: 0,
            n_numeric_attributes: 0,
            reciprocal_proportion: DEFAULT_RECIPROCAL_PROPORTION,
            seed: None,
            block_sizing: BlockSizing::Balanced,
            baseline: None,
            numeric_distribution: NumericDistribution::StandardNormal,
            min_max_scaling: false,
            species_attributes: None,
        }
    }

    /// Sets the number of binary and numeric attributes generated per node.
    #[must_use]
    pub fn with_attributes(mut self, n_binary: usize, n_numeric: usize) -> Self {
        self.n_binary_attributes = n_binary;
        self.n_numeric_attributes = n_numeric;
        self
    }

    /// Sets the target fraction of connected node pairs that are reciprocal.
    #[must_use]
    pub fn with_reciprocal_proportion(mut self, proportion: f64) -> Self {
        self.reciprocal_proportion = proportion;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the random seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Chooses how nodes are divided among blocks.
    #[must_use]
    pub fn with_block_sizing(mut self, sizing: BlockSizing) -> Self {
        self.block_sizing = sizing;
        self
    }

    /// Supplies a symmetric `n_blocks x n_blocks` baseline density matrix
    /// instead of drawing one.
    #[must_use]
    pub fn with_baseline(mut self, baseline: Vec<Vec<f64>>) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Chooses the distribution of numeric attributes.
    #[must_use]
    pub fn with_numeric_distribution(mut self, distribution: NumericDistribution) -> Self {
        self.numeric_distribution = distribution;
        self
    }

    /// Rescales each numeric attribute to `[0, 1]` across nodes; a constant
    /// attribute becomes `1.0`.
    ///
    /// Scaling is off by default so drawn values keep their distribution.
    /// When enabled, scaled values keep full `f64` precision and are not
    /// rounded to a fixed number of decimals. Binary attributes are never
    /// touched.
    #[must_use]
    pub fn with_min_max_scaling(mut self, enabled: bool) -> Self {
        self.min_max_scaling = enabled;
        self
    }

    /// Supplies one attribute vector per node instead of drawing them.
    ///
    /// Every vector must share the layout of the first (same length, same
    /// kind at each position) and numeric values must be finite. Supplied
    /// vectors take precedence over [`Self::with_attributes`], consume no
    /// randomness, and are still min-max scaled when scaling is enabled.
    ///
    /// # Examples
    /// ```
    /// use ecogen_core::{AttributeValue, NodeAttributes, SbmConfig};
    ///
    /// let traits = (0..4_u8)
    ///     .map(|k| NodeAttributes::new(vec![AttributeValue::Numeric(f64::from(k))]))
    ///     .collect();
    /// let config = SbmConfig::new(4, 2).with_species_attributes(traits);
    /// assert_eq!(config.species_attributes().map(<[_]>::len), Some(4));
    /// ```
    #[must_use]
    pub fn with_species_attributes(mut self, attributes: Vec<NodeAttributes>) -> Self {
        self.species_attributes = Some(attributes);
        self
    }

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

    /// Binary attributes per node.
    #[must_use]
    pub const fn n_binary_attributes(&self) -> usize {
        self.n_binary_attributes
    }

    /// Numeric attributes per node.
    #[must_use]
    pub const fn n_numeric_attributes(&self) -> usize {
        self.n_numeric_attributes
    }

    /// Target reciprocal proportion.
    #[must_use]
    pub const fn reciprocal_proportion(&self) -> f64 {
        self.reciprocal_proportion
    }

    /// Configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Block sizing strategy.
    #[must_use]
    pub const fn block_sizing(&self) -> &BlockSizing {
        &self.block_sizing
    }

    /// Caller-supplied baseline matrix, if any.
    #[must_use]
    pub fn baseline(&self) -> Option<&[Vec<f64>]> {
        self.baseline.as_deref()
    }

    /// Numeric attribute distribution.
    #[must_use]
    pub const fn numeric_distribution(&self) -> NumericDistribution {
        self.numeric_distribution
    }

    /// Whether numeric attributes are min-max scaled.
    #[must_use]
    pub const fn min_max_scaling(&self) -> bool {
        self.min_max_scaling
    }

    /// Caller-supplied attribute vectors, if any.
    #[must_use]
    pub fn species_attributes(&self) -> Option<&[NodeAttributes]> {
        self.species_attributes.as_deref()
    }
}

//! Stochastic block model with hierarchical reciprocity bias.
//!
//! Nodes are laid out in contiguous blocks. Every ordered pair of distinct
//! nodes becomes an edge with the probability the [`AffinityMatrix`] assigns
//! to their block pair. Between-block probabilities favour edges from lower
//! to higher blocks, with the reverse direction tuned so a connected pair is
//! reciprocal with the configured proportion; within-block probabilities are
//! set to hit the same proportion, so it holds over all connected pairs.
//! Node attributes are drawn last, or taken from the configuration, and never
//! influence the edges.
//!
//! Sampling has no acceptance step, so an empty graph is a valid outcome.

mod affinity;
mod attributes;
mod blocks;
mod config;
mod record;


use tracing::{info, instrument};

use crate::{
    Result,
    error::GenerationError,
    graph::DirectedGraph,
    random::RandomSource,
    result::{GraphGenerator, GraphResult},
    validate::validate_sbm,
};

pub use affinity::AffinityMatrix;
pub use attributes::{AttributeValue, NodeAttributes, attribute_names};
pub use blocks::balanced_sizes;
pub use config::{BlockSizing, DEFAULT_RECIPROCAL_PROPORTION, NumericDistribution, SbmConfig};
pub use record::SbmRecord;

/// Generates directed graphs with planted block structure.
///
/// # Examples
/// ```
/// use ecogen_core::{GraphGenerator, StochasticBlockModel};
///
/// let mut sbm = StochasticBlockModel::from_parts(20, 3, 1, 2, 0.1, Some(7))?;
/// let result = sbm.generate()?;
/// let record = result.record();
/// assert_eq!(record.block_sizes(), &[7, 7, 6]);
/// assert!(record.attributes().iter().all(|node| node.len() == 3));
/// # Ok::<(), ecogen_core::EcoGenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct StochasticBlockModel {
    config: SbmConfig,
    source: RandomSource,
}

/// Short name for [`StochasticBlockModel`].
pub type Sbm = StochasticBlockModel;

impl StochasticBlockModel {
    /// Validates `config` and builds a model with its own random source.
    ///
    /// # Errors
    /// Returns [`crate::EcoGenError::Validation`] when the configuration is
    /// rejected; no randomness is consumed in that case.
    pub fn new(config: SbmConfig) -> Result<Self> {
        let config = validate_sbm(&config)?;
        let source = RandomSource::from_optional_seed(config.seed());
        Ok(Self { config, source })
    }

    /// Shorthand for [`Self::new`] with a plain parameter list.
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn from_parts(
        n_species: usize,
        n_blocks: usize,
        n_binary_attributes: usize,
        n_numeric_attributes: usize,
        reciprocal_proportion: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        Self::new(
            SbmConfig::new(n_species, n_blocks)
                .with_attributes(n_binary_attributes, n_numeric_attributes)
                .with_reciprocal_proportion(reciprocal_proportion)
                .with_optional_seed(seed),
        )
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SbmConfig {
        &self.config
    }

    /// Seed of the model's random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.source.seed()
    }

    fn sample_edges(
        &mut self,
        labels: &[usize],
        affinity: &AffinityMatrix,
    ) -> core::result::Result<DirectedGraph, GenerationError> {
        let mut graph = DirectedGraph::with_nodes(labels.len());
        for (source, &from) in labels.iter().enumerate() {
            for (target, &to) in labels.iter().enumerate() {
                if source == target {
                    continue;
                }
                let probability = affinity.get(from, to).unwrap_or(0.0);
                if self.source.bernoulli(probability)? {
                    graph.insert(source, target);
                }
            }
        }
        Ok(graph)
    }
}

impl GraphGenerator for StochasticBlockModel {
    type Record = SbmRecord;

    #[instrument(
        name = "sbm.generate",
        err,
        skip(self),
        fields(
            n_species = self.config.n_species(),
            n_blocks = self.config.n_blocks(),
            reciprocal_proportion = self.config.reciprocal_proportion(),
            seed = self.seed(),
        ),
    )]
    fn generate(&mut self) -> Result<GraphResult<SbmRecord>> {
        let config = self.config.clone();
        let n_species = config.n_species();
        let n_blocks = config.n_blocks();

        let block_sizes =
            blocks::resolve_sizes(config.block_sizing(), n_species, n_blocks, &mut self.source);
        let block_labels = blocks::assign_blocks(&block_sizes);
        let baseline = match config.baseline() {
            Some(baseline) => baseline.to_vec(),
            None => affinity::draw_baseline(&mut self.source, n_blocks)?,
        };
        let affinity = AffinityMatrix::biased(&baseline, config.reciprocal_proportion());
        let graph = self.sample_edges(&block_labels, &affinity)?;

        let (mut attributes, attribute_names) = match config.species_attributes() {
            Some(supplied) => {
                let names = supplied.first().map(attributes::layout_names).unwrap_or_default();
                (supplied.to_vec(), names)
            }
            None => (
                attributes::draw_attributes(
                    &mut self.source,
                    n_species,
                    config.n_binary_attributes(),
                    config.n_numeric_attributes(),
                    config.numeric_distribution(),
                )?,
                attribute_names(config.n_binary_attributes(), config.n_numeric_attributes()),
            ),
        };
        if config.min_max_scaling() {
            attributes::min_max_scale(&mut attributes);
        }

        let between_block_reciprocity = graph.reciprocity_where(|a, b| {
            block_labels.get(a).is_some_and(|x| block_labels.get(b) != Some(x))
        });
        let overall_reciprocity = graph.reciprocity();
        info!(
            edges = graph.edge_count(),
            between_block_reciprocity = between_block_reciprocity.fraction().unwrap_or(0.0),
            overall_reciprocity = overall_reciprocity.fraction().unwrap_or(0.0),
            "sbm draw complete"
        );
        #[cfg(feature = "metrics")]
        metrics::histogram!("ecogen_sbm_edges").record(graph.edge_count() as f64);

        let record = SbmRecord {
            n_species,
            n_blocks,
            reciprocal_proportion: config.reciprocal_proportion(),
            seed: self.seed(),
            block_sizing: config.block_sizing().clone(),
            numeric_distribution: config.numeric_distribution(),
            min_max_scaling: config.min_max_scaling(),
            block_sizes,
            block_labels,
            baseline,
            affinity,
            attribute_names,
            attributes,
            attributes_supplied: config.species_attributes().is_some(),
            between_block_reciprocity,
            overall_reciprocity,
        };
        Ok(GraphResult::new(graph, record))
    }
}

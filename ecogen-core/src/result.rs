//! The common output of every generator.
//!
//! A [`GraphResult`] pairs the sampled [`DirectedGraph`] with the resolved
//! parameter record of the model that drew it. Both are immutable snapshots.

use crate::{Result, graph::DirectedGraph};

/// A generated graph together with the record needed to audit or replay it.
///
/// # Examples
/// ```
/// use ecogen_core::{GraphGenerator, StochasticBlockModel};
///
/// let mut sbm = StochasticBlockModel::from_parts(12, 3, 1, 1, 0.2, Some(5))?;
/// let (graph, record) = sbm.generate()?.into_parts();
/// assert_eq!(graph.node_count(), 12);
/// assert_eq!(record.block_sizes(), &[4, 4, 4]);
/// # Ok::<(), ecogen_core::EcoGenError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphResult<R> {
    graph: DirectedGraph,
    record: R,
}

impl<R> GraphResult<R> {
    pub(crate) const fn new(graph: DirectedGraph, record: R) -> Self {
        Self { graph, record }
    }

    /// The sampled graph.
    #[must_use]
    pub const fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// The resolved parameter record.
    #[must_use]
    pub const fn record(&self) -> &R {
        &self.record
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Splits the result into its graph and record.
    #[must_use]
    pub fn into_parts(self) -> (DirectedGraph, R) {
        (self.graph, self.record)
    }
}

/// A model that draws directed graphs from a validated configuration.
///
/// Each call continues the generator's random stream, so successive calls
/// yield independent draws while two generators built from the same seed and
/// configuration yield identical sequences.
pub trait GraphGenerator {
    /// Model-specific resolved parameter record.
    type Record;

    /// Draws one graph.
    ///
    /// # Errors
    /// Returns [`crate::EcoGenError::Generation`] when the draw cannot be
    /// completed.
    fn generate(&mut self) -> Result<GraphResult<Self::Record>>;
}

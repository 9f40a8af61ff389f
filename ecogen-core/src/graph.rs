//! Directed graph value produced by the generators.
//!
//! Nodes are the integers `0..node_count`. Adjacency is kept in ordered sets,
//! so edge iteration is deterministic and sorted by `(source, target)`.

use std::collections::BTreeSet;

/// A directed edge `source -> target`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail of the edge.
    pub source: usize,
    /// Head of the edge.
    pub target: usize,
}

impl Edge {
    /// Creates an edge `source -> target`.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// Returns `true` when the edge starts and ends at the same node.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Pair-level reciprocity tally over unordered pairs of distinct nodes.
///
/// A pair is *connected* when at least one direction is present and
/// *reciprocal* when both are.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReciprocityCounts {
    /// Unordered pairs joined in at least one direction.
    pub connected_pairs: usize,
    /// Unordered pairs joined in both directions.
    pub reciprocal_pairs: usize,
}

impl ReciprocityCounts {
    /// Fraction of connected pairs that are reciprocal, or `None` when no pair
    /// is connected.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        (self.connected_pairs > 0)
            .then(|| self.reciprocal_pairs as f64 / self.connected_pairs as f64)
    }
}

/// An immutable directed graph over `0..node_count`.
///
/// # Examples
/// ```
/// use ecogen_core::{NicheModel, GraphGenerator};
///
/// let mut model = NicheModel::from_parts(20, 0.15, Some(3))?;
/// let result = model.generate()?;
/// let graph = result.graph();
/// assert_eq!(graph.node_count(), 20);
/// assert_eq!(graph.edges().count(), graph.edge_count());
/// # Ok::<(), ecogen_core::EcoGenError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedGraph {
    successors: Vec<BTreeSet<usize>>,
    predecessors: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl DirectedGraph {
    /// Creates an edgeless graph with `node_count` nodes.
    pub(crate) fn with_nodes(node_count: usize) -> Self {
        Self {
            successors: vec![BTreeSet::new(); node_count],
            predecessors: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Inserts `source -> target`, returning `false` when the edge already
    /// exists or an endpoint is out of range.
    pub(crate) fn insert(&mut self, source: usize, target: usize) -> bool {
        if source >= self.node_count() || target >= self.node_count() {
            return false;
        }
        let inserted = self
            .successors
            .get_mut(source)
            .is_some_and(|out| out.insert(target));
        if inserted {
            if let Some(incoming) = self.predecessors.get_mut(target) {
                incoming.insert(source);
            }
            self.edge_count += 1;
        }
        inserted
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of directed edges, self-loops included.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates over all edges in `(source, target)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(source, out)| out.iter().map(move |&target| Edge::new(source, target)))
    }

    /// Returns `true` when `source -> target` is present.
    #[must_use]
    pub fn contains(&self, source: usize, target: usize) -> bool {
        self.successors
            .get(source)
            .is_some_and(|out| out.contains(&target))
    }

    /// Iterates over the heads of edges leaving `node`.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.successors.get(node).into_iter().flatten().copied()
    }

    /// Iterates over the tails of edges entering `node`.
    pub fn predecessors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.predecessors.get(node).into_iter().flatten().copied()
    }

    /// Number of edges leaving `node`.
    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.successors.get(node).map_or(0, BTreeSet::len)
    }

    /// Number of edges entering `node`.
    #[must_use]
    pub fn in_degree(&self, node: usize) -> usize {
        self.predecessors.get(node).map_or(0, BTreeSet::len)
    }

    /// Returns `true` when `node` shares no edge with any *other* node.
    ///
    /// A self-loop does not connect a node to the rest of the graph.
    #[must_use]
    pub fn is_isolated(&self, node: usize) -> bool {
        self.successors(node).all(|other| other == node)
            && self.predecessors(node).all(|other| other == node)
    }

    /// Realized connectance `edges / n^2`; zero for an empty node set.
    #[must_use]
    pub fn connectance(&self) -> f64 {
        let n = self.node_count();
        if n == 0 {
            return 0.0;
        }
        self.edge_count as f64 / (n as f64 * n as f64)
    }

    /// Tallies connected and reciprocal pairs among all distinct node pairs.
    #[must_use]
    pub fn reciprocity(&self) -> ReciprocityCounts {
        self.reciprocity_where(|_, _| true)
    }

    /// Tallies connected and reciprocal pairs among distinct pairs `(a, b)`,
    /// `a < b`, accepted by `include`.
    pub fn reciprocity_where(&self, include: impl Fn(usize, usize) -> bool) -> ReciprocityCounts {
        let mut counts = ReciprocityCounts::default();
        for edge in self.edges() {
            let (a, b) = (edge.source, edge.target);
            if a == b {
                continue;
            }
            let (low, high) = if a < b { (a, b) } else { (b, a) };
            if !include(low, high) {
                continue;
            }
            let reverse = self.contains(b, a);
            // Count each reciprocal pair once, from its lower-indexed tail.
            if reverse && a > b {
                continue;
            }
            counts.connected_pairs += 1;
            if reverse {
                counts.reciprocal_pairs += 1;
            }
        }
        counts
    }

    /// Fraction of connected distinct pairs joined in both directions.
    #[must_use]
    pub fn reciprocal_fraction(&self) -> Option<f64> {
        self.reciprocity().fraction()
    }
}

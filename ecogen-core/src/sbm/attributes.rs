//! Per-node binary and numeric attributes.
//!
//! Attributes are drawn independently of block membership and edges. Each
//! drawn node carries its binary attributes first, then its numeric
//! attributes. Caller-supplied vectors may interleave the two kinds as long as
//! every node shares the same layout.

use crate::{error::GenerationError, random::RandomSource};

use super::config::NumericDistribution;

/// A single attribute value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    /// A `Bernoulli(0.5)` flag.
    Binary(bool),
    /// A draw from the configured numeric distribution.
    Numeric(f64),
}

impl AttributeValue {
    /// Returns `true` for a numeric value.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// The value as a float; binary flags map to `0.0` and `1.0`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Binary(flag) => f64::from(u8::from(flag)),
            Self::Numeric(value) => value,
        }
    }
}

/// The attribute vector of one node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttributes {
    values: Vec<AttributeValue>,
}

impl NodeAttributes {
    /// Wraps a caller-supplied attribute vector.
    ///
    /// # Examples
    /// ```
    /// use ecogen_core::{AttributeValue, NodeAttributes};
    ///
    /// let node = NodeAttributes::new(vec![
    ///     AttributeValue::Binary(true),
    ///     AttributeValue::Numeric(2.5),
    /// ]);
    /// assert_eq!(node.to_f64_vec(), vec![1.0, 2.5]);
    /// ```
    #[must_use]
    pub const fn new(values: Vec<AttributeValue>) -> Self {
        Self { values }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the node carries no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attribute values in name order.
    #[must_use]
    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// Attribute at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        self.values.get(index).copied()
    }

    /// All values as floats.
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values.iter().map(|value| value.as_f64()).collect()
    }

    /// Returns `true` when `other` has the same length and the same kind at
    /// every position.
    #[must_use]
    pub fn same_layout(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.is_numeric() == b.is_numeric())
    }
}

impl From<Vec<AttributeValue>> for NodeAttributes {
    fn from(values: Vec<AttributeValue>) -> Self {
        Self::new(values)
    }
}

/// Attribute names in vector order: `binary_attr_{k}` then `numeric_attr_{k}`.
///
/// # Examples
/// ```
/// use ecogen_core::sbm::attribute_names;
///
/// assert_eq!(
///     attribute_names(1, 2),
///     vec!["binary_attr_0", "numeric_attr_0", "numeric_attr_1"],
/// );
/// ```
#[must_use]
pub fn attribute_names(n_binary: usize, n_numeric: usize) -> Vec<String> {
    (0..n_binary)
        .map(|k| format!("binary_attr_{k}"))
        .chain((0..n_numeric).map(|k| format!("numeric_attr_{k}")))
        .collect()
}

/// Names for an attribute layout, numbering each kind in order of
/// appearance. Matches [`attribute_names`] for a binary-first layout.
pub(super) fn layout_names(layout: &NodeAttributes) -> Vec<String> {
    let (mut binary, mut numeric) = (0_usize, 0_usize);
    layout
        .values
        .iter()
        .map(|value| {
            if value.is_numeric() {
                numeric += 1;
                format!("numeric_attr_{}", numeric - 1)
            } else {
                binary += 1;
                format!("binary_attr_{}", binary - 1)
            }
        })
        .collect()
}

/// Draws attributes node by node.
pub(super) fn draw_attributes(
    source: &mut RandomSource,
    n_nodes: usize,
    n_binary: usize,
    n_numeric: usize,
    distribution: NumericDistribution,
) -> Result<Vec<NodeAttributes>, GenerationError> {
    let mut nodes = Vec::with_capacity(n_nodes);
    for _ in 0..n_nodes {
        let mut values: Vec<AttributeValue> = source
            .bernoulli_n(n_binary, 0.5)?
            .into_iter()
            .map(AttributeValue::Binary)
            .collect();
        values.reserve(n_numeric);
        for _ in 0..n_numeric {
            let value = match distribution {
                NumericDistribution::StandardNormal => source.standard_normal(),
                NumericDistribution::Uniform => source.unit(),
            };
            values.push(AttributeValue::Numeric(value));
        }
        nodes.push(NodeAttributes::new(values));
    }
    Ok(nodes)
}

/// Rescales every numeric column to `[0, 1]` across nodes, leaving binary
/// columns untouched. A constant column becomes all ones.
pub(super) fn min_max_scale(nodes: &mut [NodeAttributes]) {
    let width = nodes.iter().map(NodeAttributes::len).max().unwrap_or(0);
    for column in 0..width {
        let numeric = |node: &NodeAttributes| match node.values.get(column) {
            Some(AttributeValue::Numeric(value)) => Some(*value),
            _ => None,
        };
        let (min, max) = nodes
            .iter()
            .filter_map(numeric)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let span = max - min;
        for node in nodes.iter_mut() {
            if let Some(AttributeValue::Numeric(value)) = node.values.get_mut(column) {
                *value = if span > 0.0 { (*value - min) / span } else { 1.0 };
            }
        }
    }
}

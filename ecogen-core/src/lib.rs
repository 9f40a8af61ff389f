//! Ecogen core library.
//!
//! Two random directed-graph generators for ecological networks: the niche
//! model of food-web structure and a stochastic block model with a
//! hierarchical reciprocity bias and synthetic node attributes. Both draw
//! every random quantity through a seedable [`RandomSource`] and return a
//! [`GraphResult`] pairing the graph with a replayable parameter record.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod graph;
pub mod niche;
mod random;
mod result;
pub mod sbm;
#[cfg(test)]
mod test_utils;
pub mod validate;

pub use crate::{
    error::{
        EcoGenError, EcoGenErrorCode, GenerationError, GenerationErrorCode, Result,
        ValidationError, ValidationErrorCode,
    },
    graph::{DirectedGraph, Edge, ReciprocityCounts},
    niche::{
        CONNECTANCE_TOLERANCE, MAX_ATTEMPTS, NicheAssignment, NicheConfig, NicheModel,
        NicheRecord,
    },
    random::RandomSource,
    result::{GraphGenerator, GraphResult},
    sbm::{
        AffinityMatrix, AttributeValue, BlockSizing, DEFAULT_RECIPROCAL_PROPORTION,
        NodeAttributes, NumericDistribution, Sbm, SbmConfig, SbmRecord, StochasticBlockModel,
    },
};

//! Niche-model food-web generator.
//!
//! Each species receives a niche value, a feeding-range width drawn from
//! `Beta(1, β)` and scaled by its niche value, and a range centre below its
//! niche value. Species `i` consumes species `j`, recorded as the edge
//! `i -> j`, when `j`'s niche value falls in `i`'s closed feeding range.
//!
//! Generation is a bounded loop of draw, assess, then accept, retry, or
//! fail. A draw is accepted when its connectance lies within
//! [`CONNECTANCE_TOLERANCE`] of the target and no non-basal species is
//! isolated. After [`MAX_ATTEMPTS`] rejected draws the model gives up with
//! [`GenerationError::ConnectanceNotAchieved`].

mod config;
mod record;

#[cfg(test)]
mod tests;

use std::{collections::HashMap, fmt};

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    error::GenerationError,
    graph::DirectedGraph,
    random::RandomSource,
    result::{GraphGenerator, GraphResult},
    validate::{NicheSettings, validate_niche},
};

pub use config::NicheConfig;
pub use record::{NicheAssignment, NicheRecord};

/// Accepted relative deviation of realized from target connectance.
pub const CONNECTANCE_TOLERANCE: f64 = 0.15;

/// Number of draws attempted before generation fails.
pub const MAX_ATTEMPTS: usize = 1_000;

/// Generates food webs with the niche model.
///
/// # Examples
/// ```
/// use ecogen_core::{GraphGenerator, NicheModel};
///
/// let mut model = NicheModel::from_parts(15, 0.15, Some(42))?;
/// let result = model.generate()?;
/// let record = result.record();
/// assert_eq!(result.node_count(), 15);
/// assert_eq!(record.species().iter().filter(|s| s.range_width == 0.0).count(), 1);
/// assert!((record.realized_connectance() - 0.15).abs() <= 0.15 * 0.15);
/// # Ok::<(), ecogen_core::EcoGenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct NicheModel {
    settings: NicheSettings,
    source: RandomSource,
}

/// Reason a draw was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Rejection {
    Connectance { realized: f64 },
    Isolated { species: usize },
    IdenticalRoles { first: usize, second: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connectance { realized } => {
                write!(f, "connectance {realized:.4} outside tolerance")
            }
            Self::Isolated { species } => write!(f, "species {species} is isolated"),
            Self::IdenticalRoles { first, second } => {
                write!(f, "species {first} and {second} are trophically identical")
            }
        }
    }
}

/// One complete draw of species parameters and the web they imply.
struct Draw {
    species: Vec<NicheAssignment>,
    basal: usize,
    graph: DirectedGraph,
}

impl NicheModel {
    /// Validates `config` and builds a model with its own random source.
    ///
    /// # Errors
    /// Returns [`crate::EcoGenError::Validation`] when the configuration is
    /// rejected; no randomness is consumed in that case.
    pub fn new(config: NicheConfig) -> Result<Self> {
        let settings = validate_niche(&config)?;
        let source = RandomSource::from_optional_seed(config.seed());
        Ok(Self { settings, source })
    }

    /// Shorthand for [`Self::new`] with a plain parameter list.
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn from_parts(n_species: usize, connectance: f64, seed: Option<u64>) -> Result<Self> {
        Self::new(NicheConfig::new(n_species, connectance).with_optional_seed(seed))
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &NicheConfig {
        self.settings.config()
    }

    /// Beta shape parameter derived from the target connectance.
    #[must_use]
    pub const fn shape(&self) -> f64 {
        self.settings.shape()
    }

    /// Seed of the model's random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.source.seed()
    }

    fn draw(&mut self) -> core::result::Result<Draw, GenerationError> {
        let n_species = self.config().n_species();
        let shape = self.shape();
        let niche_values = self.source.uniform_n(n_species, 0.0, 1.0)?;
        let fractions = self.source.beta_n(n_species, 1.0, shape)?;
        let basal = basal_species(&niche_values);

        let mut species = Vec::with_capacity(n_species);
        for (index, (&niche_value, &fraction)) in niche_values.iter().zip(&fractions).enumerate() {
            let range_width = if index == basal {
                0.0
            } else {
                niche_value * fraction
            };
            let range_center = self.source.uniform(range_width / 2.0, niche_value)?;
            species.push(NicheAssignment {
                niche_value,
                range_width,
                range_center,
            });
        }

        let graph = build_web(&species);
        Ok(Draw {
            species,
            basal,
            graph,
        })
    }

    fn assess(&self, draw: &Draw) -> Option<Rejection> {
        let target = self.config().connectance();
        let realized = draw.graph.connectance();
        if (realized - target).abs() > CONNECTANCE_TOLERANCE * target {
            return Some(Rejection::Connectance { realized });
        }
        if let Some(species) = (0..draw.graph.node_count())
            .find(|&species| species != draw.basal && draw.graph.is_isolated(species))
        {
            return Some(Rejection::Isolated { species });
        }
        if self.config().distinct_trophic_roles() {
            if let Some((first, second)) = first_identical_pair(&draw.graph) {
                return Some(Rejection::IdenticalRoles { first, second });
            }
        }
        None
    }

    fn accept(&self, draw: Draw, attempts: usize) -> GraphResult<NicheRecord> {
        let config = self.config();
        let record = NicheRecord {
            n_species: config.n_species(),
            target_connectance: config.connectance(),
            seed: self.seed(),
            shape: self.shape(),
            tolerance: CONNECTANCE_TOLERANCE,
            distinct_trophic_roles: config.distinct_trophic_roles(),
            species: draw.species,
            basal_species: draw.basal,
            realized_connectance: draw.graph.connectance(),
            attempts,
        };
        GraphResult::new(draw.graph, record)
    }
}

impl GraphGenerator for NicheModel {
    type Record = NicheRecord;

    #[instrument(
        name = "niche.generate",
        err,
        skip(self),
        fields(
            n_species = self.config().n_species(),
            connectance = self.config().connectance(),
            seed = self.seed(),
        ),
    )]
    fn generate(&mut self) -> Result<GraphResult<NicheRecord>> {
        let mut last_realized = 0.0;
        for attempt in 1..=MAX_ATTEMPTS {
            let draw = self.draw()?;
            match self.assess(&draw) {
                None => {
                    info!(
                        attempt,
                        edges = draw.graph.edge_count(),
                        realized = draw.graph.connectance(),
                        "niche draw accepted"
                    );
                    #[cfg(feature = "metrics")]
                    metrics::histogram!("ecogen_niche_attempts").record(attempt as f64);
                    return Ok(self.accept(draw, attempt));
                }
                Some(reason) => {
                    debug!(attempt, reason = %reason, "niche draw rejected");
                    last_realized = draw.graph.connectance();
                }
            }
        }

        warn!(
            attempts = MAX_ATTEMPTS,
            last_realized, "niche retry budget exhausted"
        );
        #[cfg(feature = "metrics")]
        metrics::counter!("ecogen_niche_failures").increment(1);
        Err(GenerationError::ConnectanceNotAchieved {
            attempts: MAX_ATTEMPTS,
            target: self.config().connectance(),
            last_realized,
        }
        .into())
    }
}

/// Index of the smallest niche value; the first one wins a tie.
fn basal_species(niche_values: &[f64]) -> usize {
    niche_values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0, |(index, _)| index)
}

/// Links every predator to each species whose niche value falls in its range.
fn build_web(species: &[NicheAssignment]) -> DirectedGraph {
    let mut graph = DirectedGraph::with_nodes(species.len());
    for (predator, assignment) in species.iter().enumerate() {
        for (prey, candidate) in species.iter().enumerate() {
            if assignment.feeds_on(candidate.niche_value) {
                graph.insert(predator, prey);
            }
        }
    }
    graph
}

/// First pair of species, in index order, with identical prey and predator sets.
fn first_identical_pair(graph: &DirectedGraph) -> Option<(usize, usize)> {
    let mut seen: HashMap<(Vec<usize>, Vec<usize>), usize> = HashMap::new();
    for species in 0..graph.node_count() {
        let signature: (Vec<usize>, Vec<usize>) = (
            graph.successors(species).collect(),
            graph.predecessors(species).collect(),
        );
        if let Some(&first) = seen.get(&signature) {
            return Some((first, species));
        }
        seen.insert(signature, species);
    }
    None
}

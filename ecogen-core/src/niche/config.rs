//! Configuration for the niche model.

/// Inputs to [`crate::NicheModel`].
///
/// # Examples
/// ```
/// use ecogen_core::NicheConfig;
///
/// let config = NicheConfig::new(15, 0.15).with_seed(42);
/// assert_eq!(config.n_species(), 15);
/// assert_eq!(config.seed(), Some(42));
/// assert!(!config.distinct_trophic_roles());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NicheConfig {
    n_species: usize,
    connectance: f64,
    seed: Option<u64>,
    distinct_trophic_roles: bool,
}

impl NicheConfig {
    /// Creates a configuration with the given species count and target
    /// connectance, an entropy-drawn seed, and no trophic-role constraint.
    #[must_use]
    pub const fn new(n_species: usize, connectance: f64) -> Self {
        Self {
            n_species,
            connectance,
            seed: None,
            distinct_trophic_roles: false,
        }
    }

    /// Fixes the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the random seed.
    #[must_use]
    pub const fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Also rejects draws in which two species share identical prey and
    /// predator sets.
    #[must_use]
    pub const fn with_distinct_trophic_roles(mut self, enabled: bool) -> Self {
        self.distinct_trophic_roles = enabled;
        self
    }

    /// Number of species.
    #[must_use]
    pub const fn n_species(&self) -> usize {
        self.n_species
    }

    /// Target connectance.
    #[must_use]
    pub const fn connectance(&self) -> f64 {
        self.connectance
    }

    /// Configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether trophically identical species cause a draw to be rejected.
    #[must_use]
    pub const fn distinct_trophic_roles(&self) -> bool {
        self.distinct_trophic_roles
    }
}

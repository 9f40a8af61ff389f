//! Resolved parameters of a niche-model draw.

/// Niche parameters assigned to one species.
///
/// The feeding range is the closed interval `[center - width/2, center + width/2]`.
/// Its lower end never drops below zero and its centre never exceeds the
/// species' own niche value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NicheAssignment {
    /// Niche value `n`, drawn from `Uniform[0, 1)`.
    pub niche_value: f64,
    /// Feeding-range width `r`; zero for the basal species.
    pub range_width: f64,
    /// Feeding-range centre `c`.
    pub range_center: f64,
}

impl NicheAssignment {
    /// Lower end of the feeding range.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.range_center - self.range_width / 2.0
    }

    /// Upper end of the feeding range.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.range_center + self.range_width / 2.0
    }

    /// Returns `true` when a species with niche value `prey_niche` falls in
    /// this species' feeding range. A zero-width range feeds on nothing.
    ///
    /// # Examples
    /// ```
    /// use ecogen_core::NicheAssignment;
    ///
    /// let predator = NicheAssignment { niche_value: 0.8, range_width: 0.25, range_center: 0.5 };
    /// assert!(predator.feeds_on(0.375));
    /// assert!(predator.feeds_on(0.625));
    /// assert!(!predator.feeds_on(0.63));
    /// ```
    #[must_use]
    pub fn feeds_on(&self, prey_niche: f64) -> bool {
        self.range_width > 0.0 && self.lower() <= prey_niche && prey_niche <= self.upper()
    }
}

/// Everything needed to audit or replay a niche-model draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NicheRecord {
    pub(super) n_species: usize,
    pub(super) target_connectance: f64,
    pub(super) seed: u64,
    pub(super) shape: f64,
    pub(super) tolerance: f64,
    pub(super) distinct_trophic_roles: bool,
    pub(super) species: Vec<NicheAssignment>,
    pub(super) basal_species: usize,
    pub(super) realized_connectance: f64,
    pub(super) attempts: usize,
}

impl NicheRecord {
    /// Number of species.
    #[must_use]
    pub const fn n_species(&self) -> usize {
        self.n_species
    }

    /// Requested connectance.
    #[must_use]
    pub const fn target_connectance(&self) -> f64 {
        self.target_connectance
    }

    /// Seed of the random source that produced the draw.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Beta shape parameter `β` used for range widths.
    #[must_use]
    pub const fn shape(&self) -> f64 {
        self.shape
    }

    /// Relative connectance tolerance the draw was accepted under.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether trophically identical species were rejected.
    #[must_use]
    pub const fn distinct_trophic_roles(&self) -> bool {
        self.distinct_trophic_roles
    }

    /// Per-species `(n, r, c)` in species order.
    #[must_use]
    pub fn species(&self) -> &[NicheAssignment] {
        &self.species
    }

    /// Index of the basal species (minimal niche value, zero range).
    #[must_use]
    pub const fn basal_species(&self) -> usize {
        self.basal_species
    }

    /// Connectance of the accepted graph.
    #[must_use]
    pub const fn realized_connectance(&self) -> f64 {
        self.realized_connectance
    }

    /// Number of draws made, the accepted one included.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }
}

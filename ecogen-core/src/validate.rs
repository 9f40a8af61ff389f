//! Parameter validation for both models.
//!
//! Validation is pure: it consumes no randomness and touches no state. Each
//! model has one routine built from the shared range and count checks below.

use crate::{
    error::ValidationError,
    niche::NicheConfig,
    sbm::{AttributeValue, BlockSizing, NodeAttributes, SbmConfig},
};

type Validated<T> = core::result::Result<T, ValidationError>;

/// Smallest number of species a niche web may have.
pub const MIN_NICHE_SPECIES: usize = 2;

/// An interval accepted by a floating-point field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Interval {
    /// `(0, 1]`
    OpenClosedUnit,
    /// `[0, 1]`
    ClosedUnit,
}

impl Interval {
    fn contains(self, value: f64) -> bool {
        match self {
            Self::OpenClosedUnit => value > 0.0 && value <= 1.0,
            Self::ClosedUnit => (0.0..=1.0).contains(&value),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::OpenClosedUnit => "(0, 1]",
            Self::ClosedUnit => "[0, 1]",
        }
    }
}

fn require_at_least(field: &'static str, got: usize, minimum: usize) -> Validated<()> {
    if got < minimum {
        return Err(ValidationError::BelowMinimum {
            field,
            got,
            minimum,
        });
    }
    Ok(())
}

fn require_in(field: &'static str, value: f64, interval: Interval) -> Validated<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if !interval.contains(value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected: interval.label(),
        });
    }
    Ok(())
}

/// Normalized niche-model inputs with the derived Beta shape parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct NicheSettings {
    config: NicheConfig,
    shape: f64,
}

impl NicheSettings {
    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &NicheConfig {
        &self.config
    }

    /// Beta shape parameter `β = 1/(2C) - 1`, always strictly positive.
    #[must_use]
    pub const fn shape(&self) -> f64 {
        self.shape
    }
}

/// Derives the Beta shape parameter for a target connectance.
///
/// # Examples
/// ```
/// use ecogen_core::validate::beta_shape;
///
/// assert!((beta_shape(0.25) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn beta_shape(connectance: f64) -> f64 {
    1.0 / (2.0 * connectance) - 1.0
}

/// Validates a niche-model configuration.
///
/// # Errors
/// Returns [`ValidationError::BelowMinimum`] for fewer than two species,
/// [`ValidationError::NotFinite`] or [`ValidationError::OutOfRange`] when the
/// connectance lies outside `(0, 1]`, and
/// [`ValidationError::NonPositiveShape`] when the connectance is `0.5` or
/// above.
///
/// # Examples
/// ```
/// use ecogen_core::{NicheConfig, ValidationError, validate::validate_niche};
///
/// let settings = validate_niche(&NicheConfig::new(10, 0.1))?;
/// assert!((settings.shape() - 4.0).abs() < 1e-12);
///
/// let err = validate_niche(&NicheConfig::new(10, 0.6)).expect_err("shape is negative");
/// assert_eq!(err.field(), "connectance");
/// # Ok::<(), ValidationError>(())
/// ```
pub fn validate_niche(config: &NicheConfig) -> Validated<NicheSettings> {
    require_at_least("n_species", config.n_species(), MIN_NICHE_SPECIES)?;
    require_in("connectance", config.connectance(), Interval::OpenClosedUnit)?;
    let shape = beta_shape(config.connectance());
    if shape <= 0.0 {
        return Err(ValidationError::NonPositiveShape {
            connectance: config.connectance(),
            shape,
        });
    }
    Ok(NicheSettings {
        config: config.clone(),
        shape,
    })
}

/// Validates a stochastic-block-model configuration.
///
/// # Errors
/// Returns [`ValidationError::BelowMinimum`] when there are no nodes or
/// blocks, [`ValidationError::BlocksExceedSpecies`] when blocks outnumber
/// nodes, [`ValidationError::NotFinite`] or [`ValidationError::OutOfRange`]
/// for a reciprocal proportion outside `[0, 1]`, and the block-size,
/// baseline and species-attribute variants when explicit inputs are
/// inconsistent.
pub fn validate_sbm(config: &SbmConfig) -> Validated<SbmConfig> {
    require_at_least("n_species", config.n_species(), 1)?;
    require_at_least("n_blocks", config.n_blocks(), 1)?;
    if config.n_blocks() > config.n_species() {
        return Err(ValidationError::BlocksExceedSpecies {
            n_blocks: config.n_blocks(),
            n_species: config.n_species(),
        });
    }
    require_in(
        "reciprocal_proportion",
        config.reciprocal_proportion(),
        Interval::ClosedUnit,
    )?;
    if let BlockSizing::Explicit(sizes) = config.block_sizing() {
        validate_block_sizes(sizes, config.n_blocks(), config.n_species())?;
    }
    if let Some(baseline) = config.baseline() {
        validate_baseline(baseline, config.n_blocks())?;
    }
    if let Some(attributes) = config.species_attributes() {
        validate_species_attributes(attributes, config.n_species())?;
    }
    Ok(config.clone())
}

fn validate_block_sizes(sizes: &[usize], n_blocks: usize, n_species: usize) -> Validated<()> {
    if sizes.len() != n_blocks {
        return Err(ValidationError::BlockSizeCountMismatch {
            expected: n_blocks,
            got: sizes.len(),
        });
    }
    let total = sizes
        .iter()
        .try_fold(0_usize, |acc, &size| acc.checked_add(size))
        .unwrap_or(usize::MAX);
    if total != n_species {
        return Err(ValidationError::BlockSizeSumMismatch {
            expected: n_species,
            got: total,
        });
    }
    Ok(())
}

fn validate_baseline(baseline: &[Vec<f64>], n_blocks: usize) -> Validated<()> {
    let ragged = baseline.iter().find(|row| row.len() != n_blocks);
    if baseline.len() != n_blocks || ragged.is_some() {
        return Err(ValidationError::BaselineShapeMismatch {
            expected: n_blocks,
            rows: baseline.len(),
            columns: ragged.or_else(|| baseline.first()).map_or(0, Vec::len),
        });
    }
    for (row, values) in baseline.iter().enumerate() {
        for (column, &value) in values.iter().enumerate() {
            require_in("baseline", value, Interval::ClosedUnit)?;
            let mirror = baseline
                .get(column)
                .and_then(|other| other.get(row))
                .copied()
                .unwrap_or(f64::NAN);
            if (value - mirror).abs() > 1e-12 || mirror.is_nan() {
                return Err(ValidationError::AsymmetricBaseline { row, column });
            }
        }
    }
    Ok(())
}

fn validate_species_attributes(attributes: &[NodeAttributes], n_species: usize) -> Validated<()> {
    if attributes.len() != n_species {
        return Err(ValidationError::SpeciesAttributeCountMismatch {
            expected: n_species,
            got: attributes.len(),
        });
    }
    let Some(layout) = attributes.first() else {
        return Ok(());
    };
    for (node, values) in attributes.iter().enumerate() {
        if !layout.same_layout(values) {
            return Err(ValidationError::InconsistentAttributeLayout { node });
        }
        let finite = values.values().iter().all(|value| match value {
            AttributeValue::Numeric(v) => v.is_finite(),
            AttributeValue::Binary(_) => true,
        });
        if !finite {
            return Err(ValidationError::NotFinite {
                field: "species_attributes",
            });
        }
    }
    Ok(())
}

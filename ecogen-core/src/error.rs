//! Error types for the ecogen core library.
//!
//! Configuration problems surface as [`ValidationError`] before any randomness
//! is consumed; exhausted retry budgets and distribution failures surface as
//! [`GenerationError`]. [`EcoGenError`] wraps both for the public API.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A malformed model configuration, reported before generation starts.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A count field fell below its minimum.
    #[error("{field} must be at least {minimum} (got {got})")]
    BelowMinimum {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        got: usize,
        /// Smallest accepted value.
        minimum: usize,
    },
    /// A floating-point field lay outside its accepted interval.
    #[error("{field} must lie in {expected} (got {value})")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
        /// Human-readable accepted interval, e.g. `(0, 1]`.
        expected: &'static str,
    },
    /// A floating-point field was NaN or infinite.
    #[error("{field} must be finite")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The connectance is too high for a positive Beta shape parameter.
    #[error(
        "connectance {connectance} yields a non-positive beta shape parameter ({shape}); \
         connectance must be below 0.5"
    )]
    NonPositiveShape {
        /// Connectance supplied by the caller.
        connectance: f64,
        /// Derived shape parameter `1/(2C) - 1`.
        shape: f64,
    },
    /// More blocks were requested than there are nodes to fill them.
    #[error("n_blocks ({n_blocks}) must not exceed n_species ({n_species})")]
    BlocksExceedSpecies {
        /// Requested number of blocks.
        n_blocks: usize,
        /// Requested number of nodes.
        n_species: usize,
    },
    /// Explicit block sizes did not provide one entry per block.
    #[error("block_sizes has {got} entries but n_blocks is {expected}")]
    BlockSizeCountMismatch {
        /// Configured number of blocks.
        expected: usize,
        /// Number of sizes supplied.
        got: usize,
    },
    /// Explicit block sizes did not sum to the node count.
    #[error("block_sizes sum to {got} but n_species is {expected}")]
    BlockSizeSumMismatch {
        /// Configured number of nodes.
        expected: usize,
        /// Sum of the supplied sizes.
        got: usize,
    },
    /// A supplied baseline matrix was not `n_blocks x n_blocks`.
    #[error("baseline must be {expected}x{expected} (got {rows} rows, a row of {columns} columns)")]
    BaselineShapeMismatch {
        /// Configured number of blocks.
        expected: usize,
        /// Number of rows supplied.
        rows: usize,
        /// Width of the first row that did not match, or of the first row.
        columns: usize,
    },
    /// A supplied baseline matrix differed across its diagonal.
    #[error("baseline must be symmetric; entries ({row},{column}) and ({column},{row}) differ")]
    AsymmetricBaseline {
        /// Row of the mismatched entry.
        row: usize,
        /// Column of the mismatched entry.
        column: usize,
    },
    /// Supplied species attributes did not provide one vector per node.
    #[error("species_attributes has {got} entries but n_species is {expected}")]
    SpeciesAttributeCountMismatch {
        /// Configured number of nodes.
        expected: usize,
        /// Number of attribute vectors supplied.
        got: usize,
    },
    /// A supplied attribute vector differed in length or kinds from node 0.
    #[error("species_attributes for node {node} do not match the layout of node 0")]
    InconsistentAttributeLayout {
        /// First node whose vector differs.
        node: usize,
    },
}

impl ValidationError {
    /// Returns the name of the configuration field that failed validation.
    ///
    /// # Examples
    /// ```
    /// use ecogen_core::ValidationError;
    ///
    /// let err = ValidationError::NotFinite { field: "connectance" };
    /// assert_eq!(err.field(), "connectance");
    /// ```
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BelowMinimum { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotFinite { field } => *field,
            Self::NonPositiveShape { .. } => "connectance",
            Self::BlocksExceedSpecies { .. } => "n_blocks",
            Self::BlockSizeCountMismatch { .. } | Self::BlockSizeSumMismatch { .. } => {
                "block_sizes"
            }
            Self::BaselineShapeMismatch { .. } | Self::AsymmetricBaseline { .. } => "baseline",
            Self::SpeciesAttributeCountMismatch { .. }
            | Self::InconsistentAttributeLayout { .. } => "species_attributes",
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`ValidationError`] variants.
    enum ValidationErrorCode for ValidationError {
        /// A count field fell below its minimum.
        BelowMinimum => BelowMinimum { .. } => "VALIDATION_BELOW_MINIMUM",
        /// A floating-point field lay outside its accepted interval.
        OutOfRange => OutOfRange { .. } => "VALIDATION_OUT_OF_RANGE",
        /// A floating-point field was NaN or infinite.
        NotFinite => NotFinite { .. } => "VALIDATION_NOT_FINITE",
        /// The connectance is too high for a positive Beta shape parameter.
        NonPositiveShape => NonPositiveShape { .. } => "VALIDATION_NON_POSITIVE_SHAPE",
        /// More blocks were requested than there are nodes.
        BlocksExceedSpecies => BlocksExceedSpecies { .. } => "VALIDATION_BLOCKS_EXCEED_SPECIES",
        /// Explicit block sizes did not provide one entry per block.
        BlockSizeCountMismatch => BlockSizeCountMismatch { .. } => "VALIDATION_BLOCK_SIZE_COUNT",
        /// Explicit block sizes did not sum to the node count.
        BlockSizeSumMismatch => BlockSizeSumMismatch { .. } => "VALIDATION_BLOCK_SIZE_SUM",
        /// A supplied baseline matrix had the wrong shape.
        BaselineShapeMismatch => BaselineShapeMismatch { .. } => "VALIDATION_BASELINE_SHAPE",
        /// A supplied baseline matrix was not symmetric.
        AsymmetricBaseline => AsymmetricBaseline { .. } => "VALIDATION_BASELINE_ASYMMETRIC",
        /// Supplied species attributes did not cover every node.
        SpeciesAttributeCountMismatch => SpeciesAttributeCountMismatch { .. } => "VALIDATION_SPECIES_ATTRIBUTE_COUNT",
        /// Supplied attribute vectors did not share one layout.
        InconsistentAttributeLayout => InconsistentAttributeLayout { .. } => "VALIDATION_ATTRIBUTE_LAYOUT",
    }
}

/// A failure while drawing a graph from a validated configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// The niche model exhausted its retry budget.
    #[error(
        "connectance/connectivity not achieved after {attempts} attempts \
         (target connectance {target}, last realized {last_realized})"
    )]
    ConnectanceNotAchieved {
        /// Number of draws made before giving up.
        attempts: usize,
        /// Requested connectance.
        target: f64,
        /// Connectance of the final rejected draw.
        last_realized: f64,
    },
    /// A distribution rejected its parameters.
    #[error("invalid parameters for {distribution} distribution: {reason}")]
    InvalidDistribution {
        /// Distribution family being sampled.
        distribution: &'static str,
        /// Message reported by the distribution constructor.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The niche model exhausted its retry budget.
        ConnectanceNotAchieved => ConnectanceNotAchieved { .. } => "GENERATION_CONNECTANCE_NOT_ACHIEVED",
        /// A distribution rejected its parameters.
        InvalidDistribution => InvalidDistribution { .. } => "GENERATION_INVALID_DISTRIBUTION",
    }
}

/// Error type produced when constructing or running a generator.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EcoGenError {
    /// The configuration was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The draw could not be completed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

define_error_codes! {
    /// Stable codes describing [`EcoGenError`] variants.
    enum EcoGenErrorCode for EcoGenError {
        /// The configuration was rejected.
        Validation => Validation(..) => "ECOGEN_VALIDATION",
        /// The draw could not be completed.
        Generation => Generation(..) => "ECOGEN_GENERATION",
    }
}

impl EcoGenError {
    /// Retrieve the inner [`ValidationErrorCode`] when the configuration was rejected.
    #[must_use]
    pub const fn validation_code(&self) -> Option<ValidationErrorCode> {
        match self {
            Self::Validation(error) => Some(error.code()),
            Self::Generation(_) => None,
        }
    }

    /// Retrieve the inner [`GenerationErrorCode`] when the draw failed.
    #[must_use]
    pub const fn generation_code(&self) -> Option<GenerationErrorCode> {
        match self {
            Self::Generation(error) => Some(error.code()),
            Self::Validation(_) => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, EcoGenError>;

use ecogen_core::{
    EcoGenError, EcoGenErrorCode, GenerationError, GenerationErrorCode, ValidationError,
    ValidationErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(
    ValidationError::BelowMinimum { field: "n_species", got: 1, minimum: 2 },
    ValidationErrorCode::BelowMinimum,
    "VALIDATION_BELOW_MINIMUM",
)]
#[case(
    ValidationError::OutOfRange { field: "connectance", value: 1.5, expected: "(0, 1]" },
    ValidationErrorCode::OutOfRange,
    "VALIDATION_OUT_OF_RANGE",
)]
#[case(
    ValidationError::NotFinite { field: "reciprocal_proportion" },
    ValidationErrorCode::NotFinite,
    "VALIDATION_NOT_FINITE",
)]
#[case(
    ValidationError::NonPositiveShape { connectance: 0.5, shape: 0.0 },
    ValidationErrorCode::NonPositiveShape,
    "VALIDATION_NON_POSITIVE_SHAPE",
)]
#[case(
    ValidationError::BlocksExceedSpecies { n_blocks: 4, n_species: 3 },
    ValidationErrorCode::BlocksExceedSpecies,
    "VALIDATION_BLOCKS_EXCEED_SPECIES",
)]
#[case(
    ValidationError::BlockSizeCountMismatch { expected: 3, got: 2 },
    ValidationErrorCode::BlockSizeCountMismatch,
    "VALIDATION_BLOCK_SIZE_COUNT",
)]
#[case(
    ValidationError::BlockSizeSumMismatch { expected: 10, got: 9 },
    ValidationErrorCode::BlockSizeSumMismatch,
    "VALIDATION_BLOCK_SIZE_SUM",
)]
#[case(
    ValidationError::BaselineShapeMismatch { expected: 2, rows: 1, columns: 2 },
    ValidationErrorCode::BaselineShapeMismatch,
    "VALIDATION_BASELINE_SHAPE",
)]
#[case(
    ValidationError::AsymmetricBaseline { row: 0, column: 1 },
    ValidationErrorCode::AsymmetricBaseline,
    "VALIDATION_BASELINE_ASYMMETRIC",
)]
#[case(
    ValidationError::SpeciesAttributeCountMismatch { expected: 4, got: 3 },
    ValidationErrorCode::SpeciesAttributeCountMismatch,
    "VALIDATION_SPECIES_ATTRIBUTE_COUNT",
)]
#[case(
    ValidationError::InconsistentAttributeLayout { node: 2 },
    ValidationErrorCode::InconsistentAttributeLayout,
    "VALIDATION_ATTRIBUTE_LAYOUT",
)]
fn returns_expected_validation_code(
    #[case] error: ValidationError,
    #[case] expected: ValidationErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);

    let wrapped = EcoGenError::from(error);
    assert_eq!(wrapped.code(), EcoGenErrorCode::Validation);
    assert_eq!(wrapped.validation_code(), Some(expected));
    assert_eq!(wrapped.generation_code(), None);
}

#[rstest]
#[case(
    GenerationError::ConnectanceNotAchieved { attempts: 1_000, target: 0.1, last_realized: 0.25 },
    GenerationErrorCode::ConnectanceNotAchieved,
)]
#[case(
    GenerationError::InvalidDistribution { distribution: "beta", reason: "shape".to_owned() },
    GenerationErrorCode::InvalidDistribution,
)]
fn returns_expected_generation_code(
    #[case] error: GenerationError,
    #[case] expected: GenerationErrorCode,
) {
    assert_eq!(error.code(), expected);
    let wrapped = EcoGenError::from(error.clone());
    assert_eq!(wrapped.code(), EcoGenErrorCode::Generation);
    assert_eq!(wrapped.generation_code(), Some(expected));
    assert_eq!(wrapped.validation_code(), None);
    assert_eq!(wrapped.to_string(), error.to_string());
}

#[test]
fn exhausted_budget_message_names_the_failure() {
    let error = GenerationError::ConnectanceNotAchieved {
        attempts: 1_000,
        target: 0.1,
        last_realized: 0.25,
    };
    let message = error.to_string();
    assert!(message.starts_with("connectance/connectivity not achieved after 1000 attempts"));
    assert!(message.contains("target connectance 0.1"));
}

#[rstest]
#[case(ValidationError::NonPositiveShape { connectance: 0.6, shape: -0.1 }, "connectance")]
#[case(ValidationError::BlocksExceedSpecies { n_blocks: 4, n_species: 3 }, "n_blocks")]
#[case(ValidationError::BlockSizeSumMismatch { expected: 3, got: 4 }, "block_sizes")]
#[case(ValidationError::AsymmetricBaseline { row: 1, column: 0 }, "baseline")]
#[case(ValidationError::InconsistentAttributeLayout { node: 1 }, "species_attributes")]
fn validation_errors_name_their_field(#[case] error: ValidationError, #[case] field: &str) {
    assert_eq!(error.field(), field);
}

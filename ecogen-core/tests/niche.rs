use ecogen_core::{
    CONNECTANCE_TOLERANCE, EcoGenError, GenerationErrorCode, GraphGenerator, MAX_ATTEMPTS,
    NicheConfig, NicheModel, ValidationErrorCode,
};
use ecogen_test_support::recording::capture;
use rstest::{fixture, rstest};
use tracing::Level;

#[fixture]
fn model() -> NicheModel {
    NicheModel::from_parts(15, 0.15, Some(42)).expect("configuration must be valid")
}

#[rstest]
fn generate_records_niche_span(mut model: NicheModel) {
    let (result, layer) = capture(|| model.generate());
    let result = result.expect("generation must succeed");

    let span = layer.span("niche.generate").expect("niche.generate span must exist");
    assert_eq!(span.field("n_species"), Some("15"));
    assert_eq!(span.field("connectance"), Some("0.15"));
    assert_eq!(span.field("seed"), Some("42"));

    let accepted = layer.events_with_message("niche draw accepted");
    let event = accepted.first().expect("acceptance event must exist");
    assert_eq!(event.level, Level::INFO);
    let attempt = result.record().attempts().to_string();
    assert_eq!(event.field("attempt"), Some(attempt.as_str()));
    let rejected = layer.events_with_message("niche draw rejected").len();
    assert_eq!(rejected, result.record().attempts() - 1);
}

#[rstest]
fn exhausted_budget_warns_and_fails() {
    let mut model = NicheModel::from_parts(2, 0.1, Some(5)).expect("valid");
    let (result, layer) = capture(|| model.generate());
    let err = result.expect_err("target is unreachable");
    assert_eq!(err.generation_code(), Some(GenerationErrorCode::ConnectanceNotAchieved));

    assert!(layer.span("niche.generate").is_some());
    let warned = layer.events_with_message("niche retry budget exhausted");
    let warning = warned.first().expect("warning must be emitted");
    assert_eq!(warning.level, Level::WARN);
    assert_eq!(warning.field("attempts"), Some(MAX_ATTEMPTS.to_string().as_str()));
    assert!(
        layer
            .events_at(Level::ERROR)
            .iter()
            .any(|event| event.field("error").is_some_and(|e| e.contains("not achieved")))
    );
}

#[rstest]
#[case(1, 0.1, ValidationErrorCode::BelowMinimum)]
#[case(10, 0.0, ValidationErrorCode::OutOfRange)]
#[case(10, 0.5, ValidationErrorCode::NonPositiveShape)]
#[case(10, f64::INFINITY, ValidationErrorCode::NotFinite)]
fn invalid_configuration_fails_before_sampling(
    #[case] n_species: usize,
    #[case] connectance: f64,
    #[case] code: ValidationErrorCode,
) {
    let (result, layer) = capture(|| NicheModel::from_parts(n_species, connectance, Some(1)));
    let err = result.expect_err("configuration is invalid");
    assert!(matches!(err, EcoGenError::Validation(_)));
    assert_eq!(err.validation_code(), Some(code));
    assert!(layer.spans().is_empty());
}

#[rstest]
#[case(12, 0.2, 3)]
#[case(25, 0.12, 17)]
#[case(40, 0.25, 1234)]
fn same_seed_reproduces_the_web(#[case] n_species: usize, #[case] connectance: f64, #[case] seed: u64) {
    let config = NicheConfig::new(n_species, connectance).with_seed(seed);
    let first = NicheModel::new(config.clone())
        .and_then(|mut model| model.generate())
        .expect("generation must succeed");
    let second = NicheModel::new(config)
        .and_then(|mut model| model.generate())
        .expect("generation must succeed");
    assert_eq!(first, second);

    let record = first.record();
    assert_eq!(record.n_species(), n_species);
    assert!((record.target_connectance() - connectance).abs() < f64::EPSILON);
    assert!((record.tolerance() - CONNECTANCE_TOLERANCE).abs() < f64::EPSILON);
    assert!((record.realized_connectance() - first.graph().connectance()).abs() < f64::EPSILON);
}

#[test]
fn unseeded_model_reports_a_replayable_seed() {
    let mut model = NicheModel::from_parts(18, 0.18, None).expect("valid");
    let seed = model.seed();
    let drawn = model.generate().expect("generation must succeed");
    assert_eq!(drawn.record().seed(), seed);

    let replay = NicheModel::from_parts(18, 0.18, Some(seed))
        .and_then(|mut model| model.generate())
        .expect("generation must succeed");
    assert_eq!(replay, drawn);
}

#[test]
fn basal_species_eats_nothing() {
    let result = NicheModel::from_parts(30, 0.2, Some(8))
        .and_then(|mut model| model.generate())
        .expect("generation must succeed");
    let (graph, record) = result.into_parts();
    let basal = record.basal_species();
    assert_eq!(graph.out_degree(basal), 0);
    assert_eq!(record.species()[basal].range_width, 0.0);
    assert!(
        record
            .species()
            .iter()
            .all(|s| s.niche_value >= record.species()[basal].niche_value)
    );
}

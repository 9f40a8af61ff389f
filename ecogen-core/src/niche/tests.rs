//! Unit and property tests for the niche model.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{EcoGenError, error::GenerationErrorCode, test_utils::suite_proptest_config};

fn assignment(niche_value: f64, range_width: f64, range_center: f64) -> NicheAssignment {
    NicheAssignment {
        niche_value,
        range_width,
        range_center,
    }
}

fn generate(n_species: usize, connectance: f64, seed: u64) -> GraphResult<NicheRecord> {
    NicheModel::from_parts(n_species, connectance, Some(seed))
        .expect("configuration must be valid")
        .generate()
        .expect("generation must succeed")
}

#[test]
fn basal_species_is_the_minimum() {
    assert_eq!(basal_species(&[0.4, 0.1, 0.7, 0.2]), 1);
    assert_eq!(basal_species(&[0.3, 0.3]), 0);
    assert_eq!(basal_species(&[]), 0);
}

#[rstest]
#[case(0.5, true)]
#[case(0.375, true)]
#[case(0.625, true)]
#[case(0.37, false)]
#[case(0.63, false)]
fn feeding_range_is_closed(#[case] prey: f64, #[case] expected: bool) {
    let predator = assignment(0.9, 0.25, 0.5);
    assert_eq!(predator.feeds_on(prey), expected);
}

#[test]
fn zero_width_range_feeds_on_nothing() {
    let basal = assignment(0.1, 0.0, 0.05);
    assert!(!basal.feeds_on(0.05));
}

#[test]
fn web_links_predators_to_prey_and_permits_cannibalism() {
    let species = [
        assignment(0.1, 0.0, 0.05),
        assignment(0.5, 0.2, 0.15),
        assignment(0.9, 0.5, 0.6),
    ];
    let web = build_web(&species);
    let edges: Vec<_> = web.edges().map(|e| (e.source, e.target)).collect();
    // 1 eats 0; 2's range [0.35, 0.85] covers 1 (0.5) but not itself (0.9).
    assert_eq!(edges, vec![(1, 0), (2, 1)]);

    let cannibal = [assignment(0.2, 0.0, 0.1), assignment(0.6, 0.5, 0.4)];
    let web = build_web(&cannibal);
    assert!(web.contains(1, 1));
    assert!(web.contains(1, 0));
}

#[test]
fn identical_roles_are_detected_in_index_order() {
    let mut graph = DirectedGraph::with_nodes(4);
    graph.insert(2, 0);
    graph.insert(3, 0);
    graph.insert(1, 0);
    assert_eq!(first_identical_pair(&graph), Some((1, 2)));

    let mut distinct = DirectedGraph::with_nodes(2);
    distinct.insert(1, 0);
    assert_eq!(first_identical_pair(&distinct), None);
}

#[test]
fn assess_reports_rejection_reasons() {
    let model = NicheModel::from_parts(3, 0.25, Some(1)).expect("valid");
    let species = vec![
        assignment(0.1, 0.0, 0.05),
        assignment(0.5, 0.2, 0.15),
        assignment(0.9, 0.5, 0.6),
    ];
    let graph = build_web(&species);
    let draw = Draw {
        species,
        basal: 0,
        graph,
    };
    // Two edges over nine pairs: 0.222 is within 15% of 0.25.
    assert_eq!(model.assess(&draw), None);

    let sparse = Draw {
        species: draw.species.clone(),
        basal: 0,
        graph: DirectedGraph::with_nodes(3),
    };
    assert!(matches!(
        model.assess(&sparse),
        Some(Rejection::Connectance { .. })
    ));
}

#[test]
fn assess_rejects_isolated_non_basal_species() {
    let model = NicheModel::from_parts(4, 0.125, Some(1)).expect("valid");
    let mut graph = DirectedGraph::with_nodes(4);
    graph.insert(1, 0);
    graph.insert(3, 3);
    let draw = Draw {
        species: vec![assignment(0.1, 0.0, 0.05); 4],
        basal: 0,
        graph,
    };
    // Species 2 has no edges; species 3 only eats itself.
    assert_eq!(model.assess(&draw), Some(Rejection::Isolated { species: 2 }));
}

#[test]
fn unreachable_target_exhausts_the_retry_budget() {
    // With two species connectance moves in steps of 0.25, so 0.1 +/- 15% is
    // never hit.
    let mut model = NicheModel::from_parts(2, 0.1, Some(5)).expect("valid");
    let err = model.generate().expect_err("target is unreachable");
    assert_eq!(err.generation_code(), Some(GenerationErrorCode::ConnectanceNotAchieved));
    assert!(err.to_string().starts_with("connectance/connectivity not achieved"));
    match err {
        EcoGenError::Generation(GenerationError::ConnectanceNotAchieved {
            attempts, target, ..
        }) => {
            assert_eq!(attempts, MAX_ATTEMPTS);
            assert!((target - 0.1).abs() < f64::EPSILON);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn example_web_matches_documented_shape() {
    let result = generate(15, 0.15, 42);
    let record = result.record();
    assert_eq!(result.node_count(), 15);
    assert_eq!(record.species().len(), 15);
    assert!(record.attempts() >= 1 && record.attempts() <= MAX_ATTEMPTS);
    let edges = result.graph().edge_count() as f64;
    assert!((edges - 33.75).abs() <= 0.15 * 33.75, "edge count {edges}");
    assert!((record.shape() - (1.0 / 0.3 - 1.0)).abs() < 1e-12);
    assert_eq!(record.seed(), 42);
}

#[test]
fn distinct_roles_hold_when_requested() {
    let config = NicheConfig::new(20, 0.2)
        .with_seed(9)
        .with_distinct_trophic_roles(true);
    let result = NicheModel::new(config)
        .expect("valid")
        .generate()
        .expect("generation must succeed");
    assert!(result.record().distinct_trophic_roles());
    assert_eq!(first_identical_pair(result.graph()), None);
}

#[test]
fn successive_draws_continue_the_stream() {
    let mut model = NicheModel::from_parts(20, 0.2, Some(77)).expect("valid");
    let first = model.generate().expect("first draw");
    let second = model.generate().expect("second draw");
    assert_ne!(first.record().species(), second.record().species());
}

proptest! {
    #![proptest_config(suite_proptest_config(32))]

    #[test]
    fn accepted_webs_satisfy_niche_invariants(
        n_species in 15_usize..=35,
        connectance in 0.12_f64..=0.3,
        seed in any::<u64>(),
    ) {
        let result = generate(n_species, connectance, seed);
        let graph = result.graph();
        let record = result.record();

        prop_assert!((record.realized_connectance() - connectance).abs()
            <= CONNECTANCE_TOLERANCE * connectance);

        let zero_width: Vec<usize> = record
            .species()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.range_width == 0.0)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(zero_width, vec![record.basal_species()]);

        let basal_niche = record.species()[record.basal_species()].niche_value;
        for (index, species) in record.species().iter().enumerate() {
            prop_assert!(species.niche_value >= basal_niche);
            prop_assert!(species.lower() >= -1e-12);
            prop_assert!(species.range_center <= species.niche_value);
            if index != record.basal_species() {
                prop_assert!(!graph.is_isolated(index));
            }
        }
        prop_assert_eq!(graph.out_degree(record.basal_species()), 0);

        for (predator, p) in record.species().iter().enumerate() {
            for (prey, q) in record.species().iter().enumerate() {
                let in_range = p.range_width > 0.0
                    && p.lower() <= q.niche_value
                    && q.niche_value <= p.upper();
                prop_assert_eq!(graph.contains(predator, prey), in_range);
            }
        }
    }
}

//! Property-based checks over randomly generated undirected graphs.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use sixdeg_test_support::graphs::undirected_rows;

use crate::{
    ComparisonBuilder, ExecutionStrategy, SampleSet, Sampler, find_component, profile,
    test_utils::{graph_from_rows, suite_proptest_config},
};

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn component_is_closed_under_adjacency(rows in undirected_rows(24), pick in any::<prop::sample::Index>()) {
        let graph = graph_from_rows(rows);
        let start = pick.index(graph.len());
        let component = find_component(&graph, start).expect("start is in range");

        prop_assert!(component.contains(start));
        for member in component.iter() {
            for &neighbour in graph.neighbours(member) {
                prop_assert!(component.contains(neighbour));
            }
        }
        prop_assert!(component.members().windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn component_matches_breadth_first_reach(rows in undirected_rows(24), pick in any::<prop::sample::Index>()) {
        let graph = graph_from_rows(rows);
        let start = pick.index(graph.len());
        let component = find_component(&graph, start).expect("start is in range");
        let reached: Vec<_> = profile(&graph, start)
            .expect("start is in range")
            .distances()
            .iter()
            .map(|(node, _)| node)
            .collect();
        prop_assert_eq!(component.members(), reached.as_slice());
    }

    #[test]
    fn distances_are_shortest_hop_counts(rows in undirected_rows(24), pick in any::<prop::sample::Index>()) {
        let graph = graph_from_rows(rows);
        let start = pick.index(graph.len());
        let result = profile(&graph, start).expect("start is in range");
        let distances = result.distances();

        for (node, hops) in distances.iter() {
            for &neighbour in graph.neighbours(node) {
                let other = distances.get(neighbour);
                prop_assert!(other.is_some_and(|other| other.abs_diff(hops) <= 1));
            }
            if node != start {
                prop_assert!(
                    graph
                        .neighbours(node)
                        .iter()
                        .any(|&neighbour| distances.get(neighbour) == Some(hops - 1))
                );
            }
        }
    }

    #[test]
    fn repeated_components_agree(rows in undirected_rows(24), pick in any::<prop::sample::Index>()) {
        let graph = graph_from_rows(rows);
        let start = pick.index(graph.len());
        let first = find_component(&graph, start).expect("start is in range");
        let second = find_component(&graph, start).expect("start is in range");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn repeated_profiles_agree(rows in undirected_rows(24), pick in any::<prop::sample::Index>()) {
        let graph = graph_from_rows(rows);
        let start = pick.index(graph.len());
        let first = profile(&graph, start).expect("start is in range");
        let second = profile(&graph, start).expect("start is in range");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn shuffle_permutes_sample_without_reference(
        rows in undirected_rows(24),
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        let graph = graph_from_rows(rows);
        let reference = pick.index(graph.len());
        let component = find_component(&graph, reference).expect("reference is in range");
        let mut sample = SampleSet::from_component(&component, reference);
        prop_assert_eq!(sample.len(), component.len() - 1);

        Sampler::new(SmallRng::seed_from_u64(seed)).shuffle(&mut sample);
        prop_assert!(!sample.contains(reference));
        let mut sorted = sample.as_slice().to_vec();
        sorted.sort_unstable();
        let expected: Vec<_> = component.iter().filter(|&node| node != reference).collect();
        prop_assert_eq!(sorted, expected);
        prop_assert_eq!(sample.evaluation_prefix().len(), sample.len() / 2);
    }

    #[test]
    fn counters_stay_within_bounds(
        rows in undirected_rows(24),
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>(),
        baseline in 0.0_f64..6.0,
    ) {
        let graph = graph_from_rows(rows);
        let reference = pick.index(graph.len());
        let engine = ComparisonBuilder::new(reference, baseline)
            .build()
            .expect("baseline is valid");
        let report = engine
            .run(&graph, &mut Sampler::seeded(seed))
            .expect("reference is in range");
        let (better, evaluated, sample) = report.counters().as_triple();
        prop_assert!(better <= evaluated);
        prop_assert_eq!(evaluated, sample / 2);
        prop_assert_eq!(sample + 1, report.component_size());
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn parallel_evaluation_matches_sequential(
        rows in undirected_rows(32),
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>(),
        baseline in 0.0_f64..6.0,
    ) {
        let graph = graph_from_rows(rows);
        let reference = pick.index(graph.len());
        let builder = ComparisonBuilder::new(reference, baseline);
        let sequential = builder
            .clone()
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .build()
            .expect("baseline is valid")
            .run(&graph, &mut Sampler::seeded(seed))
            .expect("reference is in range");
        let parallel = builder
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect("baseline is valid")
            .run(&graph, &mut Sampler::seeded(seed))
            .expect("reference is in range");
        prop_assert_eq!(sequential, parallel);
    }
}

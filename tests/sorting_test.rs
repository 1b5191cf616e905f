// Integration tests for the sorting engines

use algoviz::engine::sorting::{self, SortAlgorithm};
use algoviz::engine::RunContext;
use algoviz::step::{Apply, Step};
use algoviz::structures::ArrayBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run `algorithm` to completion, replaying every step onto a copy of `values`
fn sort_by_replay(values: &[i64], algorithm: SortAlgorithm) -> (Vec<i64>, Vec<Step>) {
    let mut array = ArrayBuffer::from_values(values.to_vec());
    let steps: Vec<Step> = sorting::run(&array, algorithm, RunContext::new()).collect();
    for step in &steps {
        array.apply(step);
    }
    (array.values().to_vec(), steps)
}

#[test]
fn test_every_sort_yields_sorted_permutation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..60 {
        let len = rng.random_range(0..40);
        let values: Vec<i64> = (0..len).map(|_| rng.random_range(-20..20)).collect();
        let mut expected = values.clone();
        expected.sort();
        for algorithm in SortAlgorithm::ALL {
            let (sorted, _) = sort_by_replay(&values, algorithm);
            assert_eq!(
                sorted, expected,
                "{:?} failed on round {} input {:?}",
                algorithm, round, values
            );
        }
    }
}

#[test]
fn test_bubble_sort_scenario() {
    let (sorted, steps) = sort_by_replay(&[5, 3, 8, 1], SortAlgorithm::Bubble);
    assert_eq!(sorted, vec![1, 3, 5, 8]);
    assert_eq!(steps[0], Step::compare(0, 1));
    assert_eq!(steps[1], Step::swap(0, 1));

    // No early exit: n(n-1)/2 comparisons even though the last pass is clean
    let compares = steps
        .iter()
        .filter(|s| matches!(s, Step::Compare { .. }))
        .count();
    assert_eq!(compares, 6, "steps: {:?}", steps);
}

#[test]
fn test_trivial_inputs_produce_no_swaps() {
    for algorithm in SortAlgorithm::ALL {
        for values in [vec![], vec![42], vec![7, 7, 7, 7]] {
            let (sorted, steps) = sort_by_replay(&values, algorithm);
            assert_eq!(sorted, values);
            assert!(
                !steps.iter().any(|s| matches!(s, Step::Swap { .. })),
                "{:?} swapped equal elements: {:?}",
                algorithm,
                steps
            );
        }
    }
}

#[test]
fn test_indices_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(11);
    let values: Vec<i64> = (0..25).map(|_| rng.random_range(0..100)).collect();
    for algorithm in SortAlgorithm::ALL {
        let (_, steps) = sort_by_replay(&values, algorithm);
        for step in steps {
            let ok = match step {
                Step::Compare { i, .. } => i < values.len(),
                Step::Swap { i, j } => i < values.len() && j < values.len(),
                Step::SetValue { index, .. } | Step::MarkSorted { index } => index < values.len(),
                _ => true,
            };
            assert!(ok, "{:?} emitted out-of-range step {:?}", algorithm, step);
        }
    }
}

#[test]
fn test_cancelled_sort_stops_and_keeps_multiset() {
    let values = vec![9, 4, 7, 1, 8, 2, 6, 3, 5];
    for algorithm in SortAlgorithm::ALL {
        let mut array = ArrayBuffer::from_values(values.clone());
        let context = RunContext::new();
        let mut sequence = sorting::run(&array, algorithm, context.clone());
        for step in sequence.by_ref().take(5) {
            array.apply(&step);
        }
        context.cancel();
        assert_eq!(sequence.next(), None, "{:?} kept going after cancel", algorithm);

        let mut left = array.values().to_vec();
        left.sort();
        assert_eq!(left, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }
}

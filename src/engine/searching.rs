// Search engines over an array buffer

use super::{Engine, RunContext, StepSequence};
use crate::step::Step;
use crate::structures::ArrayBuffer;
use clap::ValueEnum;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchAlgorithm {
    Linear,
    /// Expects the array sorted ascending
    Binary,
}

impl SearchAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "Linear Search",
            SearchAlgorithm::Binary => "Binary Search",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SearchAlgorithm::Linear => SearchAlgorithm::Binary,
            SearchAlgorithm::Binary => SearchAlgorithm::Linear,
        }
    }
}

/// Steps that look for `target` in `array`
pub fn run(
    array: &ArrayBuffer,
    algorithm: SearchAlgorithm,
    target: i64,
    context: RunContext,
) -> StepSequence {
    let values = array.values().to_vec();
    match algorithm {
        SearchAlgorithm::Linear => StepSequence::new(
            LinearSearch {
                a: values,
                target,
                i: 0,
            },
            context,
        ),
        SearchAlgorithm::Binary => {
            let right = values.len();
            StepSequence::new(
                BinarySearch {
                    a: values,
                    target,
                    left: 0,
                    right,
                },
                context,
            )
        }
    }
}

struct LinearSearch {
    a: Vec<i64>,
    target: i64,
    i: usize,
}

impl Engine for LinearSearch {
    fn name(&self) -> &'static str {
        "linear search"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        let Some(&value) = self.a.get(self.i) else {
            out.push_back(Step::NotFound);
            return false;
        };
        out.push_back(Step::compare_value(self.i, self.target));
        if value == self.target {
            out.push_back(Step::Found { index: self.i });
            return false;
        }
        self.i += 1;
        true
    }
}

/// Bracket is `left..right`, right exclusive
struct BinarySearch {
    a: Vec<i64>,
    target: i64,
    left: usize,
    right: usize,
}

impl Engine for BinarySearch {
    fn name(&self) -> &'static str {
        "binary search"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if self.left >= self.right {
            out.push_back(Step::NotFound);
            return false;
        }

        let hi = self.right - 1;
        let mid = self.left + (hi - self.left) / 2;
        out.push_back(Step::RangeUpdate { lo: self.left, hi });
        out.push_back(Step::compare_value(mid, self.target));

        match self.a[mid].cmp(&self.target) {
            std::cmp::Ordering::Equal => {
                out.push_back(Step::Found { index: mid });
                false
            }
            std::cmp::Ordering::Less => {
                self.left = mid + 1;
                true
            }
            std::cmp::Ordering::Greater => {
                self.right = mid;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(values: &[i64], algorithm: SearchAlgorithm, target: i64) -> Vec<Step> {
        let array = ArrayBuffer::from_values(values.to_vec());
        run(&array, algorithm, target, RunContext::new()).collect()
    }

    #[test]
    fn test_linear_finds_first_occurrence() {
        let steps = search(&[4, 2, 7, 2], SearchAlgorithm::Linear, 2);
        assert_eq!(steps.last(), Some(&Step::Found { index: 1 }));
    }

    #[test]
    fn test_linear_miss_compares_everything() {
        let steps = search(&[4, 2, 7], SearchAlgorithm::Linear, 9);
        let compares = steps
            .iter()
            .filter(|s| matches!(s, Step::Compare { .. }))
            .count();
        assert_eq!(compares, 3);
        assert_eq!(steps.last(), Some(&Step::NotFound));
    }

    #[test]
    fn test_binary_emits_range_before_compare() {
        let steps = search(&[1, 3, 5, 7, 9, 11, 13], SearchAlgorithm::Binary, 11);
        assert_eq!(steps[0], Step::RangeUpdate { lo: 0, hi: 6 });
        assert_eq!(steps[1], Step::compare_value(3, 11));
        assert_eq!(steps[2], Step::RangeUpdate { lo: 4, hi: 6 });
        assert_eq!(steps.last(), Some(&Step::Found { index: 5 }));
    }

    #[test]
    fn test_binary_on_empty_array() {
        assert_eq!(
            search(&[], SearchAlgorithm::Binary, 1),
            vec![Step::NotFound]
        );
    }
}

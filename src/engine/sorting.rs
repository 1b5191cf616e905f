//! Sorting engines
//!
//! Every engine sorts ascending and swaps only on a strict comparison, so
//! equal elements never trade places through a swap. Merge sort is stable.
//! Merge and quick sort keep their recursion on an explicit work-list.

use super::{Engine, RunContext, StepSequence};
use crate::structures::ArrayBuffer;
use crate::step::Step;
use clap::ValueEnum;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Heap => "Heap Sort",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Steps that sort `array` with `algorithm`
pub fn run(array: &ArrayBuffer, algorithm: SortAlgorithm, context: RunContext) -> StepSequence {
    let values = array.values().to_vec();
    match algorithm {
        SortAlgorithm::Bubble => StepSequence::new(Bubble::new(values), context),
        SortAlgorithm::Selection => StepSequence::new(Selection::new(values), context),
        SortAlgorithm::Insertion => StepSequence::new(Insertion::new(values), context),
        SortAlgorithm::Merge => StepSequence::new(Merge::new(values), context),
        SortAlgorithm::Quick => StepSequence::new(Quick::new(values), context),
        SortAlgorithm::Heap => StepSequence::new(HeapSort::new(values), context),
    }
}

/// Full n-1 passes, one comparison per advance
struct Bubble {
    a: Vec<i64>,
    pass: usize,
    j: usize,
}

impl Bubble {
    fn new(a: Vec<i64>) -> Self {
        Bubble { a, pass: 0, j: 0 }
    }
}

impl Engine for Bubble {
    fn name(&self) -> &'static str {
        "bubble sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        let n = self.a.len();
        if self.pass + 1 >= n {
            if n > 0 {
                out.push_back(Step::MarkSorted { index: 0 });
            }
            return false;
        }

        let j = self.j;
        out.push_back(Step::compare(j, j + 1));
        if self.a[j] > self.a[j + 1] {
            self.a.swap(j, j + 1);
            out.push_back(Step::swap(j, j + 1));
        }

        self.j += 1;
        let settled = n - 1 - self.pass;
        if self.j >= settled {
            out.push_back(Step::MarkSorted { index: settled });
            self.pass += 1;
            self.j = 0;
        }
        true
    }
}

/// Scan the unsorted suffix for its minimum
struct Selection {
    a: Vec<i64>,
    i: usize,
    j: usize,
    min: usize,
}

impl Selection {
    fn new(a: Vec<i64>) -> Self {
        Selection {
            a,
            i: 0,
            j: 0,
            min: 0,
        }
    }
}

impl Engine for Selection {
    fn name(&self) -> &'static str {
        "selection sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        let n = self.a.len();
        if self.i + 1 >= n {
            if n > 0 {
                out.push_back(Step::MarkSorted { index: n - 1 });
            }
            return false;
        }

        // Pass start
        if self.j == self.i {
            self.min = self.i;
            self.j = self.i + 1;
            out.push_back(Step::MarkCurrent { index: self.i });
            return true;
        }

        out.push_back(Step::compare(self.j, self.min));
        if self.a[self.j] < self.a[self.min] {
            self.min = self.j;
            out.push_back(Step::MarkCurrent { index: self.j });
        }
        self.j += 1;

        if self.j == n {
            if self.min != self.i {
                self.a.swap(self.i, self.min);
                out.push_back(Step::swap(self.i, self.min));
            }
            out.push_back(Step::MarkSorted { index: self.i });
            self.i += 1;
            self.j = self.i;
        }
        true
    }
}

/// Shift larger elements right, then drop the key into the hole
struct Insertion {
    a: Vec<i64>,
    i: usize,
    hole: Option<usize>,
    key: i64,
}

impl Insertion {
    fn new(a: Vec<i64>) -> Self {
        Insertion {
            a,
            i: 0,
            hole: None,
            key: 0,
        }
    }
}

impl Engine for Insertion {
    fn name(&self) -> &'static str {
        "insertion sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        let n = self.a.len();
        if self.i == 0 {
            if n == 0 {
                return false;
            }
            out.push_back(Step::MarkSorted { index: 0 });
            self.i = 1;
            return n > 1;
        }
        if self.i >= n {
            return false;
        }

        let Some(hole) = self.hole else {
            self.key = self.a[self.i];
            self.hole = Some(self.i);
            out.push_back(Step::MarkCurrent { index: self.i });
            return true;
        };

        if hole > 0 {
            out.push_back(Step::compare_value(hole - 1, self.key));
            if self.a[hole - 1] > self.key {
                let shifted = self.a[hole - 1];
                self.a[hole] = shifted;
                out.push_back(Step::SetValue {
                    index: hole,
                    value: shifted,
                });
                self.hole = Some(hole - 1);
                return true;
            }
        }

        if hole != self.i {
            self.a[hole] = self.key;
            out.push_back(Step::SetValue {
                index: hole,
                value: self.key,
            });
        }
        out.extend((0..=self.i).map(|index| Step::MarkSorted { index }));
        self.hole = None;
        self.i += 1;
        self.i < n
    }
}

#[derive(Debug, Clone, Copy)]
enum MergeTask {
    Sort { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// Merge in progress: copies of both halves and the output cursor
struct Merging {
    mid: usize,
    left: Vec<i64>,
    right: Vec<i64>,
    li: usize,
    ri: usize,
    k: usize,
}

/// Top-down merge sort with the recursion on a work-list
struct Merge {
    a: Vec<i64>,
    tasks: Vec<MergeTask>,
    active: Option<Merging>,
}

impl Merge {
    fn new(a: Vec<i64>) -> Self {
        let tasks = match a.len() {
            0 => Vec::new(),
            n => vec![MergeTask::Sort { lo: 0, hi: n - 1 }],
        };
        Merge {
            a,
            tasks,
            active: None,
        }
    }

    /// Place one element of the active merge; `false` when the merge is done
    fn merge_one(&mut self, out: &mut VecDeque<Step>) -> bool {
        let Some(m) = self.active.as_mut() else {
            return false;
        };
        let value = match (m.left.get(m.li), m.right.get(m.ri)) {
            (Some(&l), Some(&r)) => {
                // The right half's next element is still at its original index
                out.push_back(Step::compare_value(m.mid + 1 + m.ri, l));
                if l <= r {
                    m.li += 1;
                    l
                } else {
                    m.ri += 1;
                    r
                }
            }
            (Some(&l), None) => {
                m.li += 1;
                l
            }
            (None, Some(&r)) => {
                m.ri += 1;
                r
            }
            (None, None) => return false,
        };
        let k = m.k;
        m.k += 1;
        out.push_back(Step::MarkCurrent { index: k });
        if self.a[k] != value {
            self.a[k] = value;
            out.push_back(Step::SetValue { index: k, value });
        }
        true
    }
}

impl Engine for Merge {
    fn name(&self) -> &'static str {
        "merge sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if self.active.is_some() {
            if self.merge_one(out) {
                return true;
            }
            self.active = None;
        }

        while let Some(task) = self.tasks.pop() {
            match task {
                MergeTask::Sort { lo, hi } if lo < hi => {
                    let mid = (lo + hi) / 2;
                    self.tasks.push(MergeTask::Merge { lo, mid, hi });
                    self.tasks.push(MergeTask::Sort { lo: mid + 1, hi });
                    self.tasks.push(MergeTask::Sort { lo, hi: mid });
                }
                MergeTask::Sort { .. } => {}
                MergeTask::Merge { lo, mid, hi } => {
                    out.push_back(Step::RangeUpdate { lo, hi });
                    self.active = Some(Merging {
                        mid,
                        left: self.a[lo..=mid].to_vec(),
                        right: self.a[mid + 1..=hi].to_vec(),
                        li: 0,
                        ri: 0,
                        k: lo,
                    });
                    return true;
                }
            }
        }

        let n = self.a.len();
        out.extend((0..n).map(|index| Step::MarkSorted { index }));
        false
    }
}

/// Lomuto partition in progress over `lo..=hi`, pivot at `hi`
struct Partition {
    lo: usize,
    hi: usize,
    store: usize,
    j: usize,
}

/// Quick sort with pending ranges on a work-list
struct Quick {
    a: Vec<i64>,
    ranges: Vec<(usize, usize)>,
    active: Option<Partition>,
}

impl Quick {
    fn new(a: Vec<i64>) -> Self {
        let ranges = match a.len() {
            0 => Vec::new(),
            n => vec![(0, n - 1)],
        };
        Quick {
            a,
            ranges,
            active: None,
        }
    }
}

impl Engine for Quick {
    fn name(&self) -> &'static str {
        "quick sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        let Some(p) = self.active.as_mut() else {
            let Some((lo, hi)) = self.ranges.pop() else {
                return false;
            };
            if lo == hi {
                out.push_back(Step::MarkSorted { index: lo });
            } else {
                out.push_back(Step::MarkCurrent { index: hi });
                out.push_back(Step::RangeUpdate { lo, hi });
                self.active = Some(Partition {
                    lo,
                    hi,
                    store: lo,
                    j: lo,
                });
            }
            return true;
        };

        if p.j < p.hi {
            out.push_back(Step::compare(p.j, p.hi));
            if self.a[p.j] < self.a[p.hi] {
                if p.store != p.j {
                    self.a.swap(p.store, p.j);
                    out.push_back(Step::swap(p.store, p.j));
                }
                p.store += 1;
            }
            p.j += 1;
            return true;
        }

        let Partition { lo, hi, store, .. } = *p;
        if self.a[store] != self.a[hi] {
            self.a.swap(store, hi);
            out.push_back(Step::swap(store, hi));
        }
        out.push_back(Step::MarkSorted { index: store });
        self.active = None;
        // Right pushed first so the left range is handled first
        if store < hi {
            self.ranges.push((store + 1, hi));
        }
        if store > lo {
            self.ranges.push((lo, store - 1));
        }
        true
    }
}

/// Heap sort: bottom-up max-heap build, then repeated root extraction
struct HeapSort {
    a: Vec<i64>,
    build_next: Option<usize>,
    end: usize,
    sift: Option<(usize, usize)>,
}

impl HeapSort {
    fn new(a: Vec<i64>) -> Self {
        let n = a.len();
        HeapSort {
            a,
            build_next: (n / 2).checked_sub(1),
            end: n,
            sift: None,
        }
    }

    /// One level of sift-down for node `i` within `..end`
    fn sift_level(&mut self, i: usize, end: usize, out: &mut VecDeque<Step>) {
        let mut largest = i;
        for child in [2 * i + 1, 2 * i + 2] {
            if child < end {
                out.push_back(Step::compare(child, largest));
                if self.a[child] > self.a[largest] {
                    largest = child;
                }
            }
        }
        if largest != i {
            self.a.swap(i, largest);
            out.push_back(Step::swap(i, largest));
            self.sift = Some((largest, end));
        } else {
            self.sift = None;
        }
    }
}

impl Engine for HeapSort {
    fn name(&self) -> &'static str {
        "heap sort"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if let Some((i, end)) = self.sift {
            self.sift_level(i, end, out);
            return true;
        }

        if let Some(i) = self.build_next {
            self.build_next = i.checked_sub(1);
            self.sift = Some((i, self.a.len()));
            return true;
        }

        if self.end > 1 {
            self.end -= 1;
            if self.a[0] != self.a[self.end] {
                self.a.swap(0, self.end);
                out.push_back(Step::swap(0, self.end));
            }
            out.push_back(Step::MarkSorted { index: self.end });
            self.sift = Some((0, self.end));
            return true;
        }

        if self.end == 1 {
            out.push_back(Step::MarkSorted { index: 0 });
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Apply;

    fn sorted_by(values: &[i64], algorithm: SortAlgorithm) -> (Vec<i64>, Vec<Step>) {
        let mut array = ArrayBuffer::from_values(values.to_vec());
        let steps: Vec<Step> = run(&array, algorithm, RunContext::new()).collect();
        for step in &steps {
            array.apply(step);
        }
        (array.values().to_vec(), steps)
    }

    #[test]
    fn test_bubble_scenario() {
        let (result, steps) = sorted_by(&[5, 3, 8, 1], SortAlgorithm::Bubble);
        assert_eq!(steps[0], Step::compare(0, 1));
        assert_eq!(steps[1], Step::swap(0, 1));
        assert_eq!(result, vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_bubble_never_exits_early() {
        let (_, steps) = sorted_by(&[1, 2, 3, 4, 5], SortAlgorithm::Bubble);
        let compares = steps
            .iter()
            .filter(|s| matches!(s, Step::Compare { .. }))
            .count();
        assert_eq!(compares, 10);
        assert!(!steps.iter().any(|s| matches!(s, Step::Swap { .. })));
    }

    #[test]
    fn test_selection_skips_self_swap() {
        let (result, steps) = sorted_by(&[1, 3, 2], SortAlgorithm::Selection);
        assert_eq!(result, vec![1, 2, 3]);
        let swaps: Vec<_> = steps
            .iter()
            .filter(|s| matches!(s, Step::Swap { .. }))
            .collect();
        assert_eq!(swaps, vec![&Step::swap(1, 2)]);
    }

    #[test]
    fn test_quick_never_swaps_in_place() {
        let (result, steps) = sorted_by(&[4, 1, 3, 9, 7], SortAlgorithm::Quick);
        assert_eq!(result, vec![1, 3, 4, 7, 9]);
        assert!(steps
            .iter()
            .all(|s| !matches!(s, Step::Swap { i, j } if i == j)));
    }

    #[test]
    fn test_trivial_inputs() {
        for algorithm in SortAlgorithm::ALL {
            let (empty, steps) = sorted_by(&[], algorithm);
            assert!(empty.is_empty());
            assert!(steps.is_empty(), "{:?} produced {:?}", algorithm, steps);

            let (single, _) = sorted_by(&[42], algorithm);
            assert_eq!(single, vec![42]);

            let (equal, steps) = sorted_by(&[7, 7, 7, 7], algorithm);
            assert_eq!(equal, vec![7, 7, 7, 7]);
            assert!(
                !steps.iter().any(|s| matches!(s, Step::Swap { .. })),
                "{:?} swapped equal elements",
                algorithm
            );
        }
    }

    #[test]
    fn test_every_sort_marks_every_index() {
        let values = [9, 4, 7, 1, 8, 2, 6];
        for algorithm in SortAlgorithm::ALL {
            let (_, steps) = sorted_by(&values, algorithm);
            for index in 0..values.len() {
                assert!(
                    steps.contains(&Step::MarkSorted { index }),
                    "{:?} never marked {}",
                    algorithm,
                    index
                );
            }
        }
    }

    #[test]
    fn test_algorithm_cycle() {
        let mut algorithm = SortAlgorithm::Bubble;
        for _ in 0..SortAlgorithm::ALL.len() {
            algorithm = algorithm.next();
        }
        assert_eq!(algorithm, SortAlgorithm::Bubble);
    }
}

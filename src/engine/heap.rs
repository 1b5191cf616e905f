//! Heap engine
//!
//! Sift-up and sift-down advance one level per call, so every compare/swap
//! pair can be paced on its own.

use super::{Engine, EngineError, RunContext, StepSequence};
use crate::step::{Item, Site, Step};
use crate::structures::heap::{left, parent, right, BinaryHeap, HeapKind};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
enum Sift {
    Up(usize),
    Down(usize),
    Done,
}

struct HeapRun {
    name: &'static str,
    kind: HeapKind,
    values: Vec<i64>,
    /// Structural steps delivered before any sifting
    prelude: Vec<Step>,
    sift: Sift,
}

impl HeapRun {
    fn sift_up(&mut self, i: usize, out: &mut VecDeque<Step>) -> Sift {
        if i == 0 {
            return Sift::Done;
        }
        let p = parent(i);
        out.push_back(Step::compare(i, p));
        if self.kind.outranks(self.values[i], self.values[p]) {
            self.values.swap(i, p);
            out.push_back(Step::swap(i, p));
            Sift::Up(p)
        } else {
            Sift::Done
        }
    }

    fn sift_down(&mut self, i: usize, out: &mut VecDeque<Step>) -> Sift {
        let mut target = i;
        for child in [left(i), right(i)] {
            if child < self.values.len() {
                out.push_back(Step::compare(child, target));
                if self.kind.outranks(self.values[child], self.values[target]) {
                    target = child;
                }
            }
        }
        if target == i {
            return Sift::Done;
        }
        self.values.swap(i, target);
        out.push_back(Step::swap(i, target));
        Sift::Down(target)
    }
}

impl Engine for HeapRun {
    fn name(&self) -> &'static str {
        self.name
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if !self.prelude.is_empty() {
            out.extend(self.prelude.drain(..));
            return !matches!(self.sift, Sift::Done);
        }
        self.sift = match self.sift {
            Sift::Up(i) => self.sift_up(i, out),
            Sift::Down(i) => self.sift_down(i, out),
            Sift::Done => return false,
        };
        !matches!(self.sift, Sift::Done)
    }
}

/// Append `value` and sift it up
pub fn insert(heap: &BinaryHeap, value: i64, context: RunContext) -> StepSequence {
    let mut values = heap.values().to_vec();
    let index = values.len();
    values.push(value);
    StepSequence::new(
        HeapRun {
            name: "heap insert",
            kind: heap.kind(),
            values,
            prelude: vec![Step::StructuralInsert {
                site: Site::Index(index),
                item: Item::Value(value),
            }],
            sift: Sift::Up(index),
        },
        context,
    )
}

/// Move the last element to the root, shrink, then sift down
pub fn delete_root(heap: &BinaryHeap, context: RunContext) -> Result<StepSequence, EngineError> {
    let mut values = heap.values().to_vec();
    let last_index = values.len().checked_sub(1).ok_or(EngineError::EmptyStructure {
        structure: "heap",
        operation: "delete root",
    })?;

    let (prelude, sift) = if last_index == 0 {
        let root = values.remove(0);
        (
            vec![Step::StructuralDelete {
                site: Site::Index(0),
                item: Item::Value(root),
            }],
            Sift::Done,
        )
    } else {
        let last = values.remove(last_index);
        values[0] = last;
        (
            vec![
                Step::SetValue {
                    index: 0,
                    value: last,
                },
                Step::StructuralDelete {
                    site: Site::Index(last_index),
                    item: Item::Value(last),
                },
            ],
            Sift::Down(0),
        )
    };

    Ok(StepSequence::new(
        HeapRun {
            name: "heap delete root",
            kind: heap.kind(),
            values,
            prelude,
            sift,
        },
        context,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Apply;

    fn replay(heap: &mut BinaryHeap, steps: StepSequence) -> Vec<Step> {
        let steps: Vec<_> = steps.collect();
        for step in &steps {
            heap.apply(step);
        }
        steps
    }

    #[test]
    fn test_stepped_inserts_match_direct() {
        let mut stepped = BinaryHeap::new(HeapKind::Max);
        for value in [3, 1, 4, 1, 5] {
            let seq = insert(&stepped, value, RunContext::new());
            replay(&mut stepped, seq);
            assert!(stepped.is_valid());
        }
        let direct = BinaryHeap::from_values(HeapKind::Max, &[3, 1, 4, 1, 5]);
        assert_eq!(stepped.values(), direct.values());
        assert_eq!(stepped.peek(), Some(5));
    }

    #[test]
    fn test_stepped_delete_root() {
        let mut heap = BinaryHeap::from_values(HeapKind::Min, &[8, 3, 6, 1, 9]);
        let mut direct = heap.clone();
        direct.delete_root().expect("not empty");

        let seq = delete_root(&heap, RunContext::new()).expect("not empty");
        let steps = replay(&mut heap, seq);
        assert_eq!(heap.values(), direct.values());
        assert!(heap.is_valid());
        assert!(steps.iter().any(|s| matches!(s, Step::Swap { .. })));
    }

    #[test]
    fn test_delete_singleton_and_empty() {
        let mut heap = BinaryHeap::from_values(HeapKind::Max, &[4]);
        let seq = delete_root(&heap, RunContext::new()).expect("not empty");
        replay(&mut heap, seq);
        assert!(heap.is_empty());
        assert!(matches!(
            delete_root(&heap, RunContext::new()),
            Err(EngineError::EmptyStructure { .. })
        ));
    }
}

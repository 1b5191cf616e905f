//! BST engine
//!
//! Insert and delete are atomic: the steps walk the search path with
//! `MarkCurrent` and end in a single structural change. Search walks the same
//! path and ends in `Found` or `NotFound`. Traversals emit one `MarkCurrent`
//! per node and never touch the tree.

use super::{Engine, RunContext, StepSequence};
use crate::step::{Item, Site, Step};
use crate::structures::bst::{Bst, InsertOutcome, TraversalOrder, Walk};
use std::collections::VecDeque;

/// Walk the search path, then report the single outcome
struct PathThen {
    name: &'static str,
    path: VecDeque<usize>,
    outcome: Option<Step>,
}

impl Engine for PathThen {
    fn name(&self) -> &'static str {
        self.name
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if let Some(index) = self.path.pop_front() {
            out.push_back(Step::MarkCurrent { index });
            return true;
        }
        out.extend(self.outcome.take());
        false
    }
}

/// Insert `value`; a duplicate only walks the path
pub fn insert(tree: &Bst, value: i64, context: RunContext) -> StepSequence {
    let mut shadow = tree.clone();
    let path = tree.search_path(value).into_iter().map(|id| id.index()).collect();
    let outcome = match shadow.insert(value) {
        InsertOutcome::Inserted(id) => Some(Step::StructuralInsert {
            site: Site::Node(id.index()),
            item: Item::Value(value),
        }),
        InsertOutcome::Duplicate(_) => None,
    };
    StepSequence::new(
        PathThen {
            name: "bst insert",
            path,
            outcome,
        },
        context,
    )
}

/// Delete `value`, ending in `NotFound` when it is absent
pub fn delete(tree: &Bst, value: i64, context: RunContext) -> StepSequence {
    let path = tree.search_path(value).into_iter().map(|id| id.index()).collect();
    let outcome = match tree.find(value) {
        Some(id) => Step::StructuralDelete {
            site: Site::Node(id.index()),
            item: Item::Value(value),
        },
        None => Step::NotFound,
    };
    StepSequence::new(
        PathThen {
            name: "bst delete",
            path,
            outcome: Some(outcome),
        },
        context,
    )
}

/// Walk towards `value`, ending in `Found` or `NotFound`
pub fn search(tree: &Bst, value: i64, context: RunContext) -> StepSequence {
    let path = tree.search_path(value).into_iter().map(|id| id.index()).collect();
    let outcome = match tree.find(value) {
        Some(id) => Step::Found { index: id.index() },
        None => Step::NotFound,
    };
    StepSequence::new(
        PathThen {
            name: "bst search",
            path,
            outcome: Some(outcome),
        },
        context,
    )
}

struct Traversal {
    tree: Bst,
    walk: Walk,
}

impl Engine for Traversal {
    fn name(&self) -> &'static str {
        "bst traversal"
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        match self.walk.next(&self.tree) {
            Some(id) => {
                out.push_back(Step::MarkCurrent { index: id.index() });
                true
            }
            None => false,
        }
    }
}

pub fn traverse(tree: &Bst, order: TraversalOrder, context: RunContext) -> StepSequence {
    let tree = tree.clone();
    let walk = Walk::new(&tree, order);
    StepSequence::new(Traversal { tree, walk }, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Apply;
    use crate::structures::NodeId;

    fn visited_values(tree: &Bst, order: TraversalOrder) -> Vec<i64> {
        traverse(tree, order, RunContext::new())
            .filter_map(|step| match step {
                Step::MarkCurrent { index } => tree.value(NodeId::from_index(index)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_traversal_orders() {
        let tree = Bst::from_values(&[5, 3, 8, 1, 4]);
        assert_eq!(visited_values(&tree, TraversalOrder::Preorder), vec![5, 3, 1, 4, 8]);
        assert_eq!(visited_values(&tree, TraversalOrder::Inorder), vec![1, 3, 4, 5, 8]);
        assert_eq!(visited_values(&tree, TraversalOrder::Postorder), vec![1, 4, 3, 8, 5]);
    }

    #[test]
    fn test_insert_steps_replay() {
        let mut tree = Bst::from_values(&[5, 3, 8]);
        let steps: Vec<_> = insert(&tree, 4, RunContext::new()).collect();
        assert_eq!(steps.len(), 3);
        assert!(matches!(
            steps.last(),
            Some(Step::StructuralInsert {
                item: Item::Value(4),
                ..
            })
        ));
        for step in &steps {
            tree.apply(step);
        }
        assert_eq!(tree.values(TraversalOrder::Inorder), vec![3, 4, 5, 8]);
    }

    #[test]
    fn test_duplicate_insert_only_walks() {
        let tree = Bst::from_values(&[5, 3]);
        let steps: Vec<_> = insert(&tree, 3, RunContext::new()).collect();
        assert!(steps.iter().all(|s| !s.is_mutation()));
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_delete_missing_value() {
        let tree = Bst::from_values(&[5, 3]);
        let steps: Vec<_> = delete(&tree, 9, RunContext::new()).collect();
        assert_eq!(steps.last(), Some(&Step::NotFound));
    }

    #[test]
    fn test_search_walks_to_match() {
        let tree = Bst::from_values(&[5, 3, 8, 4]);
        let steps: Vec<_> = search(&tree, 4, RunContext::new()).collect();
        let found = tree.find(4).expect("present");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps.last(), Some(&Step::Found { index: found.index() }));
    }

    #[test]
    fn test_empty_tree_traversal() {
        assert_eq!(
            traverse(&Bst::new(), TraversalOrder::Inorder, RunContext::new()).count(),
            0
        );
    }
}

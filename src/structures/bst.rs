//! Binary search tree stored in an arena
//!
//! Nodes live in a `Vec<Option<Node>>` and refer to each other through
//! [`NodeId`] indices instead of owned pointers. Freed slots are recycled in
//! LIFO order, so two trees that see the same sequence of inserts and deletes
//! hand out identical ids. The stepped engines rely on this: they run on a
//! clone of the session's tree and the ids in their steps stay valid for the
//! session's copy.
//!
//! # Invariant
//!
//! For every node, all values in the left subtree are smaller and all values
//! in the right subtree are larger. Duplicates are never stored; inserting an
//! existing value reports [`InsertOutcome::Duplicate`] and changes nothing.

use crate::engine::constants::{TREE_NODE_COUNT, TREE_VALUE_RANGE};
use crate::step::{Apply, Item, Site, Step};
use rand::Rng;
use std::collections::VecDeque;

/// Handle to a node slot in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node with explicit parent and child links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

/// Result of [`Bst::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(NodeId),
    /// The value was already present at this node; nothing changed
    Duplicate(NodeId),
}

/// Depth-first visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 3] = [
        TraversalOrder::Inorder,
        TraversalOrder::Preorder,
        TraversalOrder::Postorder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::Inorder => "Inorder",
            TraversalOrder::Preorder => "Preorder",
            TraversalOrder::Postorder => "Postorder",
        }
    }

    /// Visiting rule shown next to the animation
    pub fn rule(self) -> &'static str {
        match self {
            TraversalOrder::Inorder => "Left → Root → Right",
            TraversalOrder::Preorder => "Root → Left → Right",
            TraversalOrder::Postorder => "Left → Right → Root",
        }
    }
}

/// Resumable depth-first walk over a [`Bst`]
///
/// The walk keeps its own work-list instead of recursing, so a caller can
/// take one node, go do something else, and continue later. Each entry is a
/// node plus whether its children have already been scheduled.
#[derive(Debug, Clone)]
pub struct Walk {
    order: TraversalOrder,
    pending: Vec<(NodeId, bool)>,
}

impl Walk {
    pub fn new(tree: &Bst, order: TraversalOrder) -> Self {
        Walk {
            order,
            pending: tree.root.map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Next node in visiting order, `None` once the walk is done
    pub fn next(&mut self, tree: &Bst) -> Option<NodeId> {
        while let Some((id, expanded)) = self.pending.pop() {
            if expanded {
                return Some(id);
            }
            let Some(node) = tree.node(id) else {
                continue;
            };
            // Pushed in reverse: the last entry pushed is handled first
            let left = node.left.map(|l| (l, false));
            let right = node.right.map(|r| (r, false));
            match self.order {
                TraversalOrder::Preorder => {
                    self.pending.extend(right);
                    self.pending.extend(left);
                    self.pending.push((id, true));
                }
                TraversalOrder::Inorder => {
                    self.pending.extend(right);
                    self.pending.push((id, true));
                    self.pending.extend(left);
                }
                TraversalOrder::Postorder => {
                    self.pending.push((id, true));
                    self.pending.extend(right);
                    self.pending.extend(left);
                }
            }
        }
        None
    }
}

/// Arena-backed binary search tree of unique integers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bst {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Bst::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    /// Random tree of distinct values; also returns the insertion order
    pub fn random<R: Rng>(rng: &mut R) -> (Self, Vec<i64>) {
        let count = rng.random_range(TREE_NODE_COUNT);
        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            let value = rng.random_range(TREE_VALUE_RANGE);
            if !values.contains(&value) {
                values.push(value);
            }
        }
        (Bst::from_values(&values), values)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.node(id).map(|n| n.value)
    }

    pub fn clear(&mut self) {
        *self = Bst::new();
    }

    /// Nodes visited while descending from the root towards `value`,
    /// ending at the matching node if there is one
    pub fn search_path(&self, value: i64) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.root;
        while let Some(id) = current {
            let Some(node) = self.node(id) else { break };
            path.push(id);
            current = if value < node.value {
                node.left
            } else if value > node.value {
                node.right
            } else {
                None
            };
        }
        path
    }

    pub fn find(&self, value: i64) -> Option<NodeId> {
        self.search_path(value)
            .last()
            .copied()
            .filter(|&id| self.value(id) == Some(value))
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    /// Leftmost node of the subtree rooted at `from`
    pub fn min_node(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(left) = self.node(current).and_then(|n| n.left) {
            current = left;
        }
        current
    }

    pub fn min(&self) -> Option<i64> {
        self.root.and_then(|root| self.value(self.min_node(root)))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id.0);
            }
        }
    }

    pub fn insert(&mut self, value: i64) -> InsertOutcome {
        let path = self.search_path(value);
        let parent = path.last().copied();

        if let Some(last) = parent {
            if self.value(last) == Some(value) {
                return InsertOutcome::Duplicate(last);
            }
        }

        let id = self.alloc(Node {
            value,
            left: None,
            right: None,
            parent,
        });

        match parent {
            None => self.root = Some(id),
            Some(parent_id) => {
                if let Some(parent_node) = self.node_mut(parent_id) {
                    if value < parent_node.value {
                        parent_node.left = Some(id);
                    } else {
                        parent_node.right = Some(id);
                    }
                }
            }
        }

        self.len += 1;
        InsertOutcome::Inserted(id)
    }

    /// Point `parent`'s link that currently holds `old` at `new`
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent_id) => {
                if let Some(parent_node) = self.node_mut(parent_id) {
                    if parent_node.left == Some(old) {
                        parent_node.left = new;
                    } else {
                        parent_node.right = new;
                    }
                }
            }
        }
        if let Some(child) = new.and_then(|c| self.node_mut(c)) {
            child.parent = parent;
        }
    }

    /// Remove `value`, returning the node that held it
    ///
    /// A node with two children keeps its slot and takes the value of its
    /// in-order successor (the minimum of the right subtree); the successor's
    /// node is the one unlinked.
    pub fn delete(&mut self, value: i64) -> Option<NodeId> {
        let id = self.find(value)?;
        let node = self.node(id)?.clone();

        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.min_node(right);
                let succ = self.node(successor)?.clone();
                self.replace_child(succ.parent, successor, succ.right);
                self.release(successor);
                if let Some(target) = self.node_mut(id) {
                    target.value = succ.value;
                }
            }
            (child, None) | (None, child) => {
                self.replace_child(node.parent, id, child);
                self.release(id);
            }
        }

        self.len -= 1;
        Some(id)
    }

    /// All nodes in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut walk = Walk::new(self, order);
        let mut out = Vec::with_capacity(self.len);
        while let Some(id) = walk.next(self) {
            out.push(id);
        }
        out
    }

    /// Values in the given order
    pub fn values(&self, order: TraversalOrder) -> Vec<i64> {
        self.traverse(order)
            .into_iter()
            .filter_map(|id| self.value(id))
            .collect()
    }

    /// Number of levels (0 for an empty tree)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut queue: VecDeque<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, level)) = queue.pop_front() {
            height = height.max(level);
            if let Some(node) = self.node(id) {
                queue.extend(node.left.map(|l| (l, level + 1)));
                queue.extend(node.right.map(|r| (r, level + 1)));
            }
        }
        height
    }

    /// Distance from the root (root is 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(|n| n.parent);
        }
        depth
    }
}

impl Apply for Bst {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::StructuralInsert {
                site: Site::Node(_),
                item: Item::Value(value),
            } => {
                self.insert(*value);
            }
            Step::StructuralDelete {
                site: Site::Node(_),
                item: Item::Value(value),
            } => {
                self.delete(*value);
            }
            _ => {}
        }
    }
}

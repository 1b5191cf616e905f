//! Data models the engines run over
//!
//! Every structure here is plain owned data with two ways of being mutated:
//!
//! - **instantaneous primitives** (`insert`, `delete`, `push`, `pop`, ...)
//!   that perform a whole operation at once, and
//! - **step replay** through [`crate::step::Apply`], used by the playback
//!   controller to follow a stepped run one observable change at a time.
//!
//! # Structures
//!
//! - [`array`]: integer buffer sorted and searched in place
//! - [`bst`]: binary search tree stored in an index-addressed arena
//! - [`heap`]: array-backed binary heap in max or min mode
//! - [`linear`]: LIFO [`linear::Stack`] and FIFO [`linear::Queue`] of text items
//! - [`hash_table`]: fixed-size table with linear probing or chaining
//!
//! Bulk generators take any [`rand::Rng`] so sessions can be reproduced
//! from a seed.

pub mod array;
pub mod bst;
pub mod hash_table;
pub mod heap;
pub mod linear;

pub use array::ArrayBuffer;
pub use bst::{Bst, NodeId};
pub use hash_table::{CollisionStrategy, Entry, HashFunction, HashTable};
pub use heap::{BinaryHeap, HeapKind};
pub use linear::{Queue, Stack};

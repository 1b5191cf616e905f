//! Session state
//!
//! A [`Session`] owns one panel per algorithm family and the random
//! generator used for bulk data. Only the active panel is ticked; leaving a
//! panel cancels whatever it was running.
//!
//! - [`visualizer`]: structure plus run guard, playback and marks
//! - [`highlights`]: per-index marks derived from the step stream
//! - [`panels`]: the six panels and their status messages

pub mod highlights;
pub mod panels;
pub mod visualizer;

use crate::config::Config;
use crate::engine::constants::{
    DEFAULT_HEAP_DELAY_MS, DEFAULT_OPERATION_DELAY_MS, DEFAULT_SEARCH_DELAY_MS,
    DEFAULT_SORT_DELAY_MS, DEFAULT_TRAVERSAL_DELAY_MS,
};
use crate::engine::EngineError;
use crate::playback::Speed;
use crate::structures::{
    ArrayBuffer, BinaryHeap, Bst, CollisionStrategy, HashFunction, HashTable, HeapKind, Queue,
    Stack,
};
use clap::ValueEnum;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, info};

pub use highlights::{Highlights, Mark};
pub use panels::{
    HashPanel, HeapPanel, InputAction, InputNeed, LinearMode, LinearPanel, Panel, SearchingPanel,
    SortingPanel, TreePanel,
};
pub use visualizer::{RunRequest, RunState, Runner, Visualizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PanelKind {
    Sorting,
    Searching,
    Tree,
    Heap,
    StackQueue,
    HashTable,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Sorting,
        PanelKind::Searching,
        PanelKind::Tree,
        PanelKind::Heap,
        PanelKind::StackQueue,
        PanelKind::HashTable,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct Session {
    pub sorting: SortingPanel,
    pub searching: SearchingPanel,
    pub tree: TreePanel,
    pub heap: HeapPanel,
    pub linear: LinearPanel,
    pub hash: HashPanel,
    active: PanelKind,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        let mut rng = config.rng();
        let speed = |default_ms: u64| Speed::from_millis(config.speed.unwrap_or(default_ms));
        let history = config.history;

        let (sort_array, search_array) = match &config.values {
            Some(values) => {
                let mut sorted = values.clone();
                sorted.sort_unstable();
                (ArrayBuffer::from_values(values.clone()), ArrayBuffer::from_values(sorted))
            }
            None => (
                ArrayBuffer::random(&mut rng, config.array_size),
                ArrayBuffer::random_unsorted(&mut rng),
            ),
        };
        let (tree, _) = Bst::random(&mut rng);
        let (heap, _) = BinaryHeap::random(&mut rng, HeapKind::Max);
        let stack = Stack::random(&mut rng);
        let queue = Queue::random(&mut rng);
        let table = HashTable::new(
            config.table_size,
            HashFunction::Division,
            CollisionStrategy::LinearProbing,
        )?;

        info!(seed = ?config.seed, panel = ?config.panel, "session created");
        Ok(Session {
            sorting: SortingPanel::new(sort_array, speed(DEFAULT_SORT_DELAY_MS), history),
            searching: SearchingPanel::new(search_array, speed(DEFAULT_SEARCH_DELAY_MS), history),
            tree: TreePanel::new(tree, speed(DEFAULT_TRAVERSAL_DELAY_MS), history),
            heap: HeapPanel::new(heap, speed(DEFAULT_HEAP_DELAY_MS), history),
            linear: LinearPanel::new(stack, queue, speed(DEFAULT_OPERATION_DELAY_MS), history),
            hash: HashPanel::new(table, speed(DEFAULT_OPERATION_DELAY_MS), history),
            active: config.panel,
            rng,
        })
    }

    pub fn active(&self) -> PanelKind {
        self.active
    }

    pub fn panel(&self, kind: PanelKind) -> &dyn Panel {
        match kind {
            PanelKind::Sorting => &self.sorting,
            PanelKind::Searching => &self.searching,
            PanelKind::Tree => &self.tree,
            PanelKind::Heap => &self.heap,
            PanelKind::StackQueue => &self.linear,
            PanelKind::HashTable => &self.hash,
        }
    }

    pub fn panel_mut(&mut self, kind: PanelKind) -> &mut dyn Panel {
        match kind {
            PanelKind::Sorting => &mut self.sorting,
            PanelKind::Searching => &mut self.searching,
            PanelKind::Tree => &mut self.tree,
            PanelKind::Heap => &mut self.heap,
            PanelKind::StackQueue => &mut self.linear,
            PanelKind::HashTable => &mut self.hash,
        }
    }

    pub fn current(&self) -> &dyn Panel {
        self.panel(self.active)
    }

    pub fn current_mut(&mut self) -> &mut dyn Panel {
        self.panel_mut(self.active)
    }

    /// Make `kind` the active panel, cancelling any run in the one being left
    pub fn switch_to(&mut self, kind: PanelKind) {
        if kind == self.active {
            return;
        }
        let leaving = self.current_mut();
        if leaving.runner().is_running() {
            debug!(panel = leaving.title(), "cancelling run on panel switch");
            leaving.cancel();
        }
        self.active = kind;
    }

    pub fn next_panel(&mut self) {
        self.switch_to(self.active.next());
    }

    pub fn prev_panel(&mut self) {
        self.switch_to(self.active.prev());
    }

    pub fn tick(&mut self, now: Instant) {
        self.current_mut().tick(now);
    }

    /// Regenerate the active panel's data
    pub fn generate(&mut self) {
        let rng = &mut self.rng;
        match self.active {
            PanelKind::Sorting => self.sorting.generate(rng),
            PanelKind::Searching => self.searching.generate(rng),
            PanelKind::Tree => self.tree.generate(rng),
            PanelKind::Heap => self.heap.generate(rng),
            PanelKind::StackQueue => self.linear.generate(rng),
            PanelKind::HashTable => self.hash.generate(rng),
        }
    }

    /// Change the sorting array length and regenerate it
    pub fn resize_array(&mut self, size: usize) -> Result<(), EngineError> {
        self.sorting.resize(size, &mut self.rng)
    }
}

//! The six visualizer panels
//!
//! Each panel pairs a [`Visualizer`] with the family-specific choices (which
//! algorithm, which traversal, heap ordering, hash configuration) and turns
//! finished runs into a one-line status message.

use super::visualizer::{RunRequest, Runner, Visualizer};
use crate::engine::catalog::Topic;
use crate::engine::constants::{ARRAY_SIZE_RANGE, TABLE_SIZE_RANGE};
use crate::engine::errors::{parse_number, EngineError};
use crate::engine::searching::{self, SearchAlgorithm};
use crate::engine::sorting::{self, SortAlgorithm};
use crate::engine::{hashing, heap, linear, tree, RunContext};
use crate::playback::{Outcome, Speed};
use crate::structures::bst::TraversalOrder;
use crate::structures::hash_table::{parse_entry, HashStats};
use crate::structures::linear::parse_item;
use crate::structures::{
    ArrayBuffer, BinaryHeap, Bst, CollisionStrategy, HashFunction, HashTable, HeapKind, NodeId,
    Queue, Stack,
};
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info;

const BUSY: &str = "A run is in progress (Esc cancels it)";

/// Operations that take user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Insert,
    Delete,
    Find,
}

/// What a panel needs before it can perform an [`InputAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputNeed {
    Unsupported,
    Immediate,
    Prompt(&'static str),
}

/// Behavior shared by every panel
pub trait Panel {
    fn title(&self) -> &'static str;
    fn runner(&self) -> &dyn Runner;
    fn runner_mut(&mut self) -> &mut dyn Runner;
    fn status(&self) -> &str;
    fn topic(&self) -> Topic;

    /// The panel's main run, started with Space when nothing is running
    fn start(&mut self) -> RunRequest;
    fn generate(&mut self, rng: &mut StdRng);
    fn reset(&mut self);
    /// Next algorithm, traversal or mode
    fn cycle_mode(&mut self);
    fn input_need(&self, action: InputAction) -> InputNeed;
    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError>;
    fn finished(&mut self, outcome: Outcome);

    fn tick(&mut self, now: Instant) {
        if let Some(outcome) = self.runner_mut().tick(now) {
            self.finished(outcome);
        }
    }

    /// Abort the active run, if any, and report it
    fn cancel(&mut self) {
        if !self.runner().is_running() {
            return;
        }
        self.runner_mut().cancel();
        if let Some(outcome) = self.runner().last_outcome() {
            self.finished(outcome);
        }
    }
}

fn busy_status(request: RunRequest, status: &mut String) -> RunRequest {
    if request == RunRequest::Busy {
        *status = BUSY.to_string();
    }
    request
}

// Sorting

pub struct SortingPanel {
    vis: Visualizer<ArrayBuffer>,
    algorithm: SortAlgorithm,
    size: usize,
    original: Vec<i64>,
    status: String,
}

impl SortingPanel {
    pub fn new(array: ArrayBuffer, speed: Speed, history: usize) -> Self {
        SortingPanel {
            size: array.len(),
            original: array.values().to_vec(),
            vis: Visualizer::new(array, speed, history),
            algorithm: SortAlgorithm::Bubble,
            status: String::from("Press Space to sort"),
        }
    }

    pub fn visualizer(&self) -> &Visualizer<ArrayBuffer> {
        &self.vis
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<ArrayBuffer> {
        &mut self.vis
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: SortAlgorithm) {
        if self.vis.is_running() {
            self.status = BUSY.to_string();
            return;
        }
        self.algorithm = algorithm;
        self.vis.clear_marks();
        self.status = format!("{} selected", algorithm.name());
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Replace the array with user-supplied values
    pub fn load(&mut self, values: Vec<i64>) -> RunRequest {
        let request = self.vis.replace(ArrayBuffer::from_values(values.clone()));
        if request == RunRequest::Started {
            self.size = values.len();
            self.original = values;
        }
        busy_status(request, &mut self.status)
    }

    pub fn resize(&mut self, size: usize, rng: &mut StdRng) -> Result<(), EngineError> {
        if !ARRAY_SIZE_RANGE.contains(&size) {
            return Err(EngineError::InvalidConfiguration(format!(
                "array size {} outside {}..={}",
                size,
                ARRAY_SIZE_RANGE.start(),
                ARRAY_SIZE_RANGE.end()
            )));
        }
        self.size = size;
        self.generate(rng);
        Ok(())
    }
}

impl Panel for SortingPanel {
    fn title(&self) -> &'static str {
        "Sorting"
    }

    fn runner(&self) -> &dyn Runner {
        &self.vis
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        &mut self.vis
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        Topic::Sort(self.algorithm)
    }

    fn start(&mut self) -> RunRequest {
        let sequence = sorting::run(self.vis.structure(), self.algorithm, RunContext::new());
        let request = self.vis.start(sequence);
        if request == RunRequest::Started {
            self.status = format!("Sorting with {}...", self.algorithm.name());
        }
        busy_status(request, &mut self.status)
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let array = ArrayBuffer::random(rng, self.size);
        let values = array.values().to_vec();
        if self.vis.replace(array) == RunRequest::Started {
            info!(size = self.size, "generated sorting array");
            self.original = values;
            self.status = format!("New array of {} elements", self.size);
        } else {
            self.status = BUSY.to_string();
        }
    }

    fn reset(&mut self) {
        self.vis.cancel();
        self.vis.replace(ArrayBuffer::from_values(self.original.clone()));
        self.status = String::from("Array restored");
    }

    fn cycle_mode(&mut self) {
        self.set_algorithm(self.algorithm.next());
    }

    fn input_need(&self, _action: InputAction) -> InputNeed {
        InputNeed::Unsupported
    }

    fn submit(&mut self, _action: InputAction, _input: &str) -> Result<RunRequest, EngineError> {
        Ok(RunRequest::Unavailable)
    }

    fn finished(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Completed { steps } => {
                let len = self.vis.structure().len();
                self.vis.highlights_mut().mark_all_sorted(len);
                self.status = format!(
                    "Sorted {} elements with {} in {} steps",
                    len,
                    self.algorithm.name(),
                    steps
                );
            }
            Outcome::Aborted { steps } => {
                self.status = format!("{} stopped after {} steps", self.algorithm.name(), steps);
            }
        }
    }
}

// Searching

pub struct SearchingPanel {
    vis: Visualizer<ArrayBuffer>,
    algorithm: SearchAlgorithm,
    target: Option<i64>,
    status: String,
}

impl SearchingPanel {
    pub fn new(array: ArrayBuffer, speed: Speed, history: usize) -> Self {
        SearchingPanel {
            vis: Visualizer::new(array, speed, history),
            algorithm: SearchAlgorithm::Linear,
            target: None,
            status: String::from("Press f to choose a target"),
        }
    }

    pub fn visualizer(&self) -> &Visualizer<ArrayBuffer> {
        &self.vis
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<ArrayBuffer> {
        &mut self.vis
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    /// Switch algorithm; binary search gets a sorted copy of the array
    pub fn set_algorithm(&mut self, algorithm: SearchAlgorithm) {
        if self.vis.is_running() {
            self.status = BUSY.to_string();
            return;
        }
        self.algorithm = algorithm;
        if algorithm == SearchAlgorithm::Binary && !self.vis.structure().is_sorted() {
            let mut values = self.vis.structure().values().to_vec();
            values.sort_unstable();
            self.vis.replace(ArrayBuffer::from_values(values));
        }
        self.vis.clear_marks();
        self.status = format!("{} selected", algorithm.name());
    }

    /// Replace the array; binary search keeps it sorted
    pub fn load(&mut self, mut values: Vec<i64>) -> RunRequest {
        if self.algorithm == SearchAlgorithm::Binary {
            values.sort_unstable();
        }
        let request = self.vis.replace(ArrayBuffer::from_values(values));
        busy_status(request, &mut self.status)
    }

    pub fn search(&mut self, target: i64) -> RunRequest {
        let sequence = searching::run(self.vis.structure(), self.algorithm, target, RunContext::new());
        let request = self.vis.start(sequence);
        if request == RunRequest::Started {
            self.target = Some(target);
            self.status = format!("Searching for {} with {}...", target, self.algorithm.name());
        }
        busy_status(request, &mut self.status)
    }
}

impl Panel for SearchingPanel {
    fn title(&self) -> &'static str {
        "Searching"
    }

    fn runner(&self) -> &dyn Runner {
        &self.vis
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        &mut self.vis
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        Topic::Search(self.algorithm)
    }

    fn start(&mut self) -> RunRequest {
        match self.target {
            Some(target) => self.search(target),
            None => {
                self.status = String::from("Press f to choose a target");
                RunRequest::Unavailable
            }
        }
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let array = match self.algorithm {
            SearchAlgorithm::Linear => ArrayBuffer::random_unsorted(rng),
            SearchAlgorithm::Binary => ArrayBuffer::random_sorted(rng),
        };
        if self.vis.replace(array) == RunRequest::Started {
            info!(algorithm = self.algorithm.name(), "generated search array");
            self.status = String::from("New array generated");
        } else {
            self.status = BUSY.to_string();
        }
    }

    fn reset(&mut self) {
        self.vis.cancel();
        self.vis.clear_marks();
        self.target = None;
        self.status = String::from("Press f to choose a target");
    }

    fn cycle_mode(&mut self) {
        self.set_algorithm(self.algorithm.next());
    }

    fn input_need(&self, action: InputAction) -> InputNeed {
        match action {
            InputAction::Find => InputNeed::Prompt("Target"),
            _ => InputNeed::Unsupported,
        }
    }

    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError> {
        match action {
            InputAction::Find => Ok(self.search(parse_number(input)?)),
            _ => Ok(RunRequest::Unavailable),
        }
    }

    fn finished(&mut self, outcome: Outcome) {
        let target = self.target.unwrap_or_default();
        self.status = match (outcome, self.vis.highlights().found()) {
            (Outcome::Aborted { .. }, _) => String::from("Search stopped"),
            (Outcome::Completed { steps }, Some(index)) => {
                format!("Found {} at index {} ({} steps)", target, index, steps)
            }
            (Outcome::Completed { steps }, None) => {
                format!("{} not found ({} steps)", target, steps)
            }
        };
    }
}

// Binary search tree

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreeOp {
    Insert { value: i64, duplicate: bool },
    Delete { value: i64, present: bool },
    Search(i64),
    Traverse(TraversalOrder),
}

pub struct TreePanel {
    vis: Visualizer<Bst>,
    order: TraversalOrder,
    op: Option<TreeOp>,
    status: String,
}

impl TreePanel {
    pub fn new(tree: Bst, speed: Speed, history: usize) -> Self {
        TreePanel {
            vis: Visualizer::new(tree, speed, history),
            order: TraversalOrder::Inorder,
            op: None,
            status: String::from("Press i to insert a value"),
        }
    }

    pub fn visualizer(&self) -> &Visualizer<Bst> {
        &self.vis
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<Bst> {
        &mut self.vis
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    fn launch(&mut self, op: TreeOp, sequence: crate::engine::StepSequence) -> RunRequest {
        let request = self.vis.start(sequence);
        if request == RunRequest::Started {
            self.op = Some(op);
            self.status = match op {
                TreeOp::Insert { value, .. } => format!("Inserting {}...", value),
                TreeOp::Delete { value, .. } => format!("Deleting {}...", value),
                TreeOp::Search(value) => format!("Searching for {}...", value),
                TreeOp::Traverse(order) => format!("{} traversal ({})", order.name(), order.rule()),
            };
        }
        busy_status(request, &mut self.status)
    }

    pub fn insert(&mut self, value: i64) -> RunRequest {
        let duplicate = self.vis.structure().contains(value);
        let sequence = tree::insert(self.vis.structure(), value, RunContext::new());
        self.launch(TreeOp::Insert { value, duplicate }, sequence)
    }

    pub fn delete(&mut self, value: i64) -> RunRequest {
        let present = self.vis.structure().contains(value);
        let sequence = tree::delete(self.vis.structure(), value, RunContext::new());
        self.launch(TreeOp::Delete { value, present }, sequence)
    }

    pub fn search(&mut self, value: i64) -> RunRequest {
        let sequence = tree::search(self.vis.structure(), value, RunContext::new());
        self.launch(TreeOp::Search(value), sequence)
    }

    pub fn traverse(&mut self, order: TraversalOrder) -> RunRequest {
        if self.vis.structure().is_empty() {
            self.status = String::from("Tree is empty");
            return RunRequest::Unavailable;
        }
        let sequence = tree::traverse(self.vis.structure(), order, RunContext::new());
        let request = self.launch(TreeOp::Traverse(order), sequence);
        if request == RunRequest::Started {
            self.order = order;
        }
        request
    }
}

impl Panel for TreePanel {
    fn title(&self) -> &'static str {
        "Binary Search Tree"
    }

    fn runner(&self) -> &dyn Runner {
        &self.vis
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        &mut self.vis
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        Topic::Tree
    }

    fn start(&mut self) -> RunRequest {
        self.traverse(self.order)
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let (tree, values) = Bst::random(rng);
        if self.vis.replace(tree) == RunRequest::Started {
            info!(nodes = values.len(), "generated tree");
            self.op = None;
            self.status = format!("Random tree with {} nodes", values.len());
        } else {
            self.status = BUSY.to_string();
        }
    }

    fn reset(&mut self) {
        self.vis.cancel();
        self.vis.replace(Bst::new());
        self.op = None;
        self.status = String::from("Tree cleared");
    }

    fn cycle_mode(&mut self) {
        let i = TraversalOrder::ALL
            .iter()
            .position(|&o| o == self.order)
            .unwrap_or(0);
        self.order = TraversalOrder::ALL[(i + 1) % TraversalOrder::ALL.len()];
        self.status = format!("{} traversal selected", self.order.name());
    }

    fn input_need(&self, _action: InputAction) -> InputNeed {
        InputNeed::Prompt("Value")
    }

    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError> {
        let value = parse_number(input)?;
        Ok(match action {
            InputAction::Insert => self.insert(value),
            InputAction::Delete => self.delete(value),
            InputAction::Find => self.search(value),
        })
    }

    fn finished(&mut self, outcome: Outcome) {
        let Some(op) = self.op.take() else {
            return;
        };
        if let Outcome::Aborted { .. } = outcome {
            self.status = String::from("Stopped");
            return;
        }
        self.status = match op {
            TreeOp::Insert {
                value,
                duplicate: false,
            } => format!("Inserted {}", value),
            TreeOp::Insert {
                value,
                duplicate: true,
            } => format!("{} is already in the tree", value),
            TreeOp::Delete {
                value,
                present: true,
            } => format!("Deleted {}", value),
            TreeOp::Delete {
                value,
                present: false,
            } => format!("{} not found", value),
            TreeOp::Search(value) => match self.vis.highlights().found() {
                Some(_) => format!("Found {}", value),
                None => format!("{} not found", value),
            },
            TreeOp::Traverse(order) => {
                let tree = self.vis.structure();
                let values: Vec<String> = self
                    .vis
                    .highlights()
                    .visited()
                    .iter()
                    .filter_map(|&index| tree.value(NodeId::from_index(index)))
                    .map(|v| v.to_string())
                    .collect();
                format!("{}: {}", order.name(), values.join(", "))
            }
        };
    }
}

// Heap

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeapOp {
    Insert(i64),
    DeleteRoot(i64),
}

pub struct HeapPanel {
    vis: Visualizer<BinaryHeap>,
    op: Option<HeapOp>,
    status: String,
}

impl HeapPanel {
    pub fn new(heap: BinaryHeap, speed: Speed, history: usize) -> Self {
        HeapPanel {
            vis: Visualizer::new(heap, speed, history),
            op: None,
            status: String::from("Press i to insert a value"),
        }
    }

    pub fn visualizer(&self) -> &Visualizer<BinaryHeap> {
        &self.vis
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<BinaryHeap> {
        &mut self.vis
    }

    pub fn kind(&self) -> HeapKind {
        self.vis.structure().kind()
    }

    pub fn insert(&mut self, value: i64) -> RunRequest {
        let sequence = heap::insert(self.vis.structure(), value, RunContext::new());
        let request = self.vis.start(sequence);
        if request == RunRequest::Started {
            self.op = Some(HeapOp::Insert(value));
            self.status = format!("Inserting {}...", value);
        }
        busy_status(request, &mut self.status)
    }

    pub fn delete_root(&mut self) -> Result<RunRequest, EngineError> {
        if self.vis.is_running() {
            self.status = BUSY.to_string();
            return Ok(RunRequest::Busy);
        }
        let root = self.vis.structure().peek();
        let sequence = heap::delete_root(self.vis.structure(), RunContext::new())?;
        let request = self.vis.start(sequence);
        if let (RunRequest::Started, Some(root)) = (request, root) {
            self.op = Some(HeapOp::DeleteRoot(root));
            self.status = format!("Removing root {}...", root);
        }
        Ok(request)
    }
}

impl Panel for HeapPanel {
    fn title(&self) -> &'static str {
        "Heap"
    }

    fn runner(&self) -> &dyn Runner {
        &self.vis
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        &mut self.vis
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        Topic::Heap(self.kind())
    }

    fn start(&mut self) -> RunRequest {
        self.status = String::from("Press i to insert or d to remove the root");
        RunRequest::Unavailable
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let (heap, values) = BinaryHeap::random(rng, self.kind());
        if self.vis.replace(heap) == RunRequest::Started {
            info!(nodes = values.len(), kind = self.kind().name(), "generated heap");
            self.status = format!("Random {} heap with {} values", self.kind().name(), values.len());
        } else {
            self.status = BUSY.to_string();
        }
    }

    fn reset(&mut self) {
        self.vis.cancel();
        self.vis.replace(BinaryHeap::new(self.kind()));
        self.op = None;
        self.status = String::from("Heap cleared");
    }

    /// Toggle max/min; the heap is emptied
    fn cycle_mode(&mut self) {
        let kind = self.kind().toggled();
        match self.vis.structure_mut() {
            Some(heap) => {
                heap.set_kind(kind);
                self.vis.clear_marks();
                info!(kind = kind.name(), "heap ordering changed");
                self.status = format!("Switched to {} heap", kind.name());
            }
            None => self.status = BUSY.to_string(),
        }
    }

    fn input_need(&self, action: InputAction) -> InputNeed {
        match action {
            InputAction::Insert => InputNeed::Prompt("Value"),
            InputAction::Delete => InputNeed::Immediate,
            InputAction::Find => InputNeed::Unsupported,
        }
    }

    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError> {
        match action {
            InputAction::Insert => Ok(self.insert(parse_number(input)?)),
            InputAction::Delete => self.delete_root(),
            InputAction::Find => Ok(RunRequest::Unavailable),
        }
    }

    fn finished(&mut self, outcome: Outcome) {
        let Some(op) = self.op.take() else {
            return;
        };
        self.status = match (outcome, op) {
            (Outcome::Aborted { .. }, _) => String::from("Stopped"),
            (_, HeapOp::Insert(value)) => format!("Inserted {}", value),
            (_, HeapOp::DeleteRoot(root)) => format!("Removed root {}", root),
        };
    }
}

// Stack and queue

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinearMode {
    #[default]
    Stack,
    Queue,
}

impl LinearMode {
    pub fn name(self) -> &'static str {
        match self {
            LinearMode::Stack => "Stack",
            LinearMode::Queue => "Queue",
        }
    }
}

pub struct LinearPanel {
    mode: LinearMode,
    stack: Visualizer<Stack>,
    queue: Visualizer<Queue>,
    pending: Option<String>,
    status: String,
}

impl LinearPanel {
    pub fn new(stack: Stack, queue: Queue, speed: Speed, history: usize) -> Self {
        LinearPanel {
            mode: LinearMode::Stack,
            stack: Visualizer::new(stack, speed, history),
            queue: Visualizer::new(queue, speed, history),
            pending: None,
            status: String::from("Press i to push an item"),
        }
    }

    pub fn mode(&self) -> LinearMode {
        self.mode
    }

    pub fn stack(&self) -> &Visualizer<Stack> {
        &self.stack
    }

    pub fn queue(&self) -> &Visualizer<Queue> {
        &self.queue
    }

    pub fn stack_mut(&mut self) -> &mut Visualizer<Stack> {
        &mut self.stack
    }

    pub fn queue_mut(&mut self) -> &mut Visualizer<Queue> {
        &mut self.queue
    }

    /// Push or enqueue depending on the mode
    pub fn add(&mut self, item: String) -> RunRequest {
        let request = match self.mode {
            LinearMode::Stack => {
                let sequence = linear::push(self.stack.structure(), item.clone(), RunContext::new());
                self.stack.start(sequence)
            }
            LinearMode::Queue => {
                let sequence =
                    linear::enqueue(self.queue.structure(), item.clone(), RunContext::new());
                self.queue.start(sequence)
            }
        };
        if request == RunRequest::Started {
            let verb = match self.mode {
                LinearMode::Stack => "Pushed",
                LinearMode::Queue => "Enqueued",
            };
            self.pending = Some(format!("{} {}", verb, item));
        }
        busy_status(request, &mut self.status)
    }

    /// Pop or dequeue depending on the mode
    pub fn remove(&mut self) -> Result<RunRequest, EngineError> {
        if self.runner().is_running() {
            self.status = BUSY.to_string();
            return Ok(RunRequest::Busy);
        }
        let (item, request) = match self.mode {
            LinearMode::Stack => {
                let item = self.stack.structure().top().map(str::to_string);
                let sequence = linear::pop(self.stack.structure(), RunContext::new())?;
                (item, self.stack.start(sequence))
            }
            LinearMode::Queue => {
                let item = self.queue.structure().front().map(str::to_string);
                let sequence = linear::dequeue(self.queue.structure(), RunContext::new())?;
                (item, self.queue.start(sequence))
            }
        };
        if let Some(item) = item {
            let verb = match self.mode {
                LinearMode::Stack => "Popped",
                LinearMode::Queue => "Dequeued",
            };
            self.pending = Some(format!("{} {}", verb, item));
        }
        Ok(request)
    }
}

impl Panel for LinearPanel {
    fn title(&self) -> &'static str {
        "Stack & Queue"
    }

    fn runner(&self) -> &dyn Runner {
        match self.mode {
            LinearMode::Stack => &self.stack,
            LinearMode::Queue => &self.queue,
        }
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        match self.mode {
            LinearMode::Stack => &mut self.stack,
            LinearMode::Queue => &mut self.queue,
        }
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        match self.mode {
            LinearMode::Stack => Topic::Stack,
            LinearMode::Queue => Topic::Queue,
        }
    }

    fn start(&mut self) -> RunRequest {
        self.status = match self.mode {
            LinearMode::Stack => String::from("Press i to push or d to pop"),
            LinearMode::Queue => String::from("Press i to enqueue or d to dequeue"),
        };
        RunRequest::Unavailable
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let request = match self.mode {
            LinearMode::Stack => self.stack.replace(Stack::random(rng)),
            LinearMode::Queue => self.queue.replace(Queue::random(rng)),
        };
        if request == RunRequest::Started {
            info!(mode = self.mode.name(), "generated items");
            self.status = format!("{} filled with random items", self.mode.name());
        } else {
            self.status = BUSY.to_string();
        }
    }

    fn reset(&mut self) {
        self.runner_mut().cancel();
        match self.mode {
            LinearMode::Stack => {
                self.stack.replace(Stack::new());
            }
            LinearMode::Queue => {
                self.queue.replace(Queue::new());
            }
        }
        self.pending = None;
        self.status = format!("{} cleared", self.mode.name());
    }

    fn cycle_mode(&mut self) {
        self.runner_mut().cancel();
        self.mode = match self.mode {
            LinearMode::Stack => LinearMode::Queue,
            LinearMode::Queue => LinearMode::Stack,
        };
        self.status = format!("{} mode", self.mode.name());
    }

    fn input_need(&self, action: InputAction) -> InputNeed {
        match action {
            InputAction::Insert => InputNeed::Prompt("Item"),
            InputAction::Delete => InputNeed::Immediate,
            InputAction::Find => InputNeed::Unsupported,
        }
    }

    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError> {
        match action {
            InputAction::Insert => Ok(self.add(parse_item(input)?)),
            InputAction::Delete => self.remove(),
            InputAction::Find => Ok(RunRequest::Unavailable),
        }
    }

    fn finished(&mut self, outcome: Outcome) {
        let message = self.pending.take();
        self.status = match (outcome, message) {
            (Outcome::Aborted { .. }, _) => String::from("Stopped"),
            (_, Some(message)) => message,
            (_, None) => return,
        };
    }
}

// Hash table

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashOp {
    Insert(i64),
    Search(i64),
    Delete(i64),
}

pub struct HashPanel {
    vis: Visualizer<HashTable>,
    op: Option<HashOp>,
    last_probes: Option<usize>,
    status: String,
}

impl HashPanel {
    pub fn new(table: HashTable, speed: Speed, history: usize) -> Self {
        HashPanel {
            vis: Visualizer::new(table, speed, history),
            op: None,
            last_probes: None,
            status: String::from("Press i to insert key:value"),
        }
    }

    pub fn visualizer(&self) -> &Visualizer<HashTable> {
        &self.vis
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<HashTable> {
        &mut self.vis
    }

    pub fn last_probes(&self) -> Option<usize> {
        self.last_probes
    }

    pub fn stats(&self) -> HashStats {
        self.vis.structure().stats()
    }

    fn launch(&mut self, op: HashOp, run: hashing::HashRun) -> RunRequest {
        let request = self.vis.start(run.steps);
        if request == RunRequest::Started {
            self.op = Some(op);
            self.last_probes = Some(run.probes);
            self.status = match op {
                HashOp::Insert(key) => format!("Inserting key {}...", key),
                HashOp::Search(key) => format!("Searching for key {}...", key),
                HashOp::Delete(key) => format!("Deleting key {}...", key),
            };
        }
        busy_status(request, &mut self.status)
    }

    pub fn insert(&mut self, input: &str) -> Result<RunRequest, EngineError> {
        let entry = parse_entry(input)?;
        let key = entry.key;
        let run = hashing::insert(self.vis.structure(), entry, RunContext::new());
        Ok(self.launch(HashOp::Insert(key), run))
    }

    pub fn search(&mut self, key: i64) -> RunRequest {
        let run = hashing::search(self.vis.structure(), key, RunContext::new());
        self.launch(HashOp::Search(key), run)
    }

    pub fn delete(&mut self, key: i64) -> RunRequest {
        let run = hashing::delete(self.vis.structure(), key, RunContext::new());
        self.launch(HashOp::Delete(key), run)
    }

    fn reconfigure(
        &mut self,
        size: usize,
        function: HashFunction,
        strategy: CollisionStrategy,
    ) -> Result<(), EngineError> {
        let Some(table) = self.vis.structure_mut() else {
            self.status = BUSY.to_string();
            return Ok(());
        };
        table.reconfigure(size, function, strategy)?;
        self.vis.clear_marks();
        self.last_probes = None;
        info!(size, function = function.name(), strategy = strategy.name(), "hash table reconfigured");
        self.status = format!(
            "Table of {} slots, {} hashing, {}",
            size,
            function.name(),
            strategy.name().to_lowercase()
        );
        Ok(())
    }

    pub fn cycle_function(&mut self) -> Result<(), EngineError> {
        let table = self.vis.structure();
        let (size, function, strategy) = (table.size(), table.function().next(), table.strategy());
        self.reconfigure(size, function, strategy)
    }

    pub fn cycle_strategy(&mut self) -> Result<(), EngineError> {
        let table = self.vis.structure();
        let (size, function, strategy) = (table.size(), table.function(), table.strategy().next());
        self.reconfigure(size, function, strategy)
    }

    /// Grow or shrink by `delta` slots, staying inside the supported range
    pub fn resize_by(&mut self, delta: isize) -> Result<(), EngineError> {
        let table = self.vis.structure();
        let size = table
            .size()
            .saturating_add_signed(delta)
            .clamp(*TABLE_SIZE_RANGE.start(), *TABLE_SIZE_RANGE.end());
        let (function, strategy) = (table.function(), table.strategy());
        if size == table.size() {
            return Ok(());
        }
        self.reconfigure(size, function, strategy)
    }
}

impl Panel for HashPanel {
    fn title(&self) -> &'static str {
        "Hash Table"
    }

    fn runner(&self) -> &dyn Runner {
        &self.vis
    }

    fn runner_mut(&mut self) -> &mut dyn Runner {
        &mut self.vis
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn topic(&self) -> Topic {
        Topic::HashTable(self.vis.structure().strategy())
    }

    fn start(&mut self) -> RunRequest {
        self.status = String::from("Press i to insert, f to search or d to delete");
        RunRequest::Unavailable
    }

    fn generate(&mut self, _rng: &mut StdRng) {
        self.status = String::from("Hash tables start empty; press i to insert key:value");
    }

    fn reset(&mut self) {
        self.vis.cancel();
        if let Some(table) = self.vis.structure_mut() {
            table.clear();
        }
        self.vis.clear_marks();
        self.op = None;
        self.last_probes = None;
        self.status = String::from("Table cleared");
    }

    fn cycle_mode(&mut self) {
        if let Err(err) = self.cycle_function() {
            self.status = err.to_string();
        }
    }

    fn input_need(&self, action: InputAction) -> InputNeed {
        match action {
            InputAction::Insert => InputNeed::Prompt("Entry (key:value)"),
            InputAction::Delete | InputAction::Find => InputNeed::Prompt("Key"),
        }
    }

    fn submit(&mut self, action: InputAction, input: &str) -> Result<RunRequest, EngineError> {
        match action {
            InputAction::Insert => self.insert(input),
            InputAction::Delete => Ok(self.delete(parse_number(input)?)),
            InputAction::Find => Ok(self.search(parse_number(input)?)),
        }
    }

    fn finished(&mut self, outcome: Outcome) {
        let Some(op) = self.op.take() else {
            return;
        };
        let probes = self.last_probes.unwrap_or(0);
        let highlights = self.vis.highlights();
        self.status = match (outcome, op) {
            (Outcome::Aborted { .. }, _) => String::from("Stopped"),
            (_, HashOp::Insert(key)) if highlights.not_found() => {
                format!("Table full: could not insert key {} ({} probes)", key, probes)
            }
            (_, HashOp::Insert(key)) => format!("Inserted key {} ({} probes)", key, probes),
            (_, HashOp::Search(key)) => match highlights.found() {
                Some(index) => {
                    let value = self.vis.structure().get(key).unwrap_or_default();
                    format!("Found {}:{} at slot {} ({} probes)", key, value, index, probes)
                }
                None => format!("Key {} not found ({} probes)", key, probes),
            },
            (_, HashOp::Delete(key)) if highlights.not_found() => {
                format!("Key {} not found ({} probes)", key, probes)
            }
            (_, HashOp::Delete(key)) => format!("Deleted key {} ({} probes)", key, probes),
        };
    }
}

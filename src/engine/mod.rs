//! Step-producing engines
//!
//! One engine per algorithm family:
//! - [`sorting`]: bubble, selection, insertion, merge, quick and heap sort
//! - [`searching`]: linear and binary search
//! - [`tree`]: BST insert, delete, search and depth-first traversals
//! - [`heap`]: heap insert and delete-root
//! - [`linear`]: stack push/pop and queue enqueue/dequeue
//! - [`hashing`]: hash table insert, search and delete
//! - [`catalog`]: descriptions and complexity tables
//! - [`errors`]: error types shared with the structures
//!
//! # Execution Model
//!
//! An engine is a small state machine over a private copy of the structure.
//! Each call to [`Engine::advance`] performs one unit of work (one loop
//! iteration, one sift level, one merge output) and queues the steps it
//! produced. Recursive algorithms keep an explicit work-list instead of a
//! call stack, so every engine can stop between any two steps.
//!
//! [`StepSequence`] wraps an engine as an [`Iterator`] of [`Step`]s. It checks
//! the run's [`RunContext`] before handing out each step and before asking the
//! engine for more work; once the run is cancelled the iterator is fused.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod heap;
pub mod linear;
pub mod searching;
pub mod sorting;
pub mod tree;

use crate::step::Step;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

pub use errors::EngineError;

/// A resumable algorithm
pub trait Engine {
    /// Short name used in logs and the status bar
    fn name(&self) -> &'static str;

    /// Do one unit of work, queueing its steps on `out`
    ///
    /// Returns `false` once the algorithm has nothing left to do; steps
    /// queued by that final call are still delivered.
    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool;
}

/// Cancellation flag shared by a run and whoever controls it
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    cancelled: Rc<Cell<bool>>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Lazily produced, cancellable sequence of steps
pub struct StepSequence {
    engine: Box<dyn Engine>,
    pending: VecDeque<Step>,
    exhausted: bool,
    context: RunContext,
}

impl StepSequence {
    pub fn new(engine: impl Engine + 'static, context: RunContext) -> Self {
        StepSequence {
            engine: Box::new(engine),
            pending: VecDeque::new(),
            exhausted: false,
            context,
        }
    }

    /// Sequence over a fixed list of steps
    pub fn scripted(name: &'static str, steps: Vec<Step>, context: RunContext) -> Self {
        StepSequence::new(Script { name, steps }, context)
    }

    pub fn name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// No more steps will be produced
    pub fn is_finished(&self) -> bool {
        self.context.is_cancelled() || (self.exhausted && self.pending.is_empty())
    }
}

impl Iterator for StepSequence {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if self.context.is_cancelled() {
                return None;
            }
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.exhausted {
                return None;
            }
            self.exhausted = !self.engine.advance(&mut self.pending);
        }
    }
}

impl std::fmt::Debug for StepSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSequence")
            .field("engine", &self.engine.name())
            .field("pending", &self.pending.len())
            .field("exhausted", &self.exhausted)
            .field("cancelled", &self.context.is_cancelled())
            .finish()
    }
}

/// Steps worked out up front, handed over in one batch
struct Script {
    name: &'static str,
    steps: Vec<Step>,
}

impl Engine for Script {
    fn name(&self) -> &'static str {
        self.name
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        out.extend(self.steps.drain(..));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        left: usize,
    }

    impl Engine for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
            if self.left == 0 {
                return false;
            }
            out.push_back(Step::MarkCurrent { index: self.left });
            self.left -= 1;
            true
        }
    }

    #[test]
    fn test_sequence_drains_engine() {
        let seq = StepSequence::new(Counter { left: 3 }, RunContext::new());
        let indices: Vec<_> = seq
            .map(|s| match s {
                Step::MarkCurrent { index } => index,
                other => panic!("unexpected step {:?}", other),
            })
            .collect();
        assert_eq!(indices, vec![3, 2, 1]);
    }

    #[test]
    fn test_cancel_stops_mid_run() {
        let ctx = RunContext::new();
        let mut seq = StepSequence::new(Counter { left: 10 }, ctx.clone());
        assert!(seq.next().is_some());
        ctx.cancel();
        assert!(seq.is_finished());
        assert_eq!(seq.next(), None);
    }

    #[test]
    fn test_scripted_sequence() {
        let seq = StepSequence::scripted("script", vec![Step::NotFound], RunContext::new());
        assert_eq!(seq.name(), "script");
        assert_eq!(seq.collect::<Vec<_>>(), vec![Step::NotFound]);
    }
}

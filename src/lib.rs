//! # Introduction
//!
//! algoviz animates classic algorithms and data structures step by step in
//! the terminal. Every algorithm is an engine that produces a lazy sequence
//! of primitive steps (compare, swap, probe, structural insert, ...). A
//! playback controller applies those steps one at a time, at a configurable
//! pace, to the structure a panel owns and hands each one to the renderers.
//!
//! ## Pipeline
//!
//! ```text
//! Structure → Engine → StepSequence → Playback → Apply + RenderSink → TUI
//! ```
//!
//! 1. [`structures`]: array, BST, heap, stack, queue and hash table models
//!    with instantaneous primitives and step replay.
//! 2. [`engine`]: sorting, searching, tree, heap, stack/queue and hashing
//!    engines, plus the algorithm catalog and error types.
//! 3. [`step`]: the step vocabulary shared by engines and renderers, and the
//!    bounded [`step::StepLog`].
//! 4. [`playback`]: pacing, pause/resume and cooperative cancellation.
//! 5. [`session`]: one visualizer per panel with its run guard and
//!    highlights.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`config`] holds the command line; [`headless`] prints a step trace
//! instead of starting the TUI.

pub mod config;
pub mod engine;
pub mod headless;
pub mod playback;
pub mod session;
pub mod step;
pub mod structures;
pub mod ui;

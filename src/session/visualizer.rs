//! One panel's structure plus its run guard
//!
//! A [`Visualizer`] owns the authoritative structure for a panel and at most
//! one active [`Playback`]. New run requests while a run is active are
//! rejected with [`RunRequest::Busy`] and change nothing.

use crate::engine::StepSequence;
use crate::playback::{Outcome, Pacer, Playback, PlaybackState, RenderSink, Speed};
use crate::session::highlights::Highlights;
use crate::step::{Apply, Step, StepLog};
use std::time::Instant;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRequest {
    Started,
    Busy,
    /// The panel has nothing to run for this request
    Unavailable,
}

/// Run state shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Playing,
    Paused,
    Done,
    Aborted,
}

impl RunState {
    pub fn label(self) -> &'static str {
        match self {
            RunState::Idle => "IDLE",
            RunState::Playing => "PLAYING",
            RunState::Paused => "PAUSED",
            RunState::Done => "DONE",
            RunState::Aborted => "ABORTED",
        }
    }
}

/// Fans each applied step out to the highlights and the step log
struct Observers<'a> {
    highlights: &'a mut Highlights,
    log: &'a mut StepLog,
}

impl RenderSink for Observers<'_> {
    fn render(&mut self, step: &Step) {
        self.highlights.render(step);
        self.log.record(step);
    }
}

/// Run controls shared by every panel, independent of the structure type
pub trait Runner {
    fn is_running(&self) -> bool;
    fn state(&self) -> RunState;
    fn toggle_pause(&mut self);
    fn cancel(&mut self);
    fn speed(&self) -> Speed;
    fn set_speed(&mut self, speed: Speed);
    /// Take a step if one is due; returns the outcome when the run ends
    fn tick(&mut self, now: Instant) -> Option<Outcome>;
    /// How the most recent run ended
    fn last_outcome(&self) -> Option<Outcome>;
    fn highlights(&self) -> &Highlights;
    fn log(&self) -> &StepLog;
}

#[derive(Debug)]
pub struct Visualizer<S> {
    structure: S,
    run: Option<Playback>,
    last_outcome: Option<Outcome>,
    speed: Speed,
    highlights: Highlights,
    log: StepLog,
}

impl<S: Apply> Visualizer<S> {
    pub fn new(structure: S, speed: Speed, history: usize) -> Self {
        Visualizer {
            structure,
            run: None,
            last_outcome: None,
            speed,
            highlights: Highlights::new(),
            log: StepLog::new(history),
        }
    }

    pub fn structure(&self) -> &S {
        &self.structure
    }

    /// Mutable access for instantaneous operations; `None` while a run is active
    pub fn structure_mut(&mut self) -> Option<&mut S> {
        if self.is_running() {
            return None;
        }
        Some(&mut self.structure)
    }

    /// Replace the structure and forget all marks
    pub fn replace(&mut self, structure: S) -> RunRequest {
        if self.is_running() {
            warn!("structure replacement rejected: a run is active");
            return RunRequest::Busy;
        }
        self.structure = structure;
        self.clear_marks();
        RunRequest::Started
    }

    pub fn clear_marks(&mut self) {
        self.highlights.clear();
        self.last_outcome = None;
    }

    pub fn highlights_mut(&mut self) -> &mut Highlights {
        &mut self.highlights
    }

    pub fn log_mut(&mut self) -> &mut StepLog {
        &mut self.log
    }

    pub fn start(&mut self, sequence: StepSequence) -> RunRequest {
        if self.is_running() {
            warn!(run = sequence.name(), "run rejected: another run is active");
            return RunRequest::Busy;
        }
        self.highlights.clear();
        self.last_outcome = None;
        self.log.note(format!("-- {} --", sequence.name()));
        self.run = Some(Playback::new(sequence, self.speed));
        RunRequest::Started
    }

    /// Drain the active run, pausing through `pacer` between steps
    pub fn finish_with<P: Pacer + ?Sized>(&mut self, pacer: &mut P) -> Option<Outcome> {
        let mut playback = self.run.take()?;
        let mut observers = Observers {
            highlights: &mut self.highlights,
            log: &mut self.log,
        };
        let outcome = playback.run_to_end(&mut self.structure, &mut observers, pacer);
        self.last_outcome = Some(outcome);
        Some(outcome)
    }
}

impl<S: Apply> Runner for Visualizer<S> {
    fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|p| p.outcome().is_none())
    }

    fn state(&self) -> RunState {
        match (self.run.as_ref().map(Playback::state), self.last_outcome) {
            (Some(PlaybackState::Playing), _) => RunState::Playing,
            (Some(PlaybackState::Paused), _) => RunState::Paused,
            (Some(PlaybackState::Finished(outcome)), _) | (None, Some(outcome)) => {
                if outcome.is_completed() {
                    RunState::Done
                } else {
                    RunState::Aborted
                }
            }
            (None, None) => RunState::Idle,
        }
    }

    fn toggle_pause(&mut self) {
        if let Some(playback) = self.run.as_mut() {
            playback.toggle_pause();
        }
    }

    fn cancel(&mut self) {
        if let Some(mut playback) = self.run.take() {
            playback.cancel();
            self.last_outcome = playback.outcome();
            self.log.note("-- cancelled --");
        }
    }

    fn speed(&self) -> Speed {
        self.speed
    }

    fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        if let Some(playback) = self.run.as_mut() {
            playback.set_speed(speed);
        }
    }

    fn tick(&mut self, now: Instant) -> Option<Outcome> {
        let playback = self.run.as_mut()?;
        let mut observers = Observers {
            highlights: &mut self.highlights,
            log: &mut self.log,
        };
        let outcome = playback.tick(now, &mut self.structure, &mut observers)?;
        self.run = None;
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    fn log(&self) -> &StepLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sorting::{self, SortAlgorithm};
    use crate::engine::RunContext;
    use crate::playback::NoPacer;
    use crate::structures::ArrayBuffer;

    fn visualizer(values: Vec<i64>) -> Visualizer<ArrayBuffer> {
        Visualizer::new(ArrayBuffer::from_values(values), Speed::from_millis(1), 64)
    }

    #[test]
    fn test_overlapping_runs_are_rejected() {
        let mut vis = visualizer(vec![3, 1, 2]);
        let first = sorting::run(vis.structure(), SortAlgorithm::Bubble, RunContext::new());
        let second = sorting::run(vis.structure(), SortAlgorithm::Quick, RunContext::new());
        assert_eq!(vis.start(first), RunRequest::Started);
        assert_eq!(vis.start(second), RunRequest::Busy);
        assert!(vis.structure_mut().is_none());
        assert_eq!(vis.replace(ArrayBuffer::new()), RunRequest::Busy);
    }

    #[test]
    fn test_finish_records_outcome_and_log() {
        let mut vis = visualizer(vec![3, 1, 2]);
        let seq = sorting::run(vis.structure(), SortAlgorithm::Merge, RunContext::new());
        vis.start(seq);
        let outcome = vis.finish_with(&mut NoPacer).expect("run was active");
        assert!(outcome.is_completed());
        assert_eq!(vis.state(), RunState::Done);
        assert_eq!(vis.structure().values(), &[1, 2, 3]);
        assert_eq!(vis.log().total_recorded(), outcome.steps() + 1);
    }

    #[test]
    fn test_cancel_marks_aborted() {
        let mut vis = visualizer(vec![5, 4, 3, 2, 1]);
        let seq = sorting::run(vis.structure(), SortAlgorithm::Bubble, RunContext::new());
        vis.start(seq);
        vis.tick(Instant::now());
        vis.cancel();
        assert_eq!(vis.state(), RunState::Aborted);
        assert!(!vis.is_running());
        assert!(vis.structure_mut().is_some());
    }
}

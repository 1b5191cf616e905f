//! Playback controller
//!
//! A [`Playback`] drains one [`StepSequence`] at a controlled pace. Every step
//! is first replayed onto the authoritative structure through [`Apply`], then
//! handed to a [`RenderSink`]. Two driving styles are supported:
//!
//! - event-loop driven: call [`Playback::tick`] on every loop iteration; a step
//!   is taken only once the delay since the previous one has elapsed
//! - blocking: [`Playback::run_to_end`] takes steps back to back, sleeping
//!   through a [`Pacer`] in between
//!
//! Cancellation goes through the sequence's run context, so a cancelled run
//! stops at the next step boundary and leaves the structure as it was after
//! the last applied step.

use crate::engine::StepSequence;
use crate::step::{Apply, Step};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const MIN_DELAY_MS: u64 = 1;
const MAX_DELAY_MS: u64 = 5_000;

/// Delay between two consecutive steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed {
    delay_ms: u64,
}

impl Speed {
    pub fn from_millis(ms: u64) -> Self {
        Speed {
            delay_ms: ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS),
        }
    }

    /// Slider position 1..=100 (right is faster) to a delay of `101 - v` ms
    pub fn from_slider(value: u8) -> Self {
        let value = u64::from(value.clamp(1, 100));
        Speed::from_millis(101 - value)
    }

    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn millis(self) -> u64 {
        self.delay_ms
    }

    pub fn faster(self) -> Self {
        Speed::from_millis(self.delay_ms * 3 / 4)
    }

    pub fn slower(self) -> Self {
        Speed::from_millis(self.delay_ms * 4 / 3 + 1)
    }
}

/// Receives every step after it has been applied
pub trait RenderSink {
    fn render(&mut self, step: &Step);
}

impl<F: FnMut(&Step)> RenderSink for F {
    fn render(&mut self, step: &Step) {
        self(step)
    }
}

/// Waits between steps of a blocking run
pub trait Pacer {
    fn pause_for(&mut self, delay: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause_for(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause_for(&mut self, _delay: Duration) {}
}

/// How a run ended and how many steps were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed { steps: usize },
    Aborted { steps: usize },
}

impl Outcome {
    pub fn steps(self) -> usize {
        match self {
            Outcome::Completed { steps } | Outcome::Aborted { steps } => steps,
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Finished(Outcome),
}

#[derive(Debug)]
pub struct Playback {
    sequence: StepSequence,
    speed: Speed,
    paused: bool,
    last_step: Option<Instant>,
    applied: usize,
    outcome: Option<Outcome>,
}

impl Playback {
    pub fn new(sequence: StepSequence, speed: Speed) -> Self {
        debug!(run = sequence.name(), delay_ms = speed.millis(), "run started");
        Playback {
            sequence,
            speed,
            paused: false,
            last_step: None,
            applied: 0,
            outcome: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.sequence.name()
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop at the next step boundary
    pub fn cancel(&mut self) {
        self.sequence.context().cancel();
        self.finish();
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn state(&self) -> PlaybackState {
        match (self.outcome, self.paused) {
            (Some(outcome), _) => PlaybackState::Finished(outcome),
            (None, true) => PlaybackState::Paused,
            (None, false) => PlaybackState::Playing,
        }
    }

    /// Whether the next step may be taken at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        if self.paused || self.outcome.is_some() {
            return false;
        }
        self.last_step
            .map_or(true, |last| now.saturating_duration_since(last) >= self.speed.delay())
    }

    /// Take one step regardless of pacing
    ///
    /// Returns `None` once the run has ended; the outcome is then available
    /// from [`Playback::outcome`].
    pub fn step<S, R>(&mut self, target: &mut S, sink: &mut R) -> Option<Step>
    where
        S: Apply + ?Sized,
        R: RenderSink + ?Sized,
    {
        if self.outcome.is_some() {
            return None;
        }
        match self.sequence.next() {
            Some(step) => {
                target.apply(&step);
                sink.render(&step);
                self.applied += 1;
                trace!(run = self.sequence.name(), step = %step, "applied");
                if self.sequence.is_finished() {
                    self.finish();
                }
                Some(step)
            }
            None => {
                self.finish();
                None
            }
        }
    }

    /// Take a step if one is due; returns the outcome when the run ends
    pub fn tick<S, R>(&mut self, now: Instant, target: &mut S, sink: &mut R) -> Option<Outcome>
    where
        S: Apply + ?Sized,
        R: RenderSink + ?Sized,
    {
        if !self.is_due(now) {
            return None;
        }
        self.last_step = Some(now);
        self.step(target, sink);
        self.outcome
    }

    /// Drain the sequence, pausing between steps
    pub fn run_to_end<S, R, P>(&mut self, target: &mut S, sink: &mut R, pacer: &mut P) -> Outcome
    where
        S: Apply + ?Sized,
        R: RenderSink + ?Sized,
        P: Pacer + ?Sized,
    {
        loop {
            if let Some(outcome) = self.outcome {
                return outcome;
            }
            if self.step(target, sink).is_some() && self.outcome.is_none() {
                pacer.pause_for(self.speed.delay());
            }
        }
    }

    fn finish(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = if self.sequence.context().is_cancelled() {
            Outcome::Aborted {
                steps: self.applied,
            }
        } else {
            Outcome::Completed {
                steps: self.applied,
            }
        };
        debug!(run = self.sequence.name(), ?outcome, "run finished");
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sorting::{self, SortAlgorithm};
    use crate::engine::RunContext;
    use crate::structures::ArrayBuffer;

    #[test]
    fn test_speed_slider() {
        assert_eq!(Speed::from_slider(100).millis(), 1);
        assert_eq!(Speed::from_slider(1).millis(), 100);
        assert_eq!(Speed::from_slider(0).millis(), 100);
        assert!(Speed::from_millis(100).faster() < Speed::from_millis(100));
        assert!(Speed::from_millis(100).slower() > Speed::from_millis(100));
    }

    #[test]
    fn test_run_to_end_sorts_and_renders_each_step() {
        let mut array = ArrayBuffer::from_values(vec![4, 2, 3, 1]);
        let seq = sorting::run(&array, SortAlgorithm::Insertion, RunContext::new());
        let mut playback = Playback::new(seq, Speed::from_millis(10));
        let mut rendered = 0;
        let mut sink = |_: &Step| rendered += 1;
        let outcome = playback.run_to_end(&mut array, &mut sink, &mut NoPacer);
        assert!(outcome.is_completed());
        assert_eq!(outcome.steps(), rendered);
        assert!(array.is_sorted());
    }

    #[test]
    fn test_tick_respects_delay_and_pause() {
        let mut array = ArrayBuffer::from_values(vec![3, 2, 1]);
        let seq = sorting::run(&array, SortAlgorithm::Bubble, RunContext::new());
        let mut playback = Playback::new(seq, Speed::from_millis(100));
        let mut sink = |_: &Step| {};
        let start = Instant::now();

        playback.tick(start, &mut array, &mut sink);
        assert_eq!(playback.applied(), 1);
        playback.tick(start + Duration::from_millis(10), &mut array, &mut sink);
        assert_eq!(playback.applied(), 1);

        playback.pause();
        playback.tick(start + Duration::from_millis(500), &mut array, &mut sink);
        assert_eq!(playback.applied(), 1);
        assert_eq!(playback.state(), PlaybackState::Paused);

        playback.resume();
        playback.tick(start + Duration::from_millis(500), &mut array, &mut sink);
        assert_eq!(playback.applied(), 2);
    }

    #[test]
    fn test_cancel_aborts_without_more_steps() {
        let mut array = ArrayBuffer::from_values(vec![5, 4, 3, 2, 1]);
        let seq = sorting::run(&array, SortAlgorithm::Selection, RunContext::new());
        let mut playback = Playback::new(seq, Speed::from_millis(1));
        let mut sink = |_: &Step| {};
        playback.step(&mut array, &mut sink);
        playback.step(&mut array, &mut sink);
        playback.cancel();
        assert_eq!(playback.step(&mut array, &mut sink), None);
        assert_eq!(playback.outcome(), Some(Outcome::Aborted { steps: 2 }));
        let mut values = array.values().to_vec();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}

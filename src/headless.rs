//! Step trace without a terminal UI
//!
//! Runs one sort or search from the command line and prints every step as it
//! is applied, followed by the final array. With `--speed` the trace is paced
//! like the TUI; otherwise it is printed as fast as possible.

use crate::config::{Config, HeadlessRun};
use crate::engine::searching::{self, SearchAlgorithm};
use crate::engine::{sorting, RunContext};
use crate::playback::{NoPacer, Outcome, Playback, Speed, ThreadPacer};
use crate::step::Step;
use crate::structures::ArrayBuffer;
use std::error::Error;
use std::io::{self, Write};
use tracing::info;

pub fn run_trace<W: Write>(config: &Config, out: &mut W) -> Result<Outcome, Box<dyn Error>> {
    let mut rng = config.rng();
    let (mut array, sequence) = match config.run {
        HeadlessRun::Sort(algorithm) => {
            let array = match &config.values {
                Some(values) => ArrayBuffer::from_values(values.clone()),
                None => ArrayBuffer::random(&mut rng, config.array_size),
            };
            let sequence = sorting::run(&array, algorithm, RunContext::new());
            (array, sequence)
        }
        HeadlessRun::Search { algorithm, target } => {
            let array = match (&config.values, algorithm) {
                (Some(values), SearchAlgorithm::Binary) => {
                    let mut sorted = values.clone();
                    sorted.sort_unstable();
                    ArrayBuffer::from_values(sorted)
                }
                (Some(values), SearchAlgorithm::Linear) => ArrayBuffer::from_values(values.clone()),
                (None, SearchAlgorithm::Binary) => ArrayBuffer::random_sorted(&mut rng),
                (None, SearchAlgorithm::Linear) => ArrayBuffer::random_unsorted(&mut rng),
            };
            let sequence = searching::run(&array, algorithm, target, RunContext::new());
            (array, sequence)
        }
    };

    info!(run = sequence.name(), len = array.len(), "headless trace");
    writeln!(out, "{} on {:?}", sequence.name(), array.values())?;

    let speed = Speed::from_millis(config.speed.unwrap_or(1));
    let mut playback = Playback::new(sequence, speed);
    let mut number = 0;
    let mut failure: Option<io::Error> = None;
    let mut sink = |step: &Step| {
        number += 1;
        if failure.is_none() {
            failure = writeln!(out, "{:>5}  {}", number, step).err();
        }
    };
    let outcome = match config.speed {
        Some(_) => playback.run_to_end(&mut array, &mut sink, &mut ThreadPacer),
        None => playback.run_to_end(&mut array, &mut sink, &mut NoPacer),
    };
    if let Some(err) = failure {
        return Err(err.into());
    }

    writeln!(out, "result: {:?}", array.values())?;
    writeln!(out, "{} steps", outcome.steps())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sorting::SortAlgorithm;

    #[test]
    fn test_sort_trace() {
        let config = Config {
            headless: true,
            run: HeadlessRun::Sort(SortAlgorithm::Insertion),
            values: Some(vec![3, 1, 2]),
            ..Config::default()
        };
        let mut out = Vec::new();
        let outcome = run_trace(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(outcome.is_completed());
        assert!(text.lines().next().is_some_and(|first| first.ends_with("on [3, 1, 2]")));
        assert!(text.contains("result: [1, 2, 3]"));
        assert_eq!(text.lines().count(), outcome.steps() + 3);
    }

    #[test]
    fn test_binary_search_trace_sorts_values() {
        let config = Config {
            headless: true,
            run: HeadlessRun::Search {
                algorithm: SearchAlgorithm::Binary,
                target: 8,
            },
            values: Some(vec![8, 1, 5]),
            ..Config::default()
        };
        let mut out = Vec::new();
        run_trace(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("found at 2"), "{}", text);
    }
}

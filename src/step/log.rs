// Bounded history of applied steps

use super::Step;
use std::collections::VecDeque;

/// One recorded step with its position in the run
#[derive(Debug, Clone)]
pub struct LogLine {
    pub number: usize,
    pub text: String,
}

/// Keeps the most recent step descriptions of a visualizer
///
/// Once `capacity` lines are stored the oldest line is dropped for every new
/// one, so a long sort never grows the log without bound.
#[derive(Debug, Clone)]
pub struct StepLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
    recorded: usize,
}

impl StepLog {
    pub fn new(capacity: usize) -> Self {
        StepLog {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            recorded: 0,
        }
    }

    /// Record an applied step
    pub fn record(&mut self, step: &Step) {
        self.push(step.to_string());
    }

    /// Record a free-form note (run started, run aborted, ...)
    pub fn note(&mut self, text: impl Into<String>) {
        self.push(text.into());
    }

    fn push(&mut self, text: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.recorded += 1;
        self.lines.push_back(LogLine {
            number: self.recorded,
            text,
        });
    }

    /// Lines currently held, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Number of lines currently held
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of lines ever recorded, including dropped ones
    pub fn total_recorded(&self) -> usize {
        self.recorded
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.recorded = 0;
    }
}

impl Default for StepLog {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = StepLog::new(2);
        log.record(&Step::compare(0, 1));
        log.record(&Step::swap(0, 1));
        log.record(&Step::MarkSorted { index: 1 });

        let numbers: Vec<usize> = log.lines().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 3]);
        assert_eq!(log.total_recorded(), 3);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut log = StepLog::new(0);
        log.note("started");
        assert!(log.is_empty());
        assert_eq!(log.total_recorded(), 0);
    }
}

// Per-index visual marks derived from the step stream

use crate::playback::RenderSink;
use crate::step::{Operand, Site, Step};
use rustc_hash::{FxHashMap, FxHashSet};

/// How an element should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Comparing,
    Swapping,
    Current,
    Probing,
    Found,
    Sorted,
    /// Probed or compared earlier in this operation
    Checked,
    InRange,
}

/// Render sink that remembers what the last steps pointed at
///
/// Compare/swap/current/probe marks only last until the next step. Sorted
/// and checked marks stick until [`Highlights::clear`].
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    transient: FxHashMap<usize, Mark>,
    sorted: FxHashSet<usize>,
    checked: FxHashSet<usize>,
    range: Option<(usize, usize)>,
    found: Option<usize>,
    not_found: bool,
    visited: Vec<usize>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Highlights::default();
    }

    /// Mark to draw at `index`, if any
    pub fn mark(&self, index: usize) -> Option<Mark> {
        if self.found == Some(index) {
            return Some(Mark::Found);
        }
        if let Some(&mark) = self.transient.get(&index) {
            return Some(mark);
        }
        if self.sorted.contains(&index) {
            return Some(Mark::Sorted);
        }
        if self.checked.contains(&index) {
            return Some(Mark::Checked);
        }
        match self.range {
            Some((lo, hi)) if (lo..=hi).contains(&index) => Some(Mark::InRange),
            _ => None,
        }
    }

    pub fn mark_all_sorted(&mut self, len: usize) {
        self.transient.clear();
        self.range = None;
        self.sorted.extend(0..len);
    }

    pub fn range(&self) -> Option<(usize, usize)> {
        self.range
    }

    pub fn found(&self) -> Option<usize> {
        self.found
    }

    pub fn not_found(&self) -> bool {
        self.not_found
    }

    /// Indices named by `MarkCurrent`, in order
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    fn site_index(site: &Site) -> usize {
        match *site {
            Site::Index(i) | Site::Node(i) => i,
            Site::Slot { index, .. } => index,
        }
    }
}

impl RenderSink for Highlights {
    fn render(&mut self, step: &Step) {
        // The previous probe becomes history
        let probed: Vec<usize> = self
            .transient
            .iter()
            .filter(|(_, &mark)| mark == Mark::Probing)
            .map(|(&index, _)| index)
            .collect();
        self.checked.extend(probed);
        self.transient.clear();

        match step {
            Step::Compare { i, against } => {
                self.transient.insert(*i, Mark::Comparing);
                match against {
                    Operand::Index(j) => {
                        self.transient.insert(*j, Mark::Comparing);
                    }
                    Operand::Value(_) => {
                        self.checked.insert(*i);
                    }
                }
            }
            Step::Swap { i, j } => {
                self.transient.insert(*i, Mark::Swapping);
                self.transient.insert(*j, Mark::Swapping);
            }
            Step::SetValue { index, .. } => {
                self.transient.insert(*index, Mark::Swapping);
            }
            Step::MarkSorted { index } => {
                self.sorted.insert(*index);
            }
            Step::MarkCurrent { index } => {
                self.transient.insert(*index, Mark::Current);
                self.visited.push(*index);
            }
            Step::RangeUpdate { lo, hi } => {
                self.range = Some((*lo, *hi));
            }
            Step::Probe { index, .. } => {
                self.transient.insert(*index, Mark::Probing);
            }
            Step::Found { index } => {
                self.found = Some(*index);
            }
            Step::NotFound => {
                self.not_found = true;
            }
            Step::StructuralInsert { site, .. } | Step::StructuralDelete { site, .. } => {
                self.transient.insert(Self::site_index(site), Mark::Current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_marks_fade() {
        let mut h = Highlights::new();
        h.render(&Step::compare(0, 1));
        assert_eq!(h.mark(1), Some(Mark::Comparing));
        h.render(&Step::MarkSorted { index: 3 });
        assert_eq!(h.mark(1), None);
        assert_eq!(h.mark(3), Some(Mark::Sorted));
    }

    #[test]
    fn test_probes_become_checked() {
        let mut h = Highlights::new();
        h.render(&Step::Probe { index: 2, key: 9 });
        h.render(&Step::Probe { index: 3, key: 9 });
        assert_eq!(h.mark(2), Some(Mark::Checked));
        assert_eq!(h.mark(3), Some(Mark::Probing));
        h.render(&Step::Found { index: 3 });
        assert_eq!(h.mark(3), Some(Mark::Found));
    }

    #[test]
    fn test_range_and_visits() {
        let mut h = Highlights::new();
        h.render(&Step::RangeUpdate { lo: 2, hi: 4 });
        h.render(&Step::MarkCurrent { index: 7 });
        assert_eq!(h.mark(3), Some(Mark::InRange));
        assert_eq!(h.mark(5), None);
        assert_eq!(h.visited(), &[7]);
        h.clear();
        assert!(h.visited().is_empty());
    }
}

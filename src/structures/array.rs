//! Integer buffer used by the sorting and searching panels

use crate::engine::constants::{
    SEARCH_ARRAY_SIZE, SEARCH_SORTED_JITTER, SEARCH_SORTED_STRIDE, SEARCH_VALUE_RANGE,
    SORT_VALUE_RANGE,
};
use crate::step::{Apply, Item, Site, Step};
use rand::Rng;

/// Ordered sequence of integers, mutated in place
///
/// The length stays fixed while a run is active; only [`ArrayBuffer::replace`]
/// and the generators change it, and the session refuses those mid-run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayBuffer {
    values: Vec<i64>,
}

impl ArrayBuffer {
    pub fn new() -> Self {
        ArrayBuffer { values: Vec::new() }
    }

    pub fn from_values(values: Vec<i64>) -> Self {
        ArrayBuffer { values }
    }

    /// Random values for a sorting run
    pub fn random<R: Rng>(rng: &mut R, size: usize) -> Self {
        let values = (0..size)
            .map(|_| rng.random_range(SORT_VALUE_RANGE))
            .collect();
        ArrayBuffer { values }
    }

    /// Random values for a linear search (unsorted)
    pub fn random_unsorted<R: Rng>(rng: &mut R) -> Self {
        let values = (0..SEARCH_ARRAY_SIZE)
            .map(|_| rng.random_range(SEARCH_VALUE_RANGE))
            .collect();
        ArrayBuffer { values }
    }

    /// Strictly increasing values for a binary search
    pub fn random_sorted<R: Rng>(rng: &mut R) -> Self {
        let values = (0..SEARCH_ARRAY_SIZE as i64)
            .map(|i| (i + 1) * SEARCH_SORTED_STRIDE + rng.random_range(0..SEARCH_SORTED_JITTER))
            .collect();
        ArrayBuffer { values }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }

    /// Non-decreasing order check
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Replace the whole buffer
    pub fn replace(&mut self, values: Vec<i64>) {
        self.values = values;
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        if i < self.values.len() && j < self.values.len() {
            self.values.swap(i, j);
        }
    }

    pub fn set(&mut self, index: usize, value: i64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }
}

impl Apply for ArrayBuffer {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::Swap { i, j } => self.swap(*i, *j),
            Step::SetValue { index, value } => self.set(*index, *value),
            Step::StructuralInsert {
                site: Site::Index(index),
                item: Item::Value(value),
            } if *index <= self.values.len() => self.values.insert(*index, *value),
            Step::StructuralDelete {
                site: Site::Index(index),
                ..
            } if *index < self.values.len() => {
                self.values.remove(*index);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generators_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);

        let sort = ArrayBuffer::random(&mut rng, 40);
        assert_eq!(sort.len(), 40);
        assert!(sort.values().iter().all(|v| SORT_VALUE_RANGE.contains(v)));

        let unsorted = ArrayBuffer::random_unsorted(&mut rng);
        assert_eq!(unsorted.len(), SEARCH_ARRAY_SIZE);

        let sorted = ArrayBuffer::random_sorted(&mut rng);
        assert!(sorted.values().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_apply_swap_and_set() {
        let mut array = ArrayBuffer::from_values(vec![5, 3, 8]);
        array.apply(&Step::swap(0, 1));
        array.apply(&Step::SetValue { index: 2, value: 1 });
        array.apply(&Step::compare(0, 2));
        assert_eq!(array.values(), &[3, 5, 1]);
    }

    #[test]
    fn test_apply_ignores_out_of_bounds() {
        let mut array = ArrayBuffer::from_values(vec![1, 2]);
        array.apply(&Step::swap(0, 9));
        array.apply(&Step::SetValue { index: 5, value: 0 });
        assert_eq!(array.values(), &[1, 2]);
    }
}

//! Fixed-size hash table with two hash functions and two collision strategies
//!
//! Every slot is a bucket of entries:
//! - under linear probing a bucket holds zero or one entry
//! - under chaining a bucket holds an insertion-ordered chain with unique keys
//!
//! Linear-probing deletes use backward shifting, so every stored key stays
//! reachable from its home slot without tombstones.

use crate::engine::constants::{GOLDEN_RATIO_CONJUGATE, TABLE_SIZE_RANGE};
use crate::engine::errors::{parse_number, EngineError};
use crate::step::{Apply, Item, Site, Step};
use std::fmt;

/// A key/value pair stored in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: i64,
    pub value: String,
}

impl Entry {
    pub fn new(key: i64, value: impl Into<String>) -> Self {
        Entry {
            key,
            value: value.into(),
        }
    }
}

/// Parse `"key:value"` or a bare `"key"`
///
/// A bare key gets the value `value_<key>`.
pub fn parse_entry(input: &str) -> Result<Entry, EngineError> {
    match input.split_once(':') {
        Some((key, value)) => {
            let key = parse_number(key)?;
            let value = value.trim();
            if value.is_empty() {
                return Err(EngineError::invalid_input(input, "missing value after ':'"));
            }
            Ok(Entry::new(key, value))
        }
        None => {
            let key = parse_number(input)?;
            Ok(Entry::new(key, format!("value_{}", key)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// `key mod size`
    #[default]
    Division,
    /// `floor(size * frac(key * A))` with `A = (sqrt(5) - 1) / 2`
    Multiplication,
}

impl HashFunction {
    pub fn hash(self, key: i64, size: usize) -> usize {
        match self {
            HashFunction::Division => key.rem_euclid(size as i64) as usize,
            HashFunction::Multiplication => {
                let fraction = (key as f64 * GOLDEN_RATIO_CONJUGATE).rem_euclid(1.0);
                let index = (size as f64 * fraction).floor() as usize;
                index.min(size - 1)
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashFunction::Division => "Division",
            HashFunction::Multiplication => "Multiplication",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HashFunction::Division => HashFunction::Multiplication,
            HashFunction::Multiplication => HashFunction::Division,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionStrategy {
    #[default]
    LinearProbing,
    Chaining,
}

impl CollisionStrategy {
    pub fn name(self) -> &'static str {
        match self {
            CollisionStrategy::LinearProbing => "Linear probing",
            CollisionStrategy::Chaining => "Chaining",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CollisionStrategy::LinearProbing => CollisionStrategy::Chaining,
            CollisionStrategy::Chaining => CollisionStrategy::LinearProbing,
        }
    }
}

/// Where an insert landed
///
/// `probes` counts the occupied slots (linear probing) or chain entries
/// (chaining) passed before reaching the final position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub position: usize,
    pub probes: usize,
    pub updated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found {
        index: usize,
        position: usize,
        probes: usize,
        entry: Entry,
    },
    NotFound {
        probes: usize,
    },
}

/// Entry moved one hole back while repairing a probe cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub from: usize,
    pub to: usize,
    pub entry: Entry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub index: usize,
    pub position: usize,
    pub probes: usize,
    pub entry: Entry,
    pub shifts: Vec<Shift>,
}

/// Occupancy figures shown next to the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashStats {
    pub items: usize,
    pub used_slots: usize,
    pub size: usize,
    pub load_factor: f64,
    pub utilization: f64,
    /// Only meaningful under chaining
    pub longest_chain: usize,
}

impl fmt::Display for HashStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "items {} | used {}/{} | load {:.2} | utilization {:.0}%",
            self.items, self.used_slots, self.size, self.load_factor, self.utilization
        )?;
        if self.longest_chain > 1 {
            write!(f, " | longest chain {}", self.longest_chain)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    buckets: Vec<Vec<Entry>>,
    function: HashFunction,
    strategy: CollisionStrategy,
}

impl HashTable {
    pub fn new(
        size: usize,
        function: HashFunction,
        strategy: CollisionStrategy,
    ) -> Result<Self, EngineError> {
        if !TABLE_SIZE_RANGE.contains(&size) {
            return Err(EngineError::InvalidConfiguration(format!(
                "table size {} outside {}..={}",
                size,
                TABLE_SIZE_RANGE.start(),
                TABLE_SIZE_RANGE.end()
            )));
        }
        Ok(HashTable {
            buckets: vec![Vec::new(); size],
            function,
            strategy,
        })
    }

    /// Rebuild empty with a new configuration
    pub fn reconfigure(
        &mut self,
        size: usize,
        function: HashFunction,
        strategy: CollisionStrategy,
    ) -> Result<(), EngineError> {
        *self = HashTable::new(size, function, strategy)?;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn function(&self) -> HashFunction {
        self.function
    }

    pub fn strategy(&self) -> CollisionStrategy {
        self.strategy
    }

    pub fn bucket(&self, index: usize) -> &[Entry] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = &[Entry]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    pub fn hash(&self, key: i64) -> usize {
        self.function.hash(key, self.size())
    }

    /// Slots visited for `key`, home slot first
    ///
    /// Linear probing visits each slot at most once; chaining only ever
    /// looks at the home slot.
    pub fn probe_sequence(&self, key: i64) -> impl Iterator<Item = usize> {
        let size = self.size();
        let home = self.hash(key);
        let len = match self.strategy {
            CollisionStrategy::LinearProbing => size,
            CollisionStrategy::Chaining => 1,
        };
        (0..len).map(move |offset| (home + offset) % size)
    }

    pub fn insert(&mut self, entry: Entry) -> Result<Placement, EngineError> {
        match self.strategy {
            CollisionStrategy::LinearProbing => {
                let size = self.size();
                let home = self.hash(entry.key);
                for probes in 0..size {
                    let index = (home + probes) % size;
                    let bucket = &mut self.buckets[index];
                    let updated = match bucket.first_mut() {
                        None => {
                            bucket.push(entry);
                            false
                        }
                        Some(existing) if existing.key == entry.key => {
                            *existing = entry;
                            true
                        }
                        Some(_) => continue,
                    };
                    return Ok(Placement {
                        index,
                        position: 0,
                        probes,
                        updated,
                    });
                }
                Err(EngineError::StructureFull { size })
            }
            CollisionStrategy::Chaining => {
                let index = self.hash(entry.key);
                let chain = &mut self.buckets[index];
                if let Some(position) = chain.iter().position(|e| e.key == entry.key) {
                    chain[position] = entry;
                    return Ok(Placement {
                        index,
                        position,
                        probes: position,
                        updated: true,
                    });
                }
                chain.push(entry);
                let position = chain.len() - 1;
                Ok(Placement {
                    index,
                    position,
                    probes: position,
                    updated: false,
                })
            }
        }
    }

    pub fn search(&self, key: i64) -> Lookup {
        match self.strategy {
            CollisionStrategy::LinearProbing => {
                for (probes, index) in self.probe_sequence(key).enumerate() {
                    match self.buckets[index].first() {
                        None => return Lookup::NotFound { probes },
                        Some(entry) if entry.key == key => {
                            return Lookup::Found {
                                index,
                                position: 0,
                                probes,
                                entry: entry.clone(),
                            }
                        }
                        Some(_) => {}
                    }
                }
                Lookup::NotFound {
                    probes: self.size(),
                }
            }
            CollisionStrategy::Chaining => {
                let index = self.hash(key);
                let chain = &self.buckets[index];
                match chain.iter().position(|e| e.key == key) {
                    Some(position) => Lookup::Found {
                        index,
                        position,
                        probes: position,
                        entry: chain[position].clone(),
                    },
                    None => Lookup::NotFound {
                        probes: chain.len(),
                    },
                }
            }
        }
    }

    pub fn get(&self, key: i64) -> Option<&str> {
        match self.search(key) {
            Lookup::Found {
                index, position, ..
            } => self.buckets[index].get(position).map(|e| e.value.as_str()),
            Lookup::NotFound { .. } => None,
        }
    }

    /// Remove `key`; `None` when absent
    pub fn delete(&mut self, key: i64) -> Option<Removal> {
        let Lookup::Found {
            index,
            position,
            probes,
            ..
        } = self.search(key)
        else {
            return None;
        };
        let entry = self.buckets[index].remove(position);
        let shifts = match self.strategy {
            CollisionStrategy::LinearProbing => self.close_gap(index),
            CollisionStrategy::Chaining => Vec::new(),
        };
        Some(Removal {
            index,
            position,
            probes,
            entry,
            shifts,
        })
    }

    /// Backward-shift the cluster following `hole`
    ///
    /// An entry at `j` may fill the hole when the hole lies on its probe path,
    /// that is when it is at least as far from its home as the hole is from `j`.
    fn close_gap(&mut self, mut hole: usize) -> Vec<Shift> {
        let size = self.size();
        let distance = |from: usize, to: usize| (to + size - from) % size;
        let mut shifts = Vec::new();
        let mut j = (hole + 1) % size;
        while j != hole {
            let Some(key) = self.buckets[j].first().map(|e| e.key) else {
                break;
            };
            let home = self.hash(key);
            if distance(home, j) >= distance(hole, j) {
                let entry = self.buckets[j].remove(0);
                self.buckets[hole].push(entry.clone());
                shifts.push(Shift {
                    from: j,
                    to: hole,
                    entry,
                });
                hole = j;
            }
            j = (j + 1) % size;
        }
        shifts
    }

    pub fn stats(&self) -> HashStats {
        let size = self.size();
        let items = self.len();
        let used_slots = self.buckets.iter().filter(|b| !b.is_empty()).count();
        HashStats {
            items,
            used_slots,
            size,
            load_factor: items as f64 / size as f64,
            utilization: used_slots as f64 / size as f64 * 100.0,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl Apply for HashTable {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::StructuralInsert {
                site: Site::Slot { index, position },
                item: Item::Entry(entry),
            } => {
                let Some(bucket) = self.buckets.get_mut(*index) else {
                    return;
                };
                match bucket.get_mut(*position) {
                    Some(existing) => *existing = entry.clone(),
                    None => bucket.push(entry.clone()),
                }
            }
            Step::StructuralDelete {
                site: Site::Slot { index, position },
                ..
            } => {
                if let Some(bucket) = self.buckets.get_mut(*index) {
                    if *position < bucket.len() {
                        bucket.remove(*position);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probing(size: usize) -> HashTable {
        HashTable::new(size, HashFunction::Division, CollisionStrategy::LinearProbing)
            .expect("valid size")
    }

    #[test]
    fn test_collisions_probe_forward() {
        let mut table = probing(7);
        let placements: Vec<_> = [7, 14, 21]
            .into_iter()
            .map(|k| table.insert(Entry::new(k, "v")).expect("room"))
            .map(|p| (p.index, p.probes))
            .collect();
        assert_eq!(placements, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_update_keeps_single_copy() {
        let mut table = probing(5);
        table.insert(Entry::new(3, "a")).expect("room");
        let placement = table.insert(Entry::new(3, "b")).expect("room");
        assert!(placement.updated);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(3), Some("b"));
    }

    #[test]
    fn test_full_table() {
        let mut table = probing(2);
        table.insert(Entry::new(1, "a")).expect("room");
        table.insert(Entry::new(2, "b")).expect("room");
        assert_eq!(
            table.insert(Entry::new(3, "c")),
            Err(EngineError::StructureFull { size: 2 })
        );
        assert_eq!(table.search(5), Lookup::NotFound { probes: 2 });
    }

    #[test]
    fn test_delete_keeps_cluster_reachable() {
        let mut table = probing(7);
        for key in [7, 14, 21, 3] {
            table.insert(Entry::new(key, "v")).expect("room");
        }
        let removal = table.delete(7).expect("present");
        assert_eq!(removal.index, 0);
        assert_eq!(
            removal.shifts.iter().map(|s| (s.from, s.to)).collect::<Vec<_>>(),
            vec![(1, 0), (2, 1)]
        );
        assert!(table.get(14).is_some());
        assert!(table.get(21).is_some());
        assert!(table.get(3).is_some());
        assert!(table.get(7).is_none());
    }

    #[test]
    fn test_shift_skips_entries_at_home() {
        let mut table = probing(7);
        // 0 <- 7, 1 <- 14, 2 <- 2 (home), 3 <- 21
        for key in [7, 14, 2, 21] {
            table.insert(Entry::new(key, "v")).expect("room");
        }
        table.delete(14).expect("present");
        assert_eq!(table.bucket(2)[0].key, 2);
        assert_eq!(table.bucket(1)[0].key, 21);
        assert!(table.get(21).is_some());
    }

    #[test]
    fn test_chaining() {
        let mut table =
            HashTable::new(7, HashFunction::Division, CollisionStrategy::Chaining).expect("valid");
        for key in [7, 14, 21] {
            table.insert(Entry::new(key, "v")).expect("chains never fill");
        }
        assert_eq!(table.bucket(0).len(), 3);
        assert_eq!(table.stats().longest_chain, 3);
        let removal = table.delete(14).expect("present");
        assert_eq!(removal.position, 1);
        assert_eq!(
            table.bucket(0).iter().map(|e| e.key).collect::<Vec<_>>(),
            vec![7, 21]
        );
    }

    #[test]
    fn test_hash_functions_stay_in_range() {
        for size in [1, 7, 10, 64] {
            for key in [-1000, -7, -1, 0, 1, 13, 99, 123_456] {
                assert!(HashFunction::Division.hash(key, size) < size);
                assert!(HashFunction::Multiplication.hash(key, size) < size);
            }
        }
        assert_eq!(HashFunction::Division.hash(-1, 7), 6);
    }

    #[test]
    fn test_multiplication_hash_values() {
        let h = |key| HashFunction::Multiplication.hash(key, 10);
        assert_eq!(h(7), 3);
        assert_eq!(h(10), 1);
        assert_eq!(h(123), 0);
        // Negative keys wrap through the Euclidean fraction
        assert_eq!(h(-3), 1);
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("5:apple"), Ok(Entry::new(5, "apple")));
        assert_eq!(parse_entry(" 12 "), Ok(Entry::new(12, "value_12")));
        assert!(parse_entry("x:apple").is_err());
        assert!(parse_entry("5:").is_err());
    }

    #[test]
    fn test_size_is_validated() {
        assert!(matches!(
            HashTable::new(0, HashFunction::Division, CollisionStrategy::Chaining),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(HashTable::new(65, HashFunction::Division, CollisionStrategy::Chaining).is_err());
    }

    #[test]
    fn test_stats() {
        let mut table = probing(4);
        table.insert(Entry::new(1, "a")).expect("room");
        table.insert(Entry::new(5, "b")).expect("room");
        let stats = table.stats();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.used_slots, 2);
        assert!((stats.load_factor - 0.5).abs() < f64::EPSILON);
    }
}

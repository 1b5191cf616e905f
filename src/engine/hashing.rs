//! Hash table engine
//!
//! Each operation first probes the slots it would visit (one `Probe` step per
//! slot), then reports its outcome:
//! - insert: `StructuralInsert` at the landing slot, or `NotFound` when a
//!   linear-probing table is full
//! - search: `Found` or `NotFound`
//! - delete: `StructuralDelete`, followed by one delete/insert pair per entry
//!   moved back while closing the gap, or `NotFound`

use super::{Engine, RunContext, StepSequence};
use crate::step::{Item, Site, Step};
use crate::structures::hash_table::{Entry, HashTable, Lookup};
use crate::structures::CollisionStrategy;
use std::collections::VecDeque;

/// A stepped hash operation plus its probe count
#[derive(Debug)]
pub struct HashRun {
    pub steps: StepSequence,
    pub probes: usize,
}

/// One probe per advance, then the outcome in a single batch
struct Probing {
    name: &'static str,
    probes: VecDeque<Step>,
    outcome: Vec<Step>,
}

impl Engine for Probing {
    fn name(&self) -> &'static str {
        self.name
    }

    fn advance(&mut self, out: &mut VecDeque<Step>) -> bool {
        if let Some(probe) = self.probes.pop_front() {
            out.push_back(probe);
            return true;
        }
        out.extend(self.outcome.drain(..));
        false
    }
}

/// Probe steps for the first `passed + 1` slots of `key`'s sequence
fn probe_steps(table: &HashTable, key: i64, passed: usize) -> VecDeque<Step> {
    table
        .probe_sequence(key)
        .take(passed + 1)
        .map(|index| Step::Probe { index, key })
        .collect()
}

fn slot(index: usize, position: usize) -> Site {
    Site::Slot { index, position }
}

fn hash_run(
    name: &'static str,
    probes: VecDeque<Step>,
    outcome: Vec<Step>,
    passed: usize,
    context: RunContext,
) -> HashRun {
    HashRun {
        steps: StepSequence::new(
            Probing {
                name,
                probes,
                outcome,
            },
            context,
        ),
        probes: passed,
    }
}

pub fn insert(table: &HashTable, entry: Entry, context: RunContext) -> HashRun {
    let key = entry.key;
    let mut shadow = table.clone();
    match shadow.insert(entry.clone()) {
        Ok(placement) => hash_run(
            "hash insert",
            probe_steps(table, key, placement.probes),
            vec![Step::StructuralInsert {
                site: slot(placement.index, placement.position),
                item: Item::Entry(entry),
            }],
            placement.probes,
            context,
        ),
        // Every slot was visited and none could take the entry
        Err(_) => hash_run(
            "hash insert",
            probe_steps(table, key, table.size()),
            vec![Step::NotFound],
            table.size(),
            context,
        ),
    }
}

pub fn search(table: &HashTable, key: i64, context: RunContext) -> HashRun {
    match table.search(key) {
        Lookup::Found { index, probes, .. } => hash_run(
            "hash search",
            probe_steps(table, key, probes),
            vec![Step::Found { index }],
            probes,
            context,
        ),
        Lookup::NotFound { probes } => hash_run(
            "hash search",
            probe_steps(table, key, probes),
            vec![Step::NotFound],
            probes,
            context,
        ),
    }
}

pub fn delete(table: &HashTable, key: i64, context: RunContext) -> HashRun {
    let mut shadow = table.clone();
    let Some(removal) = shadow.delete(key) else {
        let probes = match table.search(key) {
            Lookup::NotFound { probes } | Lookup::Found { probes, .. } => probes,
        };
        return hash_run(
            "hash delete",
            probe_steps(table, key, probes),
            vec![Step::NotFound],
            probes,
            context,
        );
    };

    let mut outcome = vec![Step::StructuralDelete {
        site: slot(removal.index, removal.position),
        item: Item::Entry(removal.entry),
    }];
    if table.strategy() == CollisionStrategy::LinearProbing {
        for shift in removal.shifts {
            outcome.push(Step::StructuralDelete {
                site: slot(shift.from, 0),
                item: Item::Entry(shift.entry.clone()),
            });
            outcome.push(Step::StructuralInsert {
                site: slot(shift.to, 0),
                item: Item::Entry(shift.entry),
            });
        }
    }
    hash_run(
        "hash delete",
        probe_steps(table, key, removal.probes),
        outcome,
        removal.probes,
        context,
    )
}

// Integration tests for the tree, heap, stack/queue and hash table engines

use algoviz::engine::{hashing, heap, linear, tree, EngineError, RunContext};
use algoviz::step::{Apply, Step};
use algoviz::structures::bst::TraversalOrder;
use algoviz::structures::hash_table::Lookup;
use algoviz::structures::{
    BinaryHeap, Bst, CollisionStrategy, Entry, HashFunction, HashTable, HeapKind, NodeId, Queue,
    Stack,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn replay<S: Apply>(target: &mut S, steps: impl Iterator<Item = Step>) -> Vec<Step> {
    let steps: Vec<Step> = steps.collect();
    for step in &steps {
        target.apply(step);
    }
    steps
}

#[test]
fn test_bst_inorder_stays_ascending() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut stepped = Bst::new();
    let mut direct = Bst::new();
    for _ in 0..300 {
        let value = rng.random_range(0..40);
        if rng.random_bool(0.6) {
            let snapshot = stepped.clone();
            let steps = tree::insert(&snapshot, value, RunContext::new());
            replay(&mut stepped, steps);
            direct.insert(value);
        } else {
            let snapshot = stepped.clone();
            let steps = tree::delete(&snapshot, value, RunContext::new());
            replay(&mut stepped, steps);
            direct.delete(value);
        }
        let inorder = stepped.values(TraversalOrder::Inorder);
        assert!(
            inorder.windows(2).all(|w| w[0] < w[1]),
            "not strictly ascending: {:?}",
            inorder
        );
        assert_eq!(inorder, direct.values(TraversalOrder::Inorder));
    }
}

#[test]
fn test_bst_preorder_scenario() {
    let tree_values = Bst::from_values(&[5, 3, 8, 1, 4]);
    let visited: Vec<i64> = tree::traverse(&tree_values, TraversalOrder::Preorder, RunContext::new())
        .filter_map(|step| match step {
            Step::MarkCurrent { index } => tree_values.value(NodeId::from_index(index)),
            _ => None,
        })
        .collect();
    assert_eq!(visited, vec![5, 3, 1, 4, 8]);
}

#[test]
fn test_heap_order_holds_after_random_operations() {
    let mut rng = StdRng::seed_from_u64(99);
    for kind in [HeapKind::Max, HeapKind::Min] {
        let mut stepped = BinaryHeap::new(kind);
        let mut direct = BinaryHeap::new(kind);
        for _ in 0..200 {
            if stepped.is_empty() || rng.random_bool(0.65) {
                let value = rng.random_range(-50..50);
                let snapshot = stepped.clone();
                let steps = heap::insert(&snapshot, value, RunContext::new());
                replay(&mut stepped, steps);
                direct.insert(value);
            } else {
                let sequence = heap::delete_root(&stepped.clone(), RunContext::new())
                    .expect("heap is not empty");
                replay(&mut stepped, sequence);
                direct.delete_root().expect("heap is not empty");
            }
            assert!(stepped.is_valid(), "{:?} heap broken: {:?}", kind, stepped.values());
            assert_eq!(stepped.values(), direct.values());
        }
    }
}

#[test]
fn test_max_heap_scenario() {
    let mut h = BinaryHeap::new(HeapKind::Max);
    for value in [3, 1, 4, 1, 5] {
        let snapshot = h.clone();
        let steps = heap::insert(&snapshot, value, RunContext::new());
        replay(&mut h, steps);
    }
    assert_eq!(h.peek(), Some(5));
    assert!(h.is_valid());
    assert_eq!(h.len(), 5);
}

#[test]
fn test_empty_removals_are_errors() {
    assert!(matches!(
        heap::delete_root(&BinaryHeap::new(HeapKind::Min), RunContext::new()),
        Err(EngineError::EmptyStructure { .. })
    ));
    assert!(linear::pop(&Stack::new(), RunContext::new()).is_err());
    assert!(linear::dequeue(&Queue::new(), RunContext::new()).is_err());
}

#[test]
fn test_stack_and_queue_order() {
    let mut stack = Stack::new();
    let mut queue = Queue::new();
    for item in ["A", "7", "Q"] {
        let snapshot = stack.clone();
        let steps = linear::push(&snapshot, item.to_string(), RunContext::new());
        replay(&mut stack, steps);
        let snapshot = queue.clone();
        let steps = linear::enqueue(&snapshot, item.to_string(), RunContext::new());
        replay(&mut queue, steps);
    }
    let popped = linear::pop(&stack, RunContext::new()).expect("stack has items");
    replay(&mut stack, popped);
    let dequeued = linear::dequeue(&queue, RunContext::new()).expect("queue has items");
    replay(&mut queue, dequeued);
    assert_eq!(stack.top(), Some("7"));
    assert_eq!(queue.front(), Some("7"));
    assert_eq!(queue.rear(), Some("Q"));
}

fn probing_table(size: usize) -> HashTable {
    HashTable::new(size, HashFunction::Division, CollisionStrategy::LinearProbing)
        .expect("size in range")
}

#[test]
fn test_hash_collision_scenario() {
    let mut table = probing_table(7);
    let mut probes = Vec::new();
    for key in [7, 14, 21] {
        let run = hashing::insert(&table, Entry::new(key, format!("v{}", key)), RunContext::new());
        probes.push(run.probes);
        replay(&mut table, run.steps);
    }
    assert_eq!(probes, vec![0, 1, 2]);
    for (slot, key) in [(0, 7), (1, 14), (2, 21)] {
        assert_eq!(table.bucket(slot)[0].key, key);
    }
}

#[test]
fn test_hash_insert_search_delete_roundtrip() {
    let mut rng = StdRng::seed_from_u64(2024);
    for function in [HashFunction::Division, HashFunction::Multiplication] {
        let size = 11;
        let mut table = HashTable::new(size, function, CollisionStrategy::LinearProbing)
            .expect("size in range");
        let mut keys = Vec::new();
        while keys.len() < size {
            let key = rng.random_range(-100..100);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        for &key in &keys {
            let run = hashing::insert(&table, Entry::new(key, key.to_string()), RunContext::new());
            replay(&mut table, run.steps);
        }
        for &key in &keys {
            assert_eq!(table.get(key), Some(key.to_string().as_str()), "{:?}", function);
            let run = hashing::search(&table, key, RunContext::new());
            assert!(run.probes < size);
        }

        let victim = keys[3];
        let run = hashing::delete(&table, victim, RunContext::new());
        replay(&mut table, run.steps);
        assert!(matches!(table.search(victim), Lookup::NotFound { .. }));
        for &key in keys.iter().filter(|&&k| k != victim) {
            assert_eq!(table.get(key), Some(key.to_string().as_str()));
        }
    }
}

#[test]
fn test_full_table_insert_fails_without_mutation() {
    let mut table = probing_table(3);
    for key in [1, 2, 3] {
        table.insert(Entry::new(key, "x")).expect("room left");
    }
    let before = table.clone();
    let run = hashing::insert(&table, Entry::new(10, "y"), RunContext::new());
    let steps = replay(&mut table, run.steps);
    assert_eq!(steps.last(), Some(&Step::NotFound));
    assert_eq!(
        steps.iter().filter(|s| matches!(s, Step::Probe { .. })).count(),
        3
    );
    assert_eq!(table, before);
    assert_eq!(
        table.insert(Entry::new(10, "y")),
        Err(EngineError::StructureFull { size: 3 })
    );
}

//! Stack and queue of text items
//!
//! Items are short user-entered tokens (letters or numbers), so both
//! structures store `String`s. Removing from an empty structure is reported
//! as [`EngineError::EmptyStructure`] and leaves it untouched.

use crate::engine::constants::{LINEAR_FILL_COUNT, LINEAR_NUMBER_RANGE};
use crate::engine::errors::EngineError;
use crate::step::{Apply, Item, Site, Step};
use rand::Rng;
use std::collections::VecDeque;

/// Validate a user-entered item
pub fn parse_item(input: &str) -> Result<String, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input(input, "expected a value"));
    }
    Ok(trimmed.to_string())
}

/// Random mix of letters and numbers
fn random_items<R: Rng>(rng: &mut R) -> Vec<String> {
    let count = rng.random_range(LINEAR_FILL_COUNT);
    (0..count)
        .map(|_| {
            if rng.random_bool(0.5) {
                char::from(b'A' + rng.random_range(0..26u8)).to_string()
            } else {
                rng.random_range(LINEAR_NUMBER_RANGE).to_string()
            }
        })
        .collect()
}

/// LIFO sequence; the top is the last element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<String>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Stack {
            items: random_items(rng),
        }
    }

    pub fn push(&mut self, item: String) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<String, EngineError> {
        self.items.pop().ok_or(EngineError::EmptyStructure {
            structure: "stack",
            operation: "pop",
        })
    }

    pub fn top(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    /// Items bottom to top
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// FIFO sequence; the front is the first element, the rear the last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Queue {
            items: random_items(rng).into(),
        }
    }

    pub fn enqueue(&mut self, item: String) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Result<String, EngineError> {
        self.items.pop_front().ok_or(EngineError::EmptyStructure {
            structure: "queue",
            operation: "dequeue",
        })
    }

    pub fn front(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    pub fn rear(&self) -> Option<&str> {
        self.items.back().map(String::as_str)
    }

    /// Items front to rear
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Apply for Stack {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::StructuralInsert {
                site: Site::Index(_),
                item: Item::Text(text),
            } => self.items.push(text.clone()),
            Step::StructuralDelete {
                site: Site::Index(_),
                ..
            } => {
                self.items.pop();
            }
            _ => {}
        }
    }
}

impl Apply for Queue {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::StructuralInsert {
                site: Site::Index(_),
                item: Item::Text(text),
            } => self.items.push_back(text.clone()),
            Step::StructuralDelete {
                site: Site::Index(_),
                ..
            } => {
                self.items.pop_front();
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
    fn test_stack_is_lifo() {
        let mut stack = Stack::new();
        stack.push("A".into());
        stack.push("7".into());
        assert_eq!(stack.top(), Some("7"));
        assert_eq!(stack.pop(), Ok("7".to_string()));
        assert_eq!(stack.pop(), Ok("A".to_string()));
        assert!(matches!(
            stack.pop(),
            Err(EngineError::EmptyStructure { operation: "pop", .. })
        ));
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = Queue::new();
        queue.enqueue("A".into());
        queue.enqueue("B".into());
        assert_eq!(queue.front(), Some("A"));
        assert_eq!(queue.rear(), Some("B"));
        assert_eq!(queue.dequeue(), Ok("A".to_string()));
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.dequeue().is_err());
    }

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("  x "), Ok("x".to_string()));
        assert!(parse_item("   ").is_err());
    }

    #[test]
    fn test_random_fill_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let stack = Stack::random(&mut rng);
        assert!(LINEAR_FILL_COUNT.contains(&stack.len()));
        assert!(stack.items().iter().all(|s| !s.is_empty()));
    }
}

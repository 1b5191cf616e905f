// Stack and queue operations as short step runs

use super::{EngineError, RunContext, StepSequence};
use crate::step::{Item, Site, Step};
use crate::structures::{Queue, Stack};

pub fn push(stack: &Stack, item: String, context: RunContext) -> StepSequence {
    let index = stack.len();
    StepSequence::scripted(
        "stack push",
        vec![
            Step::StructuralInsert {
                site: Site::Index(index),
                item: Item::Text(item),
            },
            Step::MarkCurrent { index },
        ],
        context,
    )
}

pub fn pop(stack: &Stack, context: RunContext) -> Result<StepSequence, EngineError> {
    let top = stack.top().ok_or(EngineError::EmptyStructure {
        structure: "stack",
        operation: "pop",
    })?;
    let index = stack.len() - 1;
    Ok(StepSequence::scripted(
        "stack pop",
        vec![
            Step::MarkCurrent { index },
            Step::StructuralDelete {
                site: Site::Index(index),
                item: Item::Text(top.to_string()),
            },
        ],
        context,
    ))
}

pub fn enqueue(queue: &Queue, item: String, context: RunContext) -> StepSequence {
    let index = queue.len();
    StepSequence::scripted(
        "queue enqueue",
        vec![
            Step::StructuralInsert {
                site: Site::Index(index),
                item: Item::Text(item),
            },
            Step::MarkCurrent { index },
        ],
        context,
    )
}

pub fn dequeue(queue: &Queue, context: RunContext) -> Result<StepSequence, EngineError> {
    let front = queue.front().ok_or(EngineError::EmptyStructure {
        structure: "queue",
        operation: "dequeue",
    })?;
    Ok(StepSequence::scripted(
        "queue dequeue",
        vec![
            Step::MarkCurrent { index: 0 },
            Step::StructuralDelete {
                site: Site::Index(0),
                item: Item::Text(front.to_string()),
            },
        ],
        context,
    ))
}

//! Working types shared by the prioritization passes.

use crate::models::Task;

/// A task decorated with its running score as it moves through the passes.
///
/// Lives only for the duration of one call; the decoration never reaches
/// `orderedTasks`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredTask {
    /// Position in the caller's input list.
    pub index: usize,
    /// Sanitized copy of the caller's task.
    pub task: Task,
    pub base_score: f64,
    pub dependency_adjustment: f64,
    pub resource_penalized: bool,
    /// Current score; final once the context pass has run.
    pub score: f64,
}

impl ScoredTask {
    pub fn new(index: usize, task: Task, base_score: f64) -> Self {
        Self {
            index,
            task,
            base_score,
            dependency_adjustment: 0.0,
            resource_penalized: false,
            score: base_score,
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

//! Greedy resource allocation.
//!
//! Walks the batch once, drawing each task's requirement from a shared
//! budget. A task that does not fit is penalized but never dropped, and the
//! budget is left untouched for later tasks.

use crate::config::{AllocationOrder, PrioritizationConfig};
use crate::sorting::rank_order;
use crate::{log_changes, log_debug};

use super::types::ScoredTask;

/// Apply the over-commitment penalty.
///
/// With `AllocationOrder::Input` the budget is consumed in the caller's
/// original order regardless of score, so the outcome depends on input
/// order. `AllocationOrder::Score` consumes it highest score first.
pub fn allocate_resources(
    mut scored: Vec<ScoredTask>,
    available_resources: f64,
    order: AllocationOrder,
    config: &PrioritizationConfig,
) -> Vec<ScoredTask> {
    let visit: Vec<usize> = match order {
        AllocationOrder::Input => (0..scored.len()).collect(),
        AllocationOrder::Score => {
            let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
            rank_order(&scores)
        }
    };

    let mut remaining = available_resources;
    for position in visit {
        let entry = &mut scored[position];
        let requirement = entry.task.resource_requirement;
        if requirement > remaining {
            entry.score *= config.overcommit_penalty;
            entry.resource_penalized = true;
            log_changes!(
                config.verbosity,
                "Task {} needs {} but only {} remains; score penalized to {:.2}",
                entry.task.id,
                requirement,
                remaining,
                entry.score
            );
        } else {
            remaining -= requirement;
            log_debug!(
                config.verbosity,
                "Task {} allocated {}, {} remaining",
                entry.task.id,
                requirement,
                remaining
            );
        }
    }
    scored
}

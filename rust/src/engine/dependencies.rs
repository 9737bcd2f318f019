//! Dependency-aware re-weighting.
//!
//! Tasks that unblock others are boosted, tasks waiting on in-batch
//! prerequisites are suppressed. This is not a topological schedule and does
//! not detect cycles.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::PrioritizationConfig;
use crate::log_checks;

use super::types::ScoredTask;

/// Map from task id to the number of batch tasks that list it as a dependency.
pub fn count_dependents(scored: &[ScoredTask]) -> FxHashMap<&str, usize> {
    let mut dependents: FxHashMap<&str, usize> = FxHashMap::default();
    for entry in scored {
        for dep in &entry.task.dependencies {
            *dependents.entry(dep.as_str()).or_insert(0) += 1;
        }
    }
    dependents
}

/// Apply the unblock bonus and the unmet-prerequisite penalty.
///
/// A dependency id that is not part of the batch is ignored entirely. An
/// in-batch dependency is unmet unless its id appears in `completed_task_ids`;
/// with no completion data every in-batch dependency is unmet.
pub fn adjust_for_dependencies(
    mut scored: Vec<ScoredTask>,
    completed_task_ids: &FxHashSet<String>,
    config: &PrioritizationConfig,
) -> Vec<ScoredTask> {
    let adjustments: Vec<f64> = {
        let batch_ids: FxHashSet<&str> = scored.iter().map(|s| s.task.id.as_str()).collect();
        let dependents = count_dependents(&scored);

        scored
            .iter()
            .map(|entry| {
                let unblocks = dependents.get(entry.task.id.as_str()).copied().unwrap_or(0);
                let unmet = entry
                    .task
                    .dependencies
                    .iter()
                    .filter(|dep| {
                        batch_ids.contains(dep.as_str()) && !completed_task_ids.contains(*dep)
                    })
                    .count();

                let adjustment = unblocks as f64 * config.unblock_bonus
                    - unmet as f64 * config.unmet_dependency_penalty;
                if adjustment != 0.0 {
                    log_checks!(
                        config.verbosity,
                        "Task {}: unblocks {}, waits on {} unmet -> {:+}",
                        entry.task.id,
                        unblocks,
                        unmet,
                        adjustment
                    );
                }
                adjustment
            })
            .collect()
    };

    for (entry, adjustment) in scored.iter_mut().zip(adjustments) {
        entry.dependency_adjustment = adjustment;
        entry.score += adjustment;
    }
    scored
}

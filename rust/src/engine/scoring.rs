//! Base scoring: intrinsic priority of each task, independent of the others.

use chrono::{DateTime, Utc};

use crate::config::PrioritizationConfig;
use crate::log_debug;
use crate::models::{Constraints, MarketConditions, Task};

use super::types::{round_half_up, ScoredTask};

/// Score one task.
///
/// Formula:
/// `round((urgency*w_u + profit*w_p + risk + (100-resource)*w_e + deadline)
///        * impact * market)`
/// where `w_p` depends on whether revenue is being prioritized.
pub fn score_task(
    task: &Task,
    constraints: &Constraints,
    market: MarketConditions,
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> f64 {
    let mut score = task.urgency_score * config.urgency_weight;
    score += task.profitability_score * config.profit_weight(constraints.prioritize_revenue);
    score += config.risk_bonus(task.risk_level);
    score += (100.0 - task.resource_requirement) * config.efficiency_weight;
    score += config.deadline_bonus(task.hours_until_deadline(now));

    score *= config.impact_multiplier(task.metadata.business_impact);
    score *= config.market_multiplier(market);

    let rounded = round_half_up(score);
    log_debug!(
        config.verbosity,
        "Base score for {}: {:.3} -> {}",
        task.id,
        score,
        rounded
    );
    rounded
}

/// Run the scorer over the batch, preserving input order.
pub fn score_tasks(
    tasks: Vec<Task>,
    constraints: &Constraints,
    market: MarketConditions,
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> Vec<ScoredTask> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            let base = score_task(&task, constraints, market, now, config);
            ScoredTask::new(index, task, base)
        })
        .collect()
}

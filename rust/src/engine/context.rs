//! Business-context adjustment: time of day, start of week, season.

use crate::config::PrioritizationConfig;
use crate::log_checks;
use crate::models::{Department, Task, TaskType};

use super::types::{round_half_up, ScoredTask};

/// Resolved context values for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextSnapshot {
    pub hour: u32,
    /// 0 = Sunday.
    pub day_of_week: u32,
    pub seasonal_factor: f64,
}

/// Multiply a score by every context factor that applies to the task.
///
/// Business hours favour customer-facing and load work; after hours favour
/// route and maintenance work. The week-start boost and the seasonal factor
/// stack on top.
pub fn apply_context_factors(
    score: f64,
    task: &Task,
    context: &ContextSnapshot,
    config: &PrioritizationConfig,
) -> f64 {
    let mut score = score;

    if config.is_business_hour(context.hour) {
        if matches!(
            task.task_type,
            TaskType::CustomerCommunication | TaskType::LoadAssignment
        ) {
            score *= config.business_hours_boost;
        }
    } else if matches!(
        task.task_type,
        TaskType::RouteOptimization | TaskType::MaintenanceAlert
    ) {
        score *= config.after_hours_boost;
    }

    if context.day_of_week == config.week_start_day
        && (task.task_type == TaskType::RouteOptimization
            || task.metadata.department == Some(Department::Dispatch))
    {
        score *= config.week_start_boost;
    }

    score * context.seasonal_factor
}

/// Run the context pass and round the resulting scores.
pub fn adjust_for_context(
    mut scored: Vec<ScoredTask>,
    context: &ContextSnapshot,
    config: &PrioritizationConfig,
) -> Vec<ScoredTask> {
    for entry in scored.iter_mut() {
        let adjusted = round_half_up(apply_context_factors(
            entry.score,
            &entry.task,
            context,
            config,
        ));
        log_checks!(
            config.verbosity,
            "Task {}: context {:.2} -> {}",
            entry.task.id,
            entry.score,
            adjusted
        );
        entry.score = adjusted;
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::make_task;
    use crate::models::RiskLevel;

    fn task(task_type: TaskType, department: Department) -> Task {
        let mut task = make_task("t", 50.0, 50.0, 50.0, RiskLevel::Medium);
        task.task_type = task_type;
        task.metadata.department = Some(department);
        task
    }

    fn snapshot(hour: u32, day_of_week: u32, seasonal_factor: f64) -> ContextSnapshot {
        ContextSnapshot {
            hour,
            day_of_week,
            seasonal_factor,
        }
    }

    fn factor(task: &Task, context: ContextSnapshot) -> f64 {
        apply_context_factors(100.0, task, &context, &PrioritizationConfig::default())
    }

    #[test]
    fn test_business_hours_boost() {
        let load = task(TaskType::LoadAssignment, Department::Operations);
        assert!((factor(&load, snapshot(10, 3, 1.0)) - 120.0).abs() < 1e-9);
        assert!((factor(&load, snapshot(17, 3, 1.0)) - 120.0).abs() < 1e-9);
        assert!((factor(&load, snapshot(18, 3, 1.0)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_after_hours_boost() {
        let maintenance = task(TaskType::MaintenanceAlert, Department::Operations);
        assert!((factor(&maintenance, snapshot(22, 3, 1.0)) - 115.0).abs() < 1e-9);
        assert!((factor(&maintenance, snapshot(12, 3, 1.0)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_week_start_boost_for_route_and_dispatch() {
        let route = task(TaskType::RouteOptimization, Department::Operations);
        // Business hours, Monday: route gets only the week-start boost
        assert!((factor(&route, snapshot(10, 1, 1.0)) - 110.0).abs() < 1e-9);
        // After hours, Monday: both boosts stack
        assert!((factor(&route, snapshot(20, 1, 1.0)) - 126.5).abs() < 1e-9);

        let dispatch_billing = task(TaskType::Billing, Department::Dispatch);
        assert!((factor(&dispatch_billing, snapshot(10, 1, 1.0)) - 110.0).abs() < 1e-9);
        assert!((factor(&dispatch_billing, snapshot(10, 2, 1.0)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_seasonal_factor_always_applies() {
        let billing = task(TaskType::Billing, Department::Finance);
        assert!((factor(&billing, snapshot(10, 3, 1.5)) - 150.0).abs() < 1e-9);
        assert!((factor(&billing, snapshot(3, 0, 0.5)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_rounds_scores() {
        let scored = vec![ScoredTask::new(
            0,
            task(TaskType::CustomerCommunication, Department::Operations),
            44.0,
        )];
        let result = adjust_for_context(
            scored,
            &snapshot(10, 2, 1.0),
            &PrioritizationConfig::default(),
        );
        // 44 * 1.2 = 52.8
        assert_eq!(result[0].score, 53.0);
    }
}

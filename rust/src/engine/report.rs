//! Metrics, reasoning, recommendations and risk factors for a ranked batch.

use chrono::{DateTime, Utc};

use crate::config::PrioritizationConfig;
use crate::models::{
    BusinessContext, Constraints, Department, MarketConditions, OptimizationMetrics, RiskLevel,
    Task,
};

use super::types::ScoredTask;

/// Aggregate statistics. All zero for an empty batch.
pub fn compute_metrics(tasks: &[Task]) -> OptimizationMetrics {
    if tasks.is_empty() {
        return OptimizationMetrics::default();
    }
    let count = tasks.len() as f64;

    let total_revenue = tasks.iter().filter_map(|t| t.associated_revenue).sum();
    let average_urgency = tasks.iter().map(|t| t.urgency_score).sum::<f64>() / count;
    let resource_utilization = tasks.iter().map(|t| t.resource_requirement).sum::<f64>() / count;
    let mean_risk = tasks
        .iter()
        .map(|t| f64::from(t.risk_level.code()))
        .sum::<f64>()
        / count;
    let total_minutes: f64 = tasks.iter().map(|t| t.estimated_duration).sum();

    OptimizationMetrics {
        total_revenue,
        average_urgency,
        resource_utilization,
        risk_mitigation: mean_risk * 25.0,
        time_to_completion: total_minutes / 60.0,
    }
}

fn count_critical(tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.risk_level == RiskLevel::Critical)
        .count()
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Distinct departments of the given tasks, in first-seen order. Tasks
/// without a department contribute nothing.
fn departments_of<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Department> {
    let mut departments: Vec<Department> = Vec::new();
    for department in tasks.filter_map(|t| t.metadata.department) {
        if !departments.contains(&department) {
            departments.push(department);
        }
    }
    departments
}

fn join_departments(departments: &[Department]) -> String {
    departments
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sentences explaining the main drivers of the ranking.
pub fn build_reasoning(
    ranked: &[ScoredTask],
    tasks: &[Task],
    constraints: &Constraints,
    market: MarketConditions,
    config: &PrioritizationConfig,
) -> Vec<String> {
    let mut reasoning = Vec::new();

    if let Some(top) = ranked.first() {
        reasoning.push(format!(
            "Top priority is \"{}\" ({} risk, urgency {}) with a final score of {}.",
            top.task.display_name(),
            top.task.risk_level,
            top.task.urgency_score,
            top.score
        ));
    }

    let critical = count_critical(tasks);
    if critical > 0 {
        reasoning.push(format!(
            "{} with critical operational risk received the maximum risk bonus.",
            plural(critical, "task", "tasks")
        ));
    }

    let high_revenue = tasks
        .iter()
        .filter(|t| t.associated_revenue.unwrap_or(0.0) > config.high_revenue_threshold)
        .count();
    if high_revenue > 0 {
        reasoning.push(format!(
            "High-revenue work: {} above ${:.0} in associated revenue.",
            plural(high_revenue, "task", "tasks"),
            config.high_revenue_threshold
        ));
    }

    if constraints.prioritize_revenue {
        reasoning.push(format!(
            "Revenue prioritization is on: profitability weighted at {:.0}% alongside urgency at {:.0}%.",
            config.revenue_weight * 100.0,
            config.urgency_weight * 100.0
        ));
    } else {
        reasoning.push(format!(
            "Urgency-led ranking: profitability weighted at {:.0}% against urgency at {:.0}%.",
            config.baseline_profit_weight * 100.0,
            config.urgency_weight * 100.0
        ));
    }

    reasoning.push(format!(
        "Market conditions are {}, scaling every score by {}.",
        market,
        config.market_multiplier(market)
    ));

    reasoning
}

/// Advisory suggestions derived from aggregate patterns in the batch.
pub fn build_recommendations(
    ranked: &[ScoredTask],
    tasks: &[Task],
    constraints: &Constraints,
    context: &BusinessContext,
    config: &PrioritizationConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let high_complexity = tasks
        .iter()
        .filter(|t| t.resource_requirement > config.high_complexity_requirement)
        .count();
    if high_complexity > config.high_complexity_count {
        recommendations.push(format!(
            "{} tasks need more than {:.0}% of capacity; split or delegate high-complexity work.",
            high_complexity, config.high_complexity_requirement
        ));
    }

    let blocked = tasks.iter().filter(|t| !t.dependencies.is_empty()).count();
    if blocked > config.blocked_task_count {
        recommendations.push(format!(
            "{} tasks are waiting on prerequisites; clear blocking work first to unlock throughput.",
            blocked
        ));
    }

    let critical: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.risk_level == RiskLevel::Critical)
        .collect();
    if !critical.is_empty() {
        let subject = plural(critical.len(), "critical-risk task", "critical-risk tasks");
        let departments = departments_of(critical.iter().copied());
        if departments.is_empty() {
            recommendations.push(format!("Address {} immediately.", subject));
        } else {
            recommendations.push(format!(
                "Address {} immediately ({}).",
                subject,
                join_departments(&departments)
            ));
        }
    }

    if context.market_conditions == MarketConditions::Peak {
        recommendations.push(
            "Peak market conditions: keep load assignments and customer communications moving ahead of back-office work."
                .to_string(),
        );
    }

    let total_minutes: f64 = tasks.iter().map(|t| t.estimated_duration).sum();
    if total_minutes > config.shift_minutes {
        recommendations.push(format!(
            "Estimated workload of {:.1} hours exceeds one {}-hour shift; spread it across shifts at no more than {} tasks per hour.",
            total_minutes / 60.0,
            config.shift_minutes / 60.0,
            constraints.max_tasks_per_hour
        ));
    }

    if let Some(top) = ranked.first() {
        let focus = &constraints.department_focus;
        let in_focus = top
            .task
            .metadata
            .department
            .is_some_and(|department| focus.contains(&department));
        if !focus.is_empty() && !in_focus {
            let owner = match top.task.metadata.department {
                Some(department) => format!("belongs to {}", department),
                None => "has no department".to_string(),
            };
            recommendations.push(format!(
                "Top-ranked task \"{}\" {}, outside the requested focus ({}).",
                top.task.display_name(),
                owner,
                join_departments(focus)
            ));
        }
    }

    recommendations
}

/// Conditions worth flagging to an operator.
pub fn identify_risk_factors(
    tasks: &[Task],
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> Vec<String> {
    let mut risk_factors = Vec::new();

    let critical = count_critical(tasks);
    if critical > 0 {
        risk_factors.push(format!(
            "{} at critical risk level",
            plural(critical, "task", "tasks")
        ));
    }

    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();
    if overdue > 0 {
        risk_factors.push(format!(
            "{} past deadline",
            plural(overdue, "task", "tasks")
        ));
    }

    let heavy = tasks
        .iter()
        .filter(|t| t.resource_requirement > config.bottleneck_requirement)
        .count();
    if heavy > config.bottleneck_count {
        risk_factors.push(format!(
            "Resource bottleneck risk: {} tasks need more than {:.0}% of capacity",
            heavy, config.bottleneck_requirement
        ));
    }

    risk_factors
}

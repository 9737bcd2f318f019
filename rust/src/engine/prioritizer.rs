//! The prioritization pipeline: validate, score, adjust, allocate, contextualize, rank, report.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::{AllocationOrder, PrioritizationConfig};
use crate::log_changes;
use crate::models::{PrioritizationRequest, PrioritizedResult, ScoreBreakdown, Task};
use crate::sorting::rank_order;
use crate::validation::{validate_request, ValidationError};

use super::allocation::allocate_resources;
use super::context::{adjust_for_context, ContextSnapshot};
use super::dependencies::adjust_for_dependencies;
use super::report::{build_reasoning, build_recommendations, compute_metrics, identify_risk_factors};
use super::scoring::score_tasks;
use super::types::ScoredTask;

/// Errors that can occur during prioritization.
#[derive(Error, Debug)]
pub enum PrioritizationError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error("Unknown allocation order: {0}")]
    UnknownAllocationOrder(String),
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result for a batch with no tasks.
fn empty_result(now: DateTime<Utc>) -> PrioritizedResult {
    PrioritizedResult {
        ordered_tasks: Vec::new(),
        optimization_metrics: Default::default(),
        reasoning: vec!["No tasks were supplied, so there is nothing to prioritize.".to_string()],
        recommendations: Vec::new(),
        risk_factors: Vec::new(),
        prioritization_score: 0.0,
        confidence: 0.0,
        score_breakdown: Vec::new(),
        last_updated: now,
    }
}

/// Run the four scoring passes and return tasks in rank order.
fn rank(
    tasks: Vec<Task>,
    request: &PrioritizationRequest,
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
    allocation_order: AllocationOrder,
) -> Vec<ScoredTask> {
    let context = &request.business_context;
    let completed: FxHashSet<String> = request.completed_task_ids.iter().cloned().collect();
    let snapshot = ContextSnapshot {
        hour: context.hour(now),
        day_of_week: context.weekday(now),
        seasonal_factor: context.seasonal_factor,
    };

    let scored = score_tasks(
        tasks,
        &request.constraints,
        context.market_conditions,
        now,
        config,
    );
    let scored = adjust_for_dependencies(scored, &completed, config);
    let scored = allocate_resources(
        scored,
        request.constraints.available_resources,
        allocation_order,
        config,
    );
    let scored = adjust_for_context(scored, &snapshot, config);

    let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
    let order = rank_order(&scores);
    let mut slots: Vec<Option<ScoredTask>> = scored.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect()
}

/// Prioritize a batch of tasks with the default configuration.
///
/// `now` is the reference instant for deadline proximity and for any context
/// field the request leaves unset.
pub fn prioritize(
    request: &PrioritizationRequest,
    now: DateTime<Utc>,
) -> Result<PrioritizedResult, PrioritizationError> {
    prioritize_with_config(request, now, &PrioritizationConfig::default())
}

/// Prioritize a batch of tasks.
///
/// # Returns
/// * `Ok(PrioritizedResult)` with tasks sorted by final score, highest first
/// * `Err(PrioritizationError)` if the request or configuration is invalid
///
/// An empty task list is not an error; it yields an empty, zero-valued result.
pub fn prioritize_with_config(
    request: &PrioritizationRequest,
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> Result<PrioritizedResult, PrioritizationError> {
    let allocation_order = AllocationOrder::parse(&config.allocation_order)
        .ok_or_else(|| PrioritizationError::UnknownAllocationOrder(config.allocation_order.clone()))?;
    let tasks = validate_request(request, config.verbosity)?;

    if tasks.is_empty() {
        log_changes!(config.verbosity, "Empty batch, nothing to prioritize");
        return Ok(empty_result(now));
    }

    let metrics = compute_metrics(&tasks);
    let risk_factors = identify_risk_factors(&tasks, now, config);
    let ranked = rank(tasks.clone(), request, now, config, allocation_order);

    let reasoning = build_reasoning(
        &ranked,
        &tasks,
        &request.constraints,
        request.business_context.market_conditions,
        config,
    );
    let recommendations = build_recommendations(
        &ranked,
        &tasks,
        &request.constraints,
        &request.business_context,
        config,
    );

    let score_breakdown: Vec<ScoreBreakdown> = ranked
        .iter()
        .enumerate()
        .map(|(position, entry)| ScoreBreakdown {
            task_id: entry.task.id.clone(),
            rank: position + 1,
            base_score: entry.base_score,
            dependency_adjustment: entry.dependency_adjustment,
            resource_penalized: entry.resource_penalized,
            final_score: entry.score,
        })
        .collect();
    let ordered_tasks: Vec<Task> = ranked
        .iter()
        .map(|entry| request.tasks[entry.index].clone())
        .collect();

    if let Some(top) = ranked.first() {
        log_changes!(
            config.verbosity,
            "Prioritized {} tasks; top is {} with score {}",
            ranked.len(),
            top.task.id,
            top.score
        );
    }

    Ok(PrioritizedResult {
        ordered_tasks,
        prioritization_score: metrics.resource_utilization,
        confidence: metrics.resource_utilization,
        optimization_metrics: metrics,
        reasoning,
        recommendations,
        risk_factors,
        score_breakdown,
        last_updated: now,
    })
}

/// Prioritize a JSON-encoded request and return the JSON-encoded result.
pub fn prioritize_json(
    request_json: &str,
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> Result<String, PrioritizationError> {
    let request: PrioritizationRequest = serde_json::from_str(request_json)?;
    let result = prioritize_with_config(&request, now, config)?;
    Ok(serde_json::to_string(&result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::make_task;
    use crate::models::{
        BusinessContext, BusinessImpact, MarketConditions, OptimizationMetrics, RiskLevel,
    };
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        // Tuesday
        Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap()
    }

    fn context(hour: u32, day: u32) -> BusinessContext {
        BusinessContext {
            current_hour: Some(hour),
            day_of_week: Some(day),
            seasonal_factor: 1.0,
            market_conditions: MarketConditions::Normal,
        }
    }

    fn request_with(tasks: Vec<Task>) -> PrioritizationRequest {
        PrioritizationRequest {
            tasks,
            business_context: context(10, 2),
            ..PrioritizationRequest::default()
        }
    }

    fn ids(result: &PrioritizedResult) -> Vec<&str> {
        result.ordered_tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn breakdown<'a>(result: &'a PrioritizedResult, id: &str) -> &'a ScoreBreakdown {
        result
            .score_breakdown
            .iter()
            .find(|b| b.task_id == id)
            .unwrap()
    }

    #[test]
    fn test_two_task_scenario() {
        let mut first = make_task("1", 95.0, 85.0, 30.0, RiskLevel::High);
        first.metadata.business_impact = BusinessImpact::High;
        let second = make_task("2", 40.0, 30.0, 50.0, RiskLevel::Medium);

        let result = prioritize(&request_with(vec![first, second]), now()).unwrap();

        assert_eq!(ids(&result), vec!["1", "2"]);
        assert_eq!(result.optimization_metrics.average_urgency, 67.5);
        assert_eq!(breakdown(&result, "1").final_score, 107.0);
        assert_eq!(breakdown(&result, "2").final_score, 44.0);
        assert_eq!(result.prioritization_score, 40.0);
        assert_eq!(result.confidence, 40.0);
        assert_eq!(result.last_updated, now());
    }

    #[test]
    fn test_overdue_task_scores_deadline_bonus() {
        let mut late = make_task("late", 50.0, 50.0, 50.0, RiskLevel::Low);
        late.metadata.business_impact = BusinessImpact::Low;
        late.deadline = Some(now() - Duration::hours(1));

        let result = prioritize(&request_with(vec![late]), now()).unwrap();

        // 20 + 15 + 5 + 5 + 15
        assert_eq!(breakdown(&result, "late").base_score, 60.0);
        assert_eq!(result.risk_factors, vec!["1 task past deadline".to_string()]);
    }

    #[test]
    fn test_empty_input_returns_empty_result() {
        let result = prioritize(&request_with(vec![]), now()).unwrap();
        assert!(result.ordered_tasks.is_empty());
        assert_eq!(result.optimization_metrics, OptimizationMetrics::default());
        assert_eq!(result.prioritization_score, 0.0);
        assert_eq!(result.reasoning.len(), 1);
        assert!(result.recommendations.is_empty());
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let mut tasks: Vec<Task> = (0..12)
            .map(|i| {
                make_task(
                    &format!("t{}", i),
                    (i * 7 % 100) as f64,
                    (i * 13 % 100) as f64,
                    (i * 17 % 100) as f64,
                    RiskLevel::Medium,
                )
            })
            .collect();
        tasks[3].dependencies = vec!["t1".to_string()];
        tasks[5].deadline = Some(now() + Duration::hours(5));
        let request = request_with(tasks);

        let a = prioritize(&request, now()).unwrap();
        let b = prioritize(&request, now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resource_order_sensitivity() {
        let a = make_task("A", 50.0, 50.0, 60.0, RiskLevel::Medium);
        let b = make_task("B", 50.0, 50.0, 60.0, RiskLevel::Medium);

        let mut request = request_with(vec![a.clone(), b.clone()]);
        request.constraints.available_resources = 60.0;
        let forward = prioritize(&request, now()).unwrap();
        assert!(!breakdown(&forward, "A").resource_penalized);
        assert!(breakdown(&forward, "B").resource_penalized);
        assert_eq!(ids(&forward), vec!["A", "B"]);

        request.tasks = vec![b, a];
        let reversed = prioritize(&request, now()).unwrap();
        assert!(breakdown(&reversed, "A").resource_penalized);
        assert!(!breakdown(&reversed, "B").resource_penalized);
        assert_eq!(ids(&reversed), vec!["B", "A"]);
    }

    #[test]
    fn test_score_allocation_order_opt_in() {
        let low = make_task("low", 10.0, 10.0, 60.0, RiskLevel::Low);
        let high = make_task("high", 90.0, 90.0, 60.0, RiskLevel::Critical);
        let mut request = request_with(vec![low, high]);
        request.constraints.available_resources = 60.0;
        let config = PrioritizationConfig {
            allocation_order: "score".to_string(),
            ..PrioritizationConfig::default()
        };

        let result = prioritize_with_config(&request, now(), &config).unwrap();
        assert!(breakdown(&result, "low").resource_penalized);
        assert!(!breakdown(&result, "high").resource_penalized);
    }

    #[test]
    fn test_unknown_allocation_order_rejected() {
        let config = PrioritizationConfig {
            allocation_order: "random".to_string(),
            ..PrioritizationConfig::default()
        };
        let result = prioritize_with_config(&request_with(vec![]), now(), &config);
        assert!(matches!(
            result,
            Err(PrioritizationError::UnknownAllocationOrder(_))
        ));
    }

    #[test]
    fn test_stable_order_for_equal_scores() {
        let tasks: Vec<Task> = ["c", "a", "b"]
            .iter()
            .map(|id| make_task(id, 50.0, 50.0, 10.0, RiskLevel::Medium))
            .collect();
        let result = prioritize(&request_with(tasks), now()).unwrap();
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dependency_boost_survives_pipeline() {
        let hub = make_task("hub", 50.0, 50.0, 10.0, RiskLevel::Medium);
        let twin = make_task("twin", 50.0, 50.0, 10.0, RiskLevel::Medium);
        let mut x = make_task("x", 50.0, 50.0, 10.0, RiskLevel::Medium);
        x.dependencies = vec!["hub".to_string()];
        let mut y = make_task("y", 50.0, 50.0, 10.0, RiskLevel::Medium);
        y.dependencies = vec!["hub".to_string(), "elsewhere".to_string()];

        let result = prioritize(&request_with(vec![twin, x, y, hub]), now()).unwrap();

        let hub_breakdown = breakdown(&result, "hub");
        let twin_breakdown = breakdown(&result, "twin");
        assert_eq!(hub_breakdown.dependency_adjustment, 10.0);
        assert!(hub_breakdown.final_score - twin_breakdown.final_score >= 10.0);
        // "elsewhere" is not in the batch and costs nothing
        assert_eq!(breakdown(&result, "y").dependency_adjustment, -10.0);
        assert_eq!(ids(&result)[0], "hub");
    }

    #[test]
    fn test_final_score_monotonic_in_urgency() {
        for order in ["input", "score"] {
            let config = PrioritizationConfig {
                allocation_order: order.to_string(),
                ..PrioritizationConfig::default()
            };
            let mut previous = f64::MIN;
            for urgency in (0..=100).step_by(5) {
                let other = make_task("other", 70.0, 60.0, 60.0, RiskLevel::High);
                let mut route = make_task("route", urgency as f64, 40.0, 60.0, RiskLevel::Medium);
                route.task_type = crate::models::TaskType::RouteOptimization;
                route.deadline = Some(now() + Duration::hours(5));
                route.dependencies = vec!["other".to_string()];

                let mut request = request_with(vec![other, route]);
                request.constraints.available_resources = 100.0;
                // Monday night, busy season
                request.business_context = BusinessContext {
                    seasonal_factor: 1.2,
                    market_conditions: MarketConditions::Busy,
                    ..context(22, 1)
                };

                let result = prioritize_with_config(&request, now(), &config).unwrap();
                let current = breakdown(&result, "route").final_score;
                assert!(
                    current >= previous,
                    "{} order: urgency {} dropped score to {}",
                    order,
                    urgency,
                    current
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_completed_task_ids_lift_penalty() {
        let a = make_task("a", 50.0, 50.0, 10.0, RiskLevel::Medium);
        let mut b = make_task("b", 50.0, 50.0, 10.0, RiskLevel::Medium);
        b.dependencies = vec!["a".to_string()];

        let mut request = request_with(vec![a, b]);
        let blocked = prioritize(&request, now()).unwrap();
        assert_eq!(breakdown(&blocked, "b").dependency_adjustment, -10.0);

        request.completed_task_ids = vec!["a".to_string()];
        let unblocked = prioritize(&request, now()).unwrap();
        assert_eq!(breakdown(&unblocked, "b").dependency_adjustment, 0.0);
    }

    #[test]
    fn test_ordered_tasks_are_caller_values() {
        let task = make_task("a", 150.0, 50.0, 50.0, RiskLevel::Low);
        let request = request_with(vec![task.clone()]);
        let result = prioritize(&request, now()).unwrap();
        // Clamping applies to scoring only
        assert_eq!(result.ordered_tasks[0], task);
        assert_eq!(result.optimization_metrics.average_urgency, 100.0);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let mut task = make_task("a", 50.0, 50.0, 50.0, RiskLevel::Low);
        task.dependencies = vec!["a".to_string()];
        let result = prioritize(&request_with(vec![task]), now());
        assert!(matches!(
            result,
            Err(PrioritizationError::Validation(
                ValidationError::SelfDependency(_)
            ))
        ));
    }

    #[test]
    fn test_context_falls_back_to_clock() {
        let mut route = make_task("route", 50.0, 50.0, 10.0, RiskLevel::Medium);
        route.task_type = crate::models::TaskType::RouteOptimization;
        let request = PrioritizationRequest {
            tasks: vec![route],
            ..PrioritizationRequest::default()
        };
        // Monday 22:00: after-hours and week-start boosts both apply
        let monday_night = Utc.with_ymd_and_hms(2025, 3, 3, 22, 0, 0).unwrap();
        let result = prioritize(&request, monday_night).unwrap();
        let entry = breakdown(&result, "route");
        let expected = (entry.base_score * 1.15 * 1.1 + 0.5).floor();
        assert_eq!(entry.final_score, expected);
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = r#"{
            "tasks": [
                {
                    "id": "load-1",
                    "type": "load_assignment",
                    "title": "Cover Dallas reefer load",
                    "urgencyScore": 90,
                    "profitabilityScore": 80,
                    "resourceRequirement": 40,
                    "associatedRevenue": 3200,
                    "riskLevel": "high",
                    "estimatedDuration": 45,
                    "metadata": {"department": "dispatch", "businessImpact": "high"}
                },
                {
                    "id": "doc-1",
                    "type": "documentation",
                    "urgencyScore": 20,
                    "profitabilityScore": 10,
                    "resourceRequirement": 20,
                    "riskLevel": "low",
                    "dependencies": ["load-1"]
                }
            ],
            "constraints": {"availableResources": 80, "prioritizeRevenue": true},
            "businessContext": {"currentHour": 11, "dayOfWeek": 3, "seasonalFactor": 1.0, "marketConditions": "busy"}
        }"#;

        let output = prioritize_json(json, now(), &PrioritizationConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["orderedTasks"][0]["id"], "load-1");
        assert_eq!(value["orderedTasks"][0]["type"], "load_assignment");
        assert!(value["orderedTasks"][0].get("score").is_none());
        assert_eq!(value["optimizationMetrics"]["totalRevenue"], 3200.0);
        assert_eq!(value["scoreBreakdown"][0]["rank"], 1);
        assert_eq!(value["confidence"], value["prioritizationScore"]);
        assert_eq!(value["lastUpdated"], "2025-03-04T10:00:00Z");
        assert!(value.get("generatedAt").is_none());
        assert!(value["reasoning"][0]
            .as_str()
            .unwrap()
            .contains("Cover Dallas reefer load"));
    }

    #[test]
    fn test_debug_verbosity_logs_every_pass() {
        let json = r#"{"tasks": [
            {"id": "a", "type": "billing", "urgencyScore": 50, "profitabilityScore": 50,
             "resourceRequirement": 90, "riskLevel": "low"},
            {"id": "b", "type": "billing", "urgencyScore": 50, "profitabilityScore": 50,
             "resourceRequirement": 90, "riskLevel": "low"}
        ]}"#;
        let config = PrioritizationConfig {
            verbosity: crate::logging::VERBOSITY_DEBUG,
            ..PrioritizationConfig::default()
        };
        let output = crate::logging::test_support::capture_logs(|| {
            prioritize_json(json, now(), &config).unwrap();
        });
        assert!(output.contains("Base score for a"), "{}", output);
        assert!(output.contains("Task b needs 90 but only 10 remains"), "{}", output);
        assert!(output.contains("Prioritized 2 tasks"), "{}", output);
    }

    #[test]
    fn test_json_decode_error() {
        let result = prioritize_json("{not json", now(), &PrioritizationConfig::default());
        assert!(matches!(result, Err(PrioritizationError::Json(_))));
    }
}

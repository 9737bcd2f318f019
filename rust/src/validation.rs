//! Request validation and ingestion.
//!
//! Structural problems (empty or duplicate ids, self-dependencies, impossible
//! context values) reject the request. Scores outside 0-100 are clamped.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::log_checks;
use crate::models::{PrioritizationRequest, Task};

/// Errors raised while validating a prioritization request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Task at position {0} has an empty id")]
    EmptyTaskId(usize),
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),
    #[error("Task {0} lists itself as a dependency")]
    SelfDependency(String),
    #[error("Task {task_id}: {field} must be a finite number")]
    NonFinite { task_id: String, field: &'static str },
    #[error("Task {task_id}: {field} must not be negative, got {value}")]
    Negative {
        task_id: String,
        field: &'static str,
        value: f64,
    },
    #[error("currentHour must be within 0-23, got {0}")]
    InvalidHour(u32),
    #[error("dayOfWeek must be within 0-6, got {0}")]
    InvalidDayOfWeek(u32),
    #[error("seasonalFactor must be a positive finite number, got {0}")]
    InvalidSeasonalFactor(f64),
    #[error("availableResources must be a non-negative finite number, got {0}")]
    InvalidAvailableResources(f64),
}

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;

fn require_finite(task: &Task, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            task_id: task.id.clone(),
            field,
        })
    }
}

fn require_non_negative(
    task: &Task,
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    require_finite(task, field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            task_id: task.id.clone(),
            field,
            value,
        });
    }
    Ok(())
}

fn clamp_score(task_id: &str, field: &str, value: f64, verbosity: u8) -> f64 {
    let clamped = value.clamp(SCORE_MIN, SCORE_MAX);
    if clamped != value {
        log_checks!(
            verbosity,
            "Task {}: {} {} clamped to {}",
            task_id,
            field,
            value,
            clamped
        );
    }
    clamped
}

/// Remove repeated dependency ids, keeping first occurrence order.
fn dedup_dependencies(dependencies: &[String]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    dependencies
        .iter()
        .filter(|dep| seen.insert(dep.as_str()))
        .cloned()
        .collect()
}

/// Validate the request-level constraints and business context.
fn validate_context(request: &PrioritizationRequest) -> Result<(), ValidationError> {
    let context = &request.business_context;
    if let Some(hour) = context.current_hour {
        if hour > 23 {
            return Err(ValidationError::InvalidHour(hour));
        }
    }
    if let Some(day) = context.day_of_week {
        if day > 6 {
            return Err(ValidationError::InvalidDayOfWeek(day));
        }
    }
    if !context.seasonal_factor.is_finite() || context.seasonal_factor <= 0.0 {
        return Err(ValidationError::InvalidSeasonalFactor(
            context.seasonal_factor,
        ));
    }

    let available = request.constraints.available_resources;
    if !available.is_finite() || available < 0.0 {
        return Err(ValidationError::InvalidAvailableResources(available));
    }
    Ok(())
}

/// Validate a request and return sanitized copies of its tasks.
///
/// The returned tasks keep input order. Caller-owned tasks are untouched.
pub fn validate_request(
    request: &PrioritizationRequest,
    verbosity: u8,
) -> Result<Vec<Task>, ValidationError> {
    validate_context(request)?;

    let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
    let mut sanitized = Vec::with_capacity(request.tasks.len());

    for (position, task) in request.tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(ValidationError::EmptyTaskId(position));
        }
        if !seen_ids.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()));
        }
        if task.dependencies.iter().any(|dep| dep == &task.id) {
            return Err(ValidationError::SelfDependency(task.id.clone()));
        }

        require_finite(task, "urgencyScore", task.urgency_score)?;
        require_finite(task, "profitabilityScore", task.profitability_score)?;
        require_finite(task, "resourceRequirement", task.resource_requirement)?;
        require_non_negative(task, "estimatedDuration", task.estimated_duration)?;
        if let Some(revenue) = task.associated_revenue {
            require_non_negative(task, "associatedRevenue", revenue)?;
        }

        let mut clean = task.clone();
        clean.urgency_score = clamp_score(&task.id, "urgencyScore", task.urgency_score, verbosity);
        clean.profitability_score = clamp_score(
            &task.id,
            "profitabilityScore",
            task.profitability_score,
            verbosity,
        );
        clean.resource_requirement = clamp_score(
            &task.id,
            "resourceRequirement",
            task.resource_requirement,
            verbosity,
        );
        clean.dependencies = dedup_dependencies(&task.dependencies);
        sanitized.push(clean);
    }

    Ok(sanitized)
}

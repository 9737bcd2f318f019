//! Core data types for the prioritization engine.
//!
//! Field names serialize in camelCase and enum values in snake_case so the
//! request/result payloads match what the surrounding dispatch system sends.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a work item. Only the context pass looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    LoadAssignment,
    RouteOptimization,
    ComplianceCheck,
    MaintenanceAlert,
    CustomerCommunication,
    Documentation,
    Billing,
    DriverManagement,
}

/// Operational risk classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Numeric code used by the risk-mitigation metric (low=1 .. critical=4).
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Severity multiplier independent of urgency and profitability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessImpact {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Dispatch,
    Operations,
    Compliance,
    Finance,
    Management,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch => write!(f, "dispatch"),
            Self::Operations => write!(f, "operations"),
            Self::Compliance => write!(f, "compliance"),
            Self::Finance => write!(f, "finance"),
            Self::Management => write!(f, "management"),
        }
    }
}

/// Ambient demand category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketConditions {
    Slow,
    #[default]
    Normal,
    Busy,
    Peak,
}

impl fmt::Display for MarketConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slow => write!(f, "slow"),
            Self::Normal => write!(f, "normal"),
            Self::Busy => write!(f, "busy"),
            Self::Peak => write!(f, "peak"),
        }
    }
}

/// Caller's appetite for risk. Carried through, never scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

/// Departmental and domain references attached to a task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// None when the caller did not assign the task to a department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default)]
    pub business_impact: BusinessImpact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
}

/// A pending work item to be ranked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub urgency_score: f64,
    pub profitability_score: f64,
    pub resource_requirement: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_revenue: Option<f64>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Minutes.
    #[serde(default)]
    pub estimated_duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: TaskMetadata,
}

impl Task {
    /// Title for human-readable text, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Hours from `now` until the deadline; negative when overdue.
    pub fn hours_until_deadline(&self, now: DateTime<Utc>) -> Option<f64> {
        self.deadline
            .map(|deadline| (deadline - now).num_milliseconds() as f64 / 3_600_000.0)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.hours_until_deadline(now).is_some_and(|h| h < 0.0)
    }
}

fn default_available_resources() -> f64 {
    100.0
}

fn default_max_tasks_per_hour() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

/// Resource and policy constraints for one invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default = "default_available_resources")]
    pub available_resources: f64,
    /// Advisory only; surfaces in recommendation text.
    #[serde(default = "default_max_tasks_per_hour")]
    pub max_tasks_per_hour: u32,
    #[serde(default = "default_true")]
    pub prioritize_revenue: bool,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub department_focus: Vec<Department>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            available_resources: default_available_resources(),
            max_tasks_per_hour: default_max_tasks_per_hour(),
            prioritize_revenue: true,
            risk_tolerance: RiskTolerance::default(),
            department_focus: Vec::new(),
        }
    }
}

fn default_seasonal_factor() -> f64 {
    1.0
}

/// Ambient business conditions. Hour and weekday fall back to the clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_hour: Option<u32>,
    /// 0 = Sunday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
    #[serde(default = "default_seasonal_factor")]
    pub seasonal_factor: f64,
    #[serde(default)]
    pub market_conditions: MarketConditions,
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            current_hour: None,
            day_of_week: None,
            seasonal_factor: default_seasonal_factor(),
            market_conditions: MarketConditions::default(),
        }
    }
}

impl BusinessContext {
    pub fn hour(&self, now: DateTime<Utc>) -> u32 {
        self.current_hour.unwrap_or_else(|| now.hour())
    }

    pub fn weekday(&self, now: DateTime<Utc>) -> u32 {
        self.day_of_week
            .unwrap_or_else(|| now.weekday().num_days_from_sunday())
    }
}

/// Input bundle for one prioritization call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationRequest {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub business_context: BusinessContext,
    /// Ids of prerequisites known to be done. Empty means every in-batch
    /// dependency counts as unmet.
    #[serde(default)]
    pub completed_task_ids: Vec<String>,
}

/// Aggregate statistics over the whole batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationMetrics {
    pub total_revenue: f64,
    pub average_urgency: f64,
    pub resource_utilization: f64,
    pub risk_mitigation: f64,
    /// Hours.
    pub time_to_completion: f64,
}

/// Per-task record of how the final score was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub task_id: String,
    pub rank: usize,
    pub base_score: f64,
    pub dependency_adjustment: f64,
    pub resource_penalized: bool,
    pub final_score: f64,
}

/// Output bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedResult {
    pub ordered_tasks: Vec<Task>,
    pub optimization_metrics: OptimizationMetrics,
    pub reasoning: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub prioritization_score: f64,
    /// Same value as `prioritization_score`.
    pub confidence: f64,
    pub score_breakdown: Vec<ScoreBreakdown>,
    /// The reference instant the result was computed for.
    pub last_updated: DateTime<Utc>,
}

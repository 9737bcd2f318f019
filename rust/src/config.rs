//! Configuration types for the prioritization engine.

use pyo3::prelude::*;

use crate::models::{BusinessImpact, MarketConditions, RiskLevel};

/// Order in which the allocator consumes the resource budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationOrder {
    /// Original input order (default, order sensitive).
    Input,
    /// Highest score first, ties in input order.
    Score,
}

impl AllocationOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "input" => Some(Self::Input),
            "score" => Some(Self::Score),
            _ => None,
        }
    }
}

/// Weights, bonuses and thresholds used by the scoring passes and reporter.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PrioritizationConfig {
    /// Weight applied to urgency score
    #[pyo3(get, set)]
    pub urgency_weight: f64,
    /// Profitability weight when revenue prioritization is requested
    #[pyo3(get, set)]
    pub revenue_weight: f64,
    /// Profitability weight otherwise
    #[pyo3(get, set)]
    pub baseline_profit_weight: f64,
    /// Weight applied to (100 - resource requirement)
    #[pyo3(get, set)]
    pub efficiency_weight: f64,
    /// Risk bonuses, low to critical
    #[pyo3(get, set)]
    pub risk_bonus_low: f64,
    #[pyo3(get, set)]
    pub risk_bonus_medium: f64,
    #[pyo3(get, set)]
    pub risk_bonus_high: f64,
    #[pyo3(get, set)]
    pub risk_bonus_critical: f64,
    /// Deadline within this many hours (or overdue) earns `deadline_urgent_bonus`
    #[pyo3(get, set)]
    pub deadline_urgent_hours: f64,
    #[pyo3(get, set)]
    pub deadline_urgent_bonus: f64,
    #[pyo3(get, set)]
    pub deadline_soon_hours: f64,
    #[pyo3(get, set)]
    pub deadline_soon_bonus: f64,
    #[pyo3(get, set)]
    pub deadline_day_hours: f64,
    #[pyo3(get, set)]
    pub deadline_day_bonus: f64,
    /// Business impact multipliers, low to critical
    #[pyo3(get, set)]
    pub impact_multiplier_low: f64,
    #[pyo3(get, set)]
    pub impact_multiplier_medium: f64,
    #[pyo3(get, set)]
    pub impact_multiplier_high: f64,
    #[pyo3(get, set)]
    pub impact_multiplier_critical: f64,
    /// Market multipliers, slow to peak
    #[pyo3(get, set)]
    pub market_multiplier_slow: f64,
    #[pyo3(get, set)]
    pub market_multiplier_normal: f64,
    #[pyo3(get, set)]
    pub market_multiplier_busy: f64,
    #[pyo3(get, set)]
    pub market_multiplier_peak: f64,
    /// Points added per task unblocked
    #[pyo3(get, set)]
    pub unblock_bonus: f64,
    /// Points subtracted per unmet in-batch dependency
    #[pyo3(get, set)]
    pub unmet_dependency_penalty: f64,
    /// Multiplier for tasks exceeding remaining capacity
    #[pyo3(get, set)]
    pub overcommit_penalty: f64,
    /// Allocation order: "input" or "score"
    #[pyo3(get, set)]
    pub allocation_order: String,
    /// First business hour (inclusive)
    #[pyo3(get, set)]
    pub business_hours_start: u32,
    /// Last business hour (inclusive)
    #[pyo3(get, set)]
    pub business_hours_end: u32,
    #[pyo3(get, set)]
    pub business_hours_boost: f64,
    #[pyo3(get, set)]
    pub after_hours_boost: f64,
    /// Day of week treated as start of the week (0 = Sunday)
    #[pyo3(get, set)]
    pub week_start_day: u32,
    #[pyo3(get, set)]
    pub week_start_boost: f64,
    /// Revenue above which a task counts as high-revenue
    #[pyo3(get, set)]
    pub high_revenue_threshold: f64,
    /// Requirement above which a task counts as high-complexity
    #[pyo3(get, set)]
    pub high_complexity_requirement: f64,
    /// Recommend splitting work when more high-complexity tasks than this
    #[pyo3(get, set)]
    pub high_complexity_count: usize,
    /// Recommend clearing prerequisites when more dependent tasks than this
    #[pyo3(get, set)]
    pub blocked_task_count: usize,
    /// Requirement above which a task counts toward a bottleneck
    #[pyo3(get, set)]
    pub bottleneck_requirement: f64,
    /// Flag a bottleneck when more heavy tasks than this
    #[pyo3(get, set)]
    pub bottleneck_count: usize,
    /// Minutes in one working shift
    #[pyo3(get, set)]
    pub shift_minutes: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PrioritizationConfig {
    fn default() -> Self {
        Self {
            urgency_weight: 0.4,
            revenue_weight: 0.3,
            baseline_profit_weight: 0.15,
            efficiency_weight: 0.1,
            risk_bonus_low: 5.0,
            risk_bonus_medium: 10.0,
            risk_bonus_high: 15.0,
            risk_bonus_critical: 20.0,
            deadline_urgent_hours: 2.0,
            deadline_urgent_bonus: 15.0,
            deadline_soon_hours: 8.0,
            deadline_soon_bonus: 10.0,
            deadline_day_hours: 24.0,
            deadline_day_bonus: 5.0,
            impact_multiplier_low: 1.0,
            impact_multiplier_medium: 1.1,
            impact_multiplier_high: 1.25,
            impact_multiplier_critical: 1.5,
            market_multiplier_slow: 0.9,
            market_multiplier_normal: 1.0,
            market_multiplier_busy: 1.15,
            market_multiplier_peak: 1.3,
            unblock_bonus: 5.0,
            unmet_dependency_penalty: 10.0,
            overcommit_penalty: 0.7,
            allocation_order: "input".to_string(),
            business_hours_start: 9,
            business_hours_end: 17,
            business_hours_boost: 1.2,
            after_hours_boost: 1.15,
            week_start_day: 1,
            week_start_boost: 1.1,
            high_revenue_threshold: 1000.0,
            high_complexity_requirement: 70.0,
            high_complexity_count: 3,
            blocked_task_count: 2,
            bottleneck_requirement: 80.0,
            bottleneck_count: 2,
            shift_minutes: 480.0,
            verbosity: 0,
        }
    }
}

impl PrioritizationConfig {
    /// Profitability weight for the given revenue flag.
    pub fn profit_weight(&self, prioritize_revenue: bool) -> f64 {
        if prioritize_revenue {
            self.revenue_weight
        } else {
            self.baseline_profit_weight
        }
    }

    pub fn risk_bonus(&self, risk: RiskLevel) -> f64 {
        match risk {
            RiskLevel::Low => self.risk_bonus_low,
            RiskLevel::Medium => self.risk_bonus_medium,
            RiskLevel::High => self.risk_bonus_high,
            RiskLevel::Critical => self.risk_bonus_critical,
        }
    }

    pub fn impact_multiplier(&self, impact: BusinessImpact) -> f64 {
        match impact {
            BusinessImpact::Low => self.impact_multiplier_low,
            BusinessImpact::Medium => self.impact_multiplier_medium,
            BusinessImpact::High => self.impact_multiplier_high,
            BusinessImpact::Critical => self.impact_multiplier_critical,
        }
    }

    pub fn market_multiplier(&self, market: MarketConditions) -> f64 {
        match market {
            MarketConditions::Slow => self.market_multiplier_slow,
            MarketConditions::Normal => self.market_multiplier_normal,
            MarketConditions::Busy => self.market_multiplier_busy,
            MarketConditions::Peak => self.market_multiplier_peak,
        }
    }

    /// Deadline proximity bonus for the given hours until the deadline.
    ///
    /// Buckets are inclusive upper bounds. Overdue tasks have negative hours
    /// and land in the most urgent bucket. No deadline gives 0.
    pub fn deadline_bonus(&self, hours_until_deadline: Option<f64>) -> f64 {
        match hours_until_deadline {
            Some(h) if h <= self.deadline_urgent_hours => self.deadline_urgent_bonus,
            Some(h) if h <= self.deadline_soon_hours => self.deadline_soon_bonus,
            Some(h) if h <= self.deadline_day_hours => self.deadline_day_bonus,
            _ => 0.0,
        }
    }

    pub fn is_business_hour(&self, hour: u32) -> bool {
        (self.business_hours_start..=self.business_hours_end).contains(&hour)
    }
}

#[pymethods]
impl PrioritizationConfig {
    #[new]
    #[pyo3(signature = (
        urgency_weight=None,
        revenue_weight=None,
        baseline_profit_weight=None,
        efficiency_weight=None,
        risk_bonus_low=None,
        risk_bonus_medium=None,
        risk_bonus_high=None,
        risk_bonus_critical=None,
        deadline_urgent_hours=None,
        deadline_urgent_bonus=None,
        deadline_soon_hours=None,
        deadline_soon_bonus=None,
        deadline_day_hours=None,
        deadline_day_bonus=None,
        impact_multiplier_low=None,
        impact_multiplier_medium=None,
        impact_multiplier_high=None,
        impact_multiplier_critical=None,
        market_multiplier_slow=None,
        market_multiplier_normal=None,
        market_multiplier_busy=None,
        market_multiplier_peak=None,
        unblock_bonus=None,
        unmet_dependency_penalty=None,
        overcommit_penalty=None,
        allocation_order=None,
        business_hours_start=None,
        business_hours_end=None,
        business_hours_boost=None,
        after_hours_boost=None,
        week_start_day=None,
        week_start_boost=None,
        high_revenue_threshold=None,
        high_complexity_requirement=None,
        high_complexity_count=None,
        blocked_task_count=None,
        bottleneck_requirement=None,
        bottleneck_count=None,
        shift_minutes=None,
        verbosity=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        urgency_weight: Option<f64>,
        revenue_weight: Option<f64>,
        baseline_profit_weight: Option<f64>,
        efficiency_weight: Option<f64>,
        risk_bonus_low: Option<f64>,
        risk_bonus_medium: Option<f64>,
        risk_bonus_high: Option<f64>,
        risk_bonus_critical: Option<f64>,
        deadline_urgent_hours: Option<f64>,
        deadline_urgent_bonus: Option<f64>,
        deadline_soon_hours: Option<f64>,
        deadline_soon_bonus: Option<f64>,
        deadline_day_hours: Option<f64>,
        deadline_day_bonus: Option<f64>,
        impact_multiplier_low: Option<f64>,
        impact_multiplier_medium: Option<f64>,
        impact_multiplier_high: Option<f64>,
        impact_multiplier_critical: Option<f64>,
        market_multiplier_slow: Option<f64>,
        market_multiplier_normal: Option<f64>,
        market_multiplier_busy: Option<f64>,
        market_multiplier_peak: Option<f64>,
        unblock_bonus: Option<f64>,
        unmet_dependency_penalty: Option<f64>,
        overcommit_penalty: Option<f64>,
        allocation_order: Option<String>,
        business_hours_start: Option<u32>,
        business_hours_end: Option<u32>,
        business_hours_boost: Option<f64>,
        after_hours_boost: Option<f64>,
        week_start_day: Option<u32>,
        week_start_boost: Option<f64>,
        high_revenue_threshold: Option<f64>,
        high_complexity_requirement: Option<f64>,
        high_complexity_count: Option<usize>,
        blocked_task_count: Option<usize>,
        bottleneck_requirement: Option<f64>,
        bottleneck_count: Option<usize>,
        shift_minutes: Option<f64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            urgency_weight: urgency_weight.unwrap_or(defaults.urgency_weight),
            revenue_weight: revenue_weight.unwrap_or(defaults.revenue_weight),
            baseline_profit_weight: baseline_profit_weight.unwrap_or(defaults.baseline_profit_weight),
            efficiency_weight: efficiency_weight.unwrap_or(defaults.efficiency_weight),
            risk_bonus_low: risk_bonus_low.unwrap_or(defaults.risk_bonus_low),
            risk_bonus_medium: risk_bonus_medium.unwrap_or(defaults.risk_bonus_medium),
            risk_bonus_high: risk_bonus_high.unwrap_or(defaults.risk_bonus_high),
            risk_bonus_critical: risk_bonus_critical.unwrap_or(defaults.risk_bonus_critical),
            deadline_urgent_hours: deadline_urgent_hours.unwrap_or(defaults.deadline_urgent_hours),
            deadline_urgent_bonus: deadline_urgent_bonus.unwrap_or(defaults.deadline_urgent_bonus),
            deadline_soon_hours: deadline_soon_hours.unwrap_or(defaults.deadline_soon_hours),
            deadline_soon_bonus: deadline_soon_bonus.unwrap_or(defaults.deadline_soon_bonus),
            deadline_day_hours: deadline_day_hours.unwrap_or(defaults.deadline_day_hours),
            deadline_day_bonus: deadline_day_bonus.unwrap_or(defaults.deadline_day_bonus),
            impact_multiplier_low: impact_multiplier_low.unwrap_or(defaults.impact_multiplier_low),
            impact_multiplier_medium: impact_multiplier_medium.unwrap_or(defaults.impact_multiplier_medium),
            impact_multiplier_high: impact_multiplier_high.unwrap_or(defaults.impact_multiplier_high),
            impact_multiplier_critical: impact_multiplier_critical.unwrap_or(defaults.impact_multiplier_critical),
            market_multiplier_slow: market_multiplier_slow.unwrap_or(defaults.market_multiplier_slow),
            market_multiplier_normal: market_multiplier_normal.unwrap_or(defaults.market_multiplier_normal),
            market_multiplier_busy: market_multiplier_busy.unwrap_or(defaults.market_multiplier_busy),
            market_multiplier_peak: market_multiplier_peak.unwrap_or(defaults.market_multiplier_peak),
            unblock_bonus: unblock_bonus.unwrap_or(defaults.unblock_bonus),
            unmet_dependency_penalty: unmet_dependency_penalty.unwrap_or(defaults.unmet_dependency_penalty),
            overcommit_penalty: overcommit_penalty.unwrap_or(defaults.overcommit_penalty),
            allocation_order: allocation_order.unwrap_or(defaults.allocation_order),
            business_hours_start: business_hours_start.unwrap_or(defaults.business_hours_start),
            business_hours_end: business_hours_end.unwrap_or(defaults.business_hours_end),
            business_hours_boost: business_hours_boost.unwrap_or(defaults.business_hours_boost),
            after_hours_boost: after_hours_boost.unwrap_or(defaults.after_hours_boost),
            week_start_day: week_start_day.unwrap_or(defaults.week_start_day),
            week_start_boost: week_start_boost.unwrap_or(defaults.week_start_boost),
            high_revenue_threshold: high_revenue_threshold.unwrap_or(defaults.high_revenue_threshold),
            high_complexity_requirement: high_complexity_requirement.unwrap_or(defaults.high_complexity_requirement),
            high_complexity_count: high_complexity_count.unwrap_or(defaults.high_complexity_count),
            blocked_task_count: blocked_task_count.unwrap_or(defaults.blocked_task_count),
            bottleneck_requirement: bottleneck_requirement.unwrap_or(defaults.bottleneck_requirement),
            bottleneck_count: bottleneck_count.unwrap_or(defaults.bottleneck_count),
            shift_minutes: shift_minutes.unwrap_or(defaults.shift_minutes),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PrioritizationConfig(allocation_order={:?}, urgency_weight={}, revenue_weight={}, verbosity={})",
            self.allocation_order, self.urgency_weight, self.revenue_weight, self.verbosity
        )
    }
}

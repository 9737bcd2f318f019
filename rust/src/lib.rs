//! Rust implementation of the multi-criteria task prioritization engine.
//!
//! Ranks a batch of pending work items (load assignments, compliance checks,
//! route re-optimizations, ...) into one priority-ordered list under a finite
//! resource budget, and reports metrics, reasoning and recommendations.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{DateTime, Utc};
use pyo3::prelude::*;

mod config;
pub mod engine;
pub mod logging;
pub mod models;
pub mod sorting;
pub mod validation;

pub use config::{AllocationOrder, PrioritizationConfig};
pub use engine::{prioritize, prioritize_json, prioritize_with_config, PrioritizationError};
pub use models::{
    BusinessContext, BusinessImpact, Constraints, Department, MarketConditions,
    OptimizationMetrics, PrioritizationRequest, PrioritizedResult, RiskLevel, RiskTolerance,
    ScoreBreakdown, Task, TaskMetadata, TaskType,
};
pub use validation::ValidationError;

/// Prioritize a JSON-encoded request.
///
/// # Arguments
/// * `request_json` - PrioritizationRequest payload (camelCase fields)
/// * `now` - Reference instant for deadlines and unset context fields;
///   defaults to the current UTC time
/// * `config` - Engine configuration; defaults to `PrioritizationConfig()`.
///   Set `verbosity` (1-3) to log the passes to stderr
///
/// # Returns
/// * JSON-encoded PrioritizedResult
///
/// # Raises
/// * ValueError if the payload is malformed or fails validation
#[pyfunction(name = "prioritize_json")]
#[pyo3(signature = (request_json, now=None, config=None))]
fn py_prioritize_json(
    request_json: &str,
    now: Option<DateTime<Utc>>,
    config: Option<PrioritizationConfig>,
) -> PyResult<String> {
    let now = now.unwrap_or_else(Utc::now);
    let config = config.unwrap_or_default();

    match prioritize_json(request_json, now, &config) {
        Ok(result) => Ok(result),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The taskrank.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Verbosity-gated events go to stderr, filtered by RUST_LOG
    logging::init();

    // Config types
    m.add_class::<PrioritizationConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_prioritize_json, m)?)?;

    Ok(())
}

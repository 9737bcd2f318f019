//! Multi-criteria task prioritization engine.
//!
//! Four passes run in sequence over the same batch, followed by ranking and
//! reporting:
//! 1. Scorer: intrinsic priority from urgency, profit, risk, effort, deadline
//! 2. Dependency adjuster: boost unblockers, suppress blocked tasks
//! 3. Resource allocator: greedy budget draw with an over-commit penalty
//! 4. Context adjuster: time of day, start of week, seasonal factor

mod allocation;
mod context;
mod dependencies;
mod prioritizer;
mod report;
mod scoring;
mod types;

pub use allocation::allocate_resources;
pub use context::{adjust_for_context, apply_context_factors, ContextSnapshot};
pub use dependencies::{adjust_for_dependencies, count_dependents};
pub use prioritizer::{prioritize, prioritize_json, prioritize_with_config, PrioritizationError};
pub use report::{build_reasoning, build_recommendations, compute_metrics, identify_risk_factors};
pub use scoring::{score_task, score_tasks};
pub use types::{round_half_up, ScoredTask};

//! Deterministic planner used when the remote service is not configured.

use std::time::Duration;

use tracing::debug;

use super::{PlanFuture, PlanningResult, TaskPlanner};

/// Hour estimate given to every fallback suggestion.
const FALLBACK_HOURS: f64 = 4.0;

/// Offline planner producing a fixed three-step breakdown.
#[derive(Debug, Clone, Default)]
pub struct LocalPlanner {
    latency: Duration,
}

impl LocalPlanner {
    /// Create a planner that answers after `latency`.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The suggestion for `task_title`, without latency.
    #[must_use]
    pub fn suggestion(task_title: &str) -> PlanningResult {
        PlanningResult {
            subtasks: vec![
                format!("Research requirements for {task_title}"),
                "Implement core logic".to_owned(),
                "Write unit tests".to_owned(),
            ],
            branch_name_suggestion: format!("feat/{}", branch_slug(task_title)),
            estimated_hours: FALLBACK_HOURS,
        }
    }
}

impl TaskPlanner for LocalPlanner {
    fn plan(&self, task_title: &str) -> PlanFuture {
        let latency = self.latency;
        let suggestion = Self::suggestion(task_title);
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            debug!(branch = %suggestion.branch_name_suggestion, "local suggestion ready");
            Ok(suggestion)
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Lowercase the title and collapse each whitespace run into one `-`.
fn branch_slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

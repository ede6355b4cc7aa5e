//! AI-assisted task breakdown.
//!
//! The [`TaskPlanner`] trait is the seam between the creation form and the
//! suggestion service. [`gemini::GeminiPlanner`] talks to the generative
//! language API; [`local::LocalPlanner`] is the deterministic fallback used
//! when no credential is configured.

pub mod gemini;
pub mod local;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AiConfig;
use crate::{AppError, Result};

/// Fewest subtasks a usable suggestion carries.
pub const MIN_SUBTASKS: usize = 3;

/// Most subtasks kept from a suggestion.
pub const MAX_SUBTASKS: usize = 5;

/// Boxed future returned by [`TaskPlanner::plan`].
pub type PlanFuture = Pin<Box<dyn Future<Output = Result<PlanningResult>> + Send>>;

/// Structured suggestion for a task title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanningResult {
    /// Technical subtasks, 3 to 5 of them.
    pub subtasks: Vec<String>,
    /// Git branch name following conventional-commit prefixes.
    pub branch_name_suggestion: String,
    /// Estimated development hours.
    pub estimated_hours: f64,
}

impl PlanningResult {
    /// Check the suggestion shape and trim excess subtasks.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MalformedResponse` when fewer than
    /// [`MIN_SUBTASKS`] non-blank subtasks remain, the branch name is empty,
    /// or the hour estimate is negative or not finite.
    pub fn validated(mut self) -> Result<Self> {
        self.subtasks.retain(|s| !s.trim().is_empty());
        if self.subtasks.len() < MIN_SUBTASKS {
            return Err(AppError::MalformedResponse(format!(
                "{} subtasks in suggestion, expected at least {MIN_SUBTASKS}",
                self.subtasks.len()
            )));
        }
        self.subtasks.truncate(MAX_SUBTASKS);

        if self.branch_name_suggestion.trim().is_empty() {
            return Err(AppError::MalformedResponse("empty branch name suggestion".into()));
        }

        if !self.estimated_hours.is_finite() || self.estimated_hours < 0.0 {
            return Err(AppError::MalformedResponse(format!(
                "invalid hour estimate {}",
                self.estimated_hours
            )));
        }

        Ok(self)
    }
}

/// Source of task breakdown suggestions.
pub trait TaskPlanner: Send + Sync {
    /// Suggest subtasks, a branch name, and an hour estimate for a title.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Ai` on transport failure or timeout, or
    /// `AppError::MalformedResponse` when the answer does not parse.
    fn plan(&self, task_title: &str) -> PlanFuture;

    /// Short planner name for logs.
    fn name(&self) -> &'static str;
}

/// Pick the remote planner when AI is enabled and credentialed, the local
/// fallback otherwise.
///
/// # Errors
///
/// Returns `AppError::Ai` if the HTTP client cannot be built.
pub fn planner_from_config(config: &AiConfig) -> Result<Arc<dyn TaskPlanner>> {
    if config.remote_available() {
        info!(model = %config.model, "using remote ai planner");
        Ok(Arc::new(gemini::GeminiPlanner::new(config)?))
    } else {
        info!("using local fallback planner");
        Ok(Arc::new(local::LocalPlanner::new(
            std::time::Duration::from_millis(config.fallback_delay_ms),
        )))
    }
}

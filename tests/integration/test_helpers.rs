//! Shared helpers for integration tests.
//!
//! Provides a fast test configuration, planners whose answers the test
//! controls, and a bounded wait on the notification feed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use taskflow::ai::{PlanFuture, PlanningResult, TaskPlanner};
use taskflow::models::Notification;
use taskflow::notify::NotificationFeed;
use taskflow::{AppError, GlobalConfig};
use tokio::sync::Notify;

/// Upper bound for any single wait in these tests.
pub const WAIT: Duration = Duration::from_secs(2);

/// Configuration with short timers and no demo data.
pub fn test_config() -> GlobalConfig {
    GlobalConfig::from_toml_str(
        r#"
[board]
seed_demo_data = false
default_repo = "taskflow-test"
id_prefix = "TF"
hint_delay_ms = 10

[ai]
fallback_delay_ms = 0

[sync]
delay_ms = 20
auto_close_delay_ms = 10
"#,
    )
    .expect("valid test config")
}

pub fn plan(branch: &str) -> PlanningResult {
    PlanningResult {
        subtasks: vec!["Design".into(), "Build".into(), "Test".into()],
        branch_name_suggestion: branch.into(),
        estimated_hours: 5.0,
    }
}

/// Planner that answers only once the test opens the gate.
#[derive(Debug)]
pub struct GatedPlanner {
    gate: Arc<Notify>,
    answer: PlanningResult,
    calls: AtomicUsize,
}

impl GatedPlanner {
    pub fn new(answer: PlanningResult) -> Arc<Self> {
        Arc::new(Self {
            gate: Arc::new(Notify::new()),
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    /// Let one pending request complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TaskPlanner for GatedPlanner {
    fn plan(&self, _task_title: &str) -> PlanFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = Arc::clone(&self.gate);
        let answer = self.answer.clone();
        Box::pin(async move {
            gate.notified().await;
            Ok(answer)
        })
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Planner that always fails like an unreachable service.
#[derive(Debug, Default)]
pub struct FailingPlanner;

impl TaskPlanner for FailingPlanner {
    fn plan(&self, _task_title: &str) -> PlanFuture {
        Box::pin(async { Err(AppError::Ai("request timed out".into())) })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Wait for the next notification, failing the test after [`WAIT`].
pub async fn next(feed: &mut NotificationFeed) -> Notification {
    tokio::time::timeout(WAIT, feed.recv())
        .await
        .expect("notification within timeout")
        .expect("feed open")
}

/// Planner that answers `feat/{title}`, slowly for one chosen title.
#[derive(Debug)]
pub struct EchoPlanner {
    slow_title: String,
}

impl EchoPlanner {
    pub fn new(slow_title: &str) -> Arc<Self> {
        Arc::new(Self {
            slow_title: slow_title.into(),
        })
    }
}

impl TaskPlanner for EchoPlanner {
    fn plan(&self, task_title: &str) -> PlanFuture {
        let delay = if task_title == self.slow_title {
            Duration::from_millis(150)
        } else {
            Duration::from_millis(10)
        };
        let answer = plan(&format!("feat/{task_title}"));
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(answer)
        })
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

//! Derived board statistics for the dashboard.

use serde::Serialize;

use crate::models::{Priority, Task, TaskStatus};

/// Number of characters of the title kept on a commit-activity bar label.
const ACTIVITY_LABEL_CHARS: usize = 10;

/// Maximum entries in the git events feed.
const GIT_EVENTS_LIMIT: usize = 4;

/// Each commit counts for 1.5 estimated hours.
const HOURS_PER_COMMIT_NUMERATOR: u64 = 3;
const HOURS_PER_COMMIT_DENOMINATOR: u64 = 2;

/// One bar of the commit-activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitActivity {
    /// Task id the bar belongs to.
    pub task_id: String,
    /// Truncated title.
    pub label: String,
    /// Commit count.
    pub commits: u32,
}

/// One line of the git events feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitEvent {
    /// Task id.
    pub task_id: String,
    /// Latest commit subject, if recorded.
    pub message: Option<String>,
    /// Branch the commit landed on.
    pub branch_name: String,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    /// All tasks.
    pub total: usize,
    /// Tasks in `done`.
    pub completed: usize,
    /// Tasks not in `done`.
    pub active: usize,
    /// `completed / total` as a rounded percentage; 0 for an empty board.
    pub completion_rate: u32,
    /// Sum of commits across all tasks.
    pub total_commits: u64,
    /// `floor(total_commits * 1.5)`.
    pub estimated_hours: u64,
    /// Task count per status, in column order.
    pub by_status: Vec<(TaskStatus, usize)>,
    /// Task count per priority, highest first.
    pub by_priority: Vec<(Priority, usize)>,
    /// Commit-activity chart bars (tasks with at least one commit).
    pub commit_activity: Vec<CommitActivity>,
    /// Recent git events.
    pub git_events: Vec<GitEvent>,
}

impl BoardStats {
    /// Derive statistics from a task list.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
        let total_commits: u64 = tasks.iter().map(|t| u64::from(t.commits())).sum();

        let by_status = TaskStatus::ALL
            .iter()
            .map(|&s| (s, tasks.iter().filter(|t| t.status == s).count()))
            .collect();
        let by_priority = Priority::ALL
            .iter()
            .map(|&p| (p, tasks.iter().filter(|t| t.priority == p).count()))
            .collect();

        let commit_activity = tasks
            .iter()
            .filter(|t| t.commits() > 0)
            .map(|t| CommitActivity {
                task_id: t.id.clone(),
                label: activity_label(&t.title),
                commits: t.commits(),
            })
            .collect();

        let git_events = tasks
            .iter()
            .filter_map(|t| t.git.as_ref().filter(|g| g.commits > 0).map(|g| (t, g)))
            .take(GIT_EVENTS_LIMIT)
            .map(|(t, g)| GitEvent {
                task_id: t.id.clone(),
                message: g.last_commit_message.clone(),
                branch_name: g.branch_name.clone(),
            })
            .collect();

        Self {
            total,
            completed,
            active: total - completed,
            completion_rate: completion_rate(completed, total),
            total_commits,
            estimated_hours: total_commits * HOURS_PER_COMMIT_NUMERATOR
                / HOURS_PER_COMMIT_DENOMINATOR,
            by_status,
            by_priority,
            commit_activity,
            git_events,
        }
    }

    /// Count for one status.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

/// Rounded percentage, half away from zero, without floating point.
fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (completed * 200 + total) / (total * 2);
    u32::try_from(rate).unwrap_or(100)
}

fn activity_label(title: &str) -> String {
    let head: String = title.chars().take(ACTIVITY_LABEL_CHARS).collect();
    format!("{head}...")
}

//! Demo board shown when `board.seed_demo_data` is enabled.

use chrono::{Duration, Utc};

use crate::models::{GitMetadata, Priority, Task, TaskStatus};

/// The four demo tasks, in board order.
#[must_use]
pub fn demo_tasks() -> Vec<Task> {
    let now = Utc::now();
    vec![
        Task::new(
            "TASK-101",
            "Implement Authentication Middleware",
            TaskStatus::InProgress,
            Priority::High,
        )
        .with_tags(["backend", "security"])
        .with_git(GitMetadata {
            branch_name: "feat/auth-middleware".into(),
            commits: 12,
            last_commit_message: Some("feat: add jwt verification".into()),
            last_commit_hash: Some("a1b2c3d".into()),
            repo: "taskflow-api".into(),
        })
        .with_created_at(now),
        Task::new(
            "TASK-102",
            "Design Command Palette UI",
            TaskStatus::Review,
            Priority::Medium,
        )
        .with_tags(["frontend", "ui/ux"])
        .with_git(GitMetadata {
            branch_name: "feat/cmd-palette".into(),
            commits: 8,
            last_commit_message: Some("fix: z-index issues on modal".into()),
            last_commit_hash: Some("e5f6g7h".into()),
            repo: "taskflow-web".into(),
        })
        .with_created_at(now),
        Task::new(
            "TASK-103",
            "Setup SQLite Database",
            TaskStatus::Done,
            Priority::High,
        )
        .with_tags(["database", "infra"])
        .with_git(GitMetadata {
            branch_name: "chore/db-setup".into(),
            commits: 4,
            last_commit_message: Some("chore: initial migration".into()),
            last_commit_hash: Some("9i8j7k6".into()),
            repo: "taskflow-core".into(),
        })
        .with_created_at(now - Duration::days(1)),
        Task::new(
            "TASK-104",
            "Optimize Git Sync Polling",
            TaskStatus::Todo,
            Priority::Low,
        )
        .with_tags(["performance", "worker"])
        .with_git(GitMetadata::new("refactor/sync-engine", "taskflow-worker"))
        .with_created_at(now),
    ]
}

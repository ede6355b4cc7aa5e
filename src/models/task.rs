//! Task model: the unit of work shown on the board.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board column a task sits in.
///
/// Transitions are unrestricted: any status is reachable from any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Waiting on code review.
    Review,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Wire form (`in-progress`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Column header shown on the board.
    #[must_use]
    pub fn column_label(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN PROGRESS",
            Self::Review => "CODE REVIEW",
            Self::Done => "DONE",
        }
    }

    /// Toast glyph used when a task is dropped into this column.
    #[must_use]
    pub fn move_glyph(self) -> &'static str {
        match self {
            Self::Done => "✅",
            Self::InProgress => "🔄",
            Self::Todo | Self::Review => "📋",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Fixed at creation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must land this sprint.
    High,
    /// Default priority.
    #[default]
    Medium,
    /// Nice to have.
    Low,
}

impl Priority {
    /// Every priority, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work picked in the creation form; becomes the task's tag.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// New functionality.
    #[default]
    Feature,
    /// Defect fix.
    Bug,
    /// Chore or general task.
    Task,
    /// Umbrella for several tasks.
    Epic,
}

impl TaskType {
    /// Tag label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Task => "task",
            Self::Epic => "epic",
        }
    }
}

/// Git activity attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GitMetadata {
    /// Working branch.
    pub branch_name: String,
    /// Commit count on the branch.
    pub commits: u32,
    /// Subject of the latest commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit_message: Option<String>,
    /// Abbreviated hash of the latest commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit_hash: Option<String>,
    /// Repository name.
    pub repo: String,
}

impl GitMetadata {
    /// Fresh branch metadata with no commits yet.
    #[must_use]
    pub fn new(branch_name: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            branch_name: branch_name.into(),
            commits: 0,
            last_commit_message: None,
            last_commit_hash: None,
            repo: repo.into(),
        }
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier, never reused.
    pub id: String,
    /// Display title; non-empty.
    pub title: String,
    /// Longer free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current column.
    pub status: TaskStatus,
    /// Priority fixed at creation.
    pub priority: Priority,
    /// Short labels; order is display order only.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached git activity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitMetadata>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Construct a task created now, without tags or git metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: TaskStatus,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status,
            priority,
            tags: Vec::new(),
            git: None,
            created_at: Utc::now(),
        }
    }

    /// Replace the tag set. Duplicate labels collapse to their first
    /// occurrence.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Attach git metadata.
    #[must_use]
    pub fn with_git(mut self, git: GitMetadata) -> Self {
        self.git = Some(git);
        self
    }

    /// Set the creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Commit count, zero when no git metadata is attached.
    #[must_use]
    pub fn commits(&self) -> u32 {
        self.git.as_ref().map_or(0, |git| git.commits)
    }

    /// Whether the task carries a tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

//! Presentation state the core tracks on behalf of the board front-end.

use serde::{Deserialize, Serialize};

use super::task::{Priority, Task};

/// Main page shown by the shell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Kanban columns.
    #[default]
    Kanban,
    /// Derived statistics and charts.
    Dashboard,
}

/// Layout variant of the kanban page. Only [`BoardLayout::Board`] renders;
/// the others are announced as upcoming.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoardLayout {
    /// Column board.
    #[default]
    Board,
    /// Flat list.
    List,
    /// Calendar by due date.
    Calendar,
}

impl BoardLayout {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Board => "Board",
            Self::List => "List",
            Self::Calendar => "Calendar",
        }
    }
}

/// Column filter applied to the kanban view.
///
/// An empty filter lets every task through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardFilter {
    /// Keep only tasks with this priority.
    pub priority: Option<Priority>,
    /// Keep only tasks carrying this tag.
    pub tag: Option<String>,
}

impl BoardFilter {
    /// Filter on a single priority.
    #[must_use]
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            tag: None,
        }
    }

    /// Whether no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.tag.is_none()
    }

    /// Whether `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.is_none_or(|p| task.priority == p)
            && self.tag.as_deref().is_none_or(|tag| task.has_tag(tag))
    }
}

//! Static command registry.
//!
//! Commands are built once per session by [`CommandRegistry::standard`].
//! Their effects capture the capabilities handed over in a
//! [`CommandContext`]; the registry owns none of them.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::info;

use crate::board::{FormOpener, ViewState};
use crate::models::{BoardFilter, NotificationKind, Priority, TaskStatus, View};
use crate::notify::Notifier;
use crate::store::TaskStore;
use crate::sync::GitSync;

/// Zero-argument side effect run when a command is executed.
pub type Effect = Arc<dyn Fn() + Send + Sync>;

/// Section label for task creation and sync actions.
pub const SECTION_ACTIONS: &str = "Actions";
/// Section label for view switches.
pub const SECTION_NAVIGATION: &str = "Navigation";
/// Section label for board filters.
pub const SECTION_FILTERS: &str = "Filters";
/// Section label for sprint reporting.
pub const SECTION_SPRINT: &str = "Sprint";

/// Name of the sprint the board tracks.
pub const SPRINT_NAME: &str = "Sprint 1 — MVP Core";

/// A named, invocable action.
#[derive(Clone)]
pub struct Command {
    /// Unique key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Secondary display text, also searched.
    pub hint: &'static str,
    /// Grouping label.
    pub section: &'static str,
    /// Display-only keyboard hint.
    pub shortcut: Option<&'static str>,
    effect: Effect,
}

impl Debug for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Construct a command.
    pub fn new<F>(
        id: &'static str,
        name: &'static str,
        hint: &'static str,
        section: &'static str,
        shortcut: Option<&'static str>,
        effect: F,
    ) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id,
            name,
            hint,
            section,
            shortcut,
            effect: Arc::new(effect),
        }
    }

    /// Run the effect. Failures are the effect's own concern.
    pub fn execute(&self) {
        info!(command = self.id, "execute command");
        (self.effect)();
    }

    /// Case-insensitive substring match on name or hint. `needle` must
    /// already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.hint.to_lowercase().contains(needle)
    }
}

/// Capabilities command effects may use.
#[derive(Clone)]
pub struct CommandContext {
    /// Task list, read by reporting commands.
    pub store: Arc<TaskStore>,
    /// View switching and board filters.
    pub view: ViewState,
    /// Opens the task creation form.
    pub forms: Arc<dyn FormOpener>,
    /// Simulated git sync.
    pub sync: GitSync,
    /// User notifications.
    pub notifier: Notifier,
}

/// Ordered, immutable list of commands.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Registry over an explicit command list, kept in the given order.
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// The board's command set.
    #[must_use]
    pub fn standard(ctx: &CommandContext) -> Self {
        let forms = Arc::clone(&ctx.forms);
        let sync = ctx.sync.clone();
        let to_board = ctx.view.clone();
        let to_dashboard = ctx.view.clone();
        let filter_high = ctx.view.clone();
        let filter_clear = ctx.view.clone();
        let store = Arc::clone(&ctx.store);
        let notifier = ctx.notifier.clone();

        Self::new(vec![
            Command::new(
                "cmd-new",
                "Create New Task",
                "Open the creation form in TODO",
                SECTION_ACTIONS,
                Some("N"),
                move || forms.open_creation_form(TaskStatus::Todo),
            ),
            Command::new(
                "cmd-sync",
                "Trigger Git Sync",
                "Pull branch activity from remotes",
                SECTION_ACTIONS,
                Some("⇧S"),
                move || sync.trigger(),
            ),
            Command::new(
                "cmd-board",
                "Go to Board",
                "Kanban columns",
                SECTION_NAVIGATION,
                None,
                move || to_board.set_view(View::Kanban),
            ),
            Command::new(
                "cmd-dash",
                "Go to Dashboard",
                "Commit activity and stats",
                SECTION_NAVIGATION,
                None,
                move || to_dashboard.set_view(View::Dashboard),
            ),
            Command::new(
                "cmd-filter-high",
                "Filter: High Priority",
                "Only show high priority tasks",
                SECTION_FILTERS,
                None,
                move || filter_high.set_filter(BoardFilter::priority(Priority::High)),
            ),
            Command::new(
                "cmd-filter-clear",
                "Clear Filters",
                "Show every task",
                SECTION_FILTERS,
                None,
                move || filter_clear.set_filter(BoardFilter::default()),
            ),
            Command::new(
                "cmd-sprint",
                "Sprint Summary",
                "Announce progress of the current sprint",
                SECTION_SPRINT,
                None,
                move || {
                    let tasks = store.snapshot();
                    let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
                    notifier.notify(
                        format!("{SPRINT_NAME}: {done}/{} tasks done", tasks.len()),
                        NotificationKind::Info,
                    );
                },
            ),
        ])
    }

    /// Commands in registry order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up a command by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

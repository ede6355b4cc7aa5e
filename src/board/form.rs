//! Task creation form with AI assist.
//!
//! The AI call is the one asynchronous boundary of the board. A response is
//! only applied to the latest request of the form session that asked for it:
//! every open and close advances the form generation, every request advances
//! the request counter, and [`CreationForm::complete_assist`] drops outcomes
//! whose ticket matches neither. A late suggestion therefore never leaks into
//! a task created after the requesting form was closed, nor overrides the
//! answer to a newer request for a retyped title.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Days, NaiveDate, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ai::{PlanningResult, TaskPlanner};
use crate::config::BoardConfig;
use crate::models::{GitMetadata, NotificationKind, Priority, Task, TaskStatus, TaskType};
use crate::notify::Notifier;
use crate::store::TaskStore;
use crate::Result;

/// Days between today and the default due date.
const DEFAULT_DUE_DAYS: u64 = 7;

/// Random id attempts before falling back to a uuid suffix.
const ID_ATTEMPTS: usize = 32;

/// Capability to open the creation form, handed to commands and key
/// handlers.
pub trait FormOpener: Send + Sync {
    /// Open the form with `column` preselected.
    fn open_creation_form(&self, column: TaskStatus);
}

/// Field values of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Kind of work, stored as the task's tag.
    pub task_type: TaskType,
    /// Priority.
    pub priority: Priority,
    /// Target column.
    pub column: TaskStatus,
    /// Due date; display only.
    pub due: NaiveDate,
}

impl TaskDraft {
    /// Empty draft targeting `column`, due a week from today.
    #[must_use]
    pub fn new(column: TaskStatus) -> Self {
        let today = Utc::now().date_naive();
        Self {
            title: String::new(),
            task_type: TaskType::default(),
            priority: Priority::default(),
            column,
            due: today
                .checked_add_days(Days::new(DEFAULT_DUE_DAYS))
                .unwrap_or(today),
        }
    }
}

/// State of the suggestion panel.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistState {
    /// No suggestion requested.
    Idle,
    /// Waiting on the planner.
    Loading,
    /// Suggestion available.
    Ready(PlanningResult),
    /// Planner failed; the panel stays empty. Carries the reason for logs.
    Unavailable(String),
}

/// Proof of which form session requested a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistTicket {
    generation: u64,
    request: u64,
}

#[derive(Debug)]
struct FormState {
    open: bool,
    generation: u64,
    request: u64,
    draft: TaskDraft,
    assist: AssistState,
}

/// Shared handle to the creation form. Cheap to clone.
#[derive(Clone)]
pub struct CreationForm {
    state: Arc<Mutex<FormState>>,
    store: Arc<TaskStore>,
    planner: Arc<dyn TaskPlanner>,
    notifier: Notifier,
    config: BoardConfig,
}

impl std::fmt::Debug for CreationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreationForm")
            .field("state", &self.state)
            .field("planner", &self.planner.name())
            .finish_non_exhaustive()
    }
}

impl CreationForm {
    /// Create a closed form.
    #[must_use]
    pub fn new(
        store: Arc<TaskStore>,
        planner: Arc<dyn TaskPlanner>,
        notifier: Notifier,
        config: BoardConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState {
                open: false,
                generation: 0,
                request: 0,
                draft: TaskDraft::new(TaskStatus::Todo),
                assist: AssistState::Idle,
            })),
            store,
            planner,
            notifier,
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open with a fresh draft targeting `column`.
    pub fn open(&self, column: TaskStatus) {
        let mut state = self.lock();
        state.open = true;
        state.generation += 1;
        state.draft = TaskDraft::new(column);
        state.assist = AssistState::Idle;
        debug!(generation = state.generation, %column, "creation form opened");
    }

    /// Close and discard the draft. In-flight suggestions become stale.
    pub fn close(&self) {
        let mut state = self.lock();
        state.open = false;
        state.generation += 1;
        state.assist = AssistState::Idle;
        debug!(generation = state.generation, "creation form closed");
    }

    /// Whether the form is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    /// Copy of the current draft.
    #[must_use]
    pub fn draft(&self) -> TaskDraft {
        self.lock().draft.clone()
    }

    /// Copy of the suggestion panel state.
    #[must_use]
    pub fn assist(&self) -> AssistState {
        self.lock().assist.clone()
    }

    /// Apply `edit` to the draft.
    pub fn edit<F>(&self, edit: F)
    where
        F: FnOnce(&mut TaskDraft),
    {
        edit(&mut self.lock().draft);
    }

    /// Set the title.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit(|draft| draft.title = title);
    }

    /// Mark the panel as loading and hand out a ticket for the current
    /// session, together with the title to plan.
    ///
    /// Earlier tickets of the same session are superseded. Returns `None`
    /// when the form is closed or the title is empty.
    pub fn begin_assist(&self) -> Option<(AssistTicket, String)> {
        let mut state = self.lock();
        let title = state.draft.title.trim().to_owned();
        if !state.open || title.is_empty() {
            return None;
        }
        state.request += 1;
        state.assist = AssistState::Loading;
        Some((
            AssistTicket {
                generation: state.generation,
                request: state.request,
            },
            title,
        ))
    }

    /// Apply a planner outcome if `ticket` still belongs to the open form.
    ///
    /// Returns whether the outcome was applied.
    pub fn complete_assist(&self, ticket: AssistTicket, outcome: Result<PlanningResult>) -> bool {
        let mut state = self.lock();
        if !state.open || state.generation != ticket.generation || state.request != ticket.request
        {
            debug!(
                ticket = ticket.generation,
                current = state.generation,
                ticket_request = ticket.request,
                current_request = state.request,
                "discarding stale ai suggestion"
            );
            return false;
        }

        state.assist = match outcome {
            Ok(plan) => {
                info!(branch = %plan.branch_name_suggestion, "ai suggestion applied");
                AssistState::Ready(plan)
            }
            Err(err) => {
                warn!(%err, planner = self.planner.name(), "ai assist unavailable");
                AssistState::Unavailable(err.to_string())
            }
        };
        true
    }

    /// Ask the planner for a suggestion in the background.
    ///
    /// Returns the spawned task, or `None` when there is nothing to plan or
    /// no tokio runtime to run on.
    pub fn request_assist(&self) -> Option<JoinHandle<()>> {
        let (ticket, title) = self.begin_assist()?;

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.complete_assist(
                ticket,
                Err(crate::AppError::Ai("no async runtime for ai assist".into())),
            );
            return None;
        };

        let form = self.clone();
        let plan = self.planner.plan(&title);
        Some(handle.spawn(async move {
            let outcome = plan.await;
            form.complete_assist(ticket, outcome);
        }))
    }

    /// Create the task from the draft and close the form.
    ///
    /// Returns `None` (leaving the form open) when the title is empty.
    pub fn submit(&self) -> Option<Task> {
        let task = {
            let state = self.lock();
            if !state.open {
                return None;
            }
            let title = state.draft.title.trim();
            if title.is_empty() {
                return None;
            }

            let git = match &state.assist {
                AssistState::Ready(plan) => Some(GitMetadata::new(
                    plan.branch_name_suggestion.clone(),
                    self.config.default_repo.clone(),
                )),
                _ => None,
            };

            let mut task = Task::new(
                self.next_id(),
                title,
                state.draft.column,
                state.draft.priority,
            )
            .with_tags([state.draft.task_type.as_str()]);
            task.git = git;
            task
        };

        self.close();
        self.store.add_task(task.clone());
        info!(task_id = %task.id, "task created");

        self.notifier.notify(
            format!("✦ {} created — \"{}\"", task.id, task.title),
            NotificationKind::Success,
        );
        self.notifier.notify_after(
            self.config.hint_delay(),
            "⎇ Run: tf task start to auto-create branch",
            NotificationKind::Git,
        );
        Some(task)
    }

    /// `PREFIX-####` id not present in the store.
    fn next_id(&self) -> String {
        let prefix = &self.config.id_prefix;
        for _ in 0..ID_ATTEMPTS {
            let n = 1000 + Uuid::new_v4().as_u128() % 9000;
            let id = format!("{prefix}-{n}");
            if !self.store.contains(&id) {
                return id;
            }
        }
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }
}

impl FormOpener for CreationForm {
    fn open_creation_form(&self, column: TaskStatus) {
        self.open(column);
    }
}

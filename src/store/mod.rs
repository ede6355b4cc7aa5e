//! In-memory task store.
//!
//! The store exclusively owns the task list. Readers take an immutable
//! [`TaskSnapshot`]; every mutation builds a new list and swaps it in, so a
//! reader never observes a partially applied change. Subscribers are invoked
//! synchronously after each mutation call, in subscription order, with the
//! freshly published snapshot.

pub mod seed;
pub mod stats;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::models::{BoardFilter, Task, TaskStatus};

/// Immutable view of the task list at one point in time.
pub type TaskSnapshot = Arc<[Task]>;

/// Callback invoked with the new snapshot after every mutation.
pub type Subscriber = Arc<dyn Fn(&TaskSnapshot) + Send + Sync>;

/// Handle returned by [`TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Tasks of one board column, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column status.
    pub status: TaskStatus,
    /// Tasks currently in the column.
    pub tasks: Vec<Task>,
}

/// Mutable task list with change notification.
pub struct TaskStore {
    tasks: RwLock<TaskSnapshot>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.snapshot().len())
            .finish_non_exhaustive()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaskStore {
    /// Create a store holding `tasks` in the given order.
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks.into()),
            subscribers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Create a store seeded with the demo board.
    #[must_use]
    pub fn with_demo_data() -> Self {
        Self::new(seed::demo_tasks())
    }

    /// Current snapshot of the task list.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        Arc::clone(&self.tasks.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// First task with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Task> {
        self.snapshot().iter().find(|t| t.id == id).cloned()
    }

    /// Whether any task carries `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.snapshot().iter().any(|t| t.id == id)
    }

    /// Append a task.
    ///
    /// Id uniqueness is the caller's precondition: a colliding id is not
    /// rejected and both tasks stay in insertion order.
    pub fn add_task(&self, task: Task) {
        debug!(task_id = %task.id, status = %task.status, "add task");
        self.mutate(|tasks| {
            let mut next = tasks.to_vec();
            next.push(task);
            (next, true)
        });
    }

    /// Replace the status of the task matching `id`.
    ///
    /// Returns `false` (and changes nothing) when `id` is unknown.
    pub fn update_status(&self, id: &str, status: TaskStatus) -> bool {
        let applied = self.mutate(|tasks| {
            let mut found = false;
            let next: Vec<Task> = tasks
                .iter()
                .map(|t| {
                    if t.id == id {
                        found = true;
                        Task {
                            status,
                            ..t.clone()
                        }
                    } else {
                        t.clone()
                    }
                })
                .collect();
            (next, found)
        });
        debug!(task_id = id, %status, applied, "update task status");
        applied
    }

    /// Remove the task matching `id`.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn delete_task(&self, id: &str) -> bool {
        let applied = self.mutate(|tasks| {
            let next: Vec<Task> = tasks.iter().filter(|t| t.id != id).cloned().collect();
            let removed = next.len() != tasks.len();
            (next, removed)
        });
        debug!(task_id = id, applied, "delete task");
        applied
    }

    /// Merge commit count and last commit message into the task's git
    /// metadata.
    ///
    /// Tasks without git metadata are left untouched; returns whether any
    /// task was updated.
    pub fn update_git_info(&self, id: &str, commits: u32, last_message: &str) -> bool {
        let applied = self.mutate(|tasks| {
            let mut updated = false;
            let next: Vec<Task> = tasks
                .iter()
                .map(|t| match &t.git {
                    Some(git) if t.id == id => {
                        updated = true;
                        let mut git = git.clone();
                        git.commits = commits;
                        git.last_commit_message = Some(last_message.to_owned());
                        Task {
                            git: Some(git),
                            ..t.clone()
                        }
                    }
                    _ => t.clone(),
                })
                .collect();
            (next, updated)
        });
        debug!(task_id = id, commits, applied, "update git info");
        applied
    }

    /// Group the snapshot by column, in board column order.
    #[must_use]
    pub fn columns(&self, filter: &BoardFilter) -> Vec<Column> {
        let snapshot = self.snapshot();
        TaskStatus::ALL
            .iter()
            .map(|&status| Column {
                status,
                tasks: snapshot
                    .iter()
                    .filter(|t| t.status == status && filter.matches(t))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Register a change callback.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&TaskSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a change callback. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(sid, _)| *sid != id);
    }

    /// Build the next list from the current one, publish it, and notify
    /// subscribers. Callbacks run on a copy of the subscriber list with no
    /// lock held, so a subscriber may read the store or (un)subscribe.
    fn mutate<F>(&self, build: F) -> bool
    where
        F: FnOnce(&[Task]) -> (Vec<Task>, bool),
    {
        let (published, applied) = {
            let mut guard = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
            let (next, applied) = build(&guard);
            let next: TaskSnapshot = next.into();
            *guard = Arc::clone(&next);
            (next, applied)
        };

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(&published);
        }
        applied
    }
}

//! The owning context of a board session.
//!
//! [`Shell`] builds every component once, hands each one the capabilities
//! it needs, and keeps the notification feed and input dispatcher. The
//! presentation layer talks to the board exclusively through it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::ai::{planner_from_config, TaskPlanner};
use crate::board::{Board, CreationForm, FormOpener, ViewState};
use crate::config::GlobalConfig;
use crate::input::{FocusState, InputDispatcher, Intent, KeyEvent};
use crate::models::{Notification, Task, TaskStatus, View};
use crate::notify::{self, NotificationFeed, Notifier};
use crate::palette::{
    resolve, CommandContext, CommandRegistry, FuzzyMatcher, PaletteSession, ResolvedEntry,
};
use crate::store::stats::BoardStats;
use crate::store::{SubscriptionId, TaskSnapshot, TaskStore};
use crate::sync::GitSync;
use crate::Result;

/// The palette session plus a flag raised whenever the store changes.
///
/// Locking re-resolves a stale session first, so entries never outlive the
/// tasks they were resolved from.
#[derive(Debug)]
struct SharedPalette {
    session: Mutex<PaletteSession>,
    stale: AtomicBool,
}

impl SharedPalette {
    fn lock(&self) -> MutexGuard<'_, PaletteSession> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if self.stale.swap(false, Ordering::AcqRel) {
            session.refresh();
        }
        session
    }
}

/// A running board session.
pub struct Shell {
    store: Arc<TaskStore>,
    view: ViewState,
    board: Board,
    form: CreationForm,
    sync: GitSync,
    registry: Arc<CommandRegistry>,
    matcher: FuzzyMatcher,
    palette: Arc<SharedPalette>,
    palette_subscription: SubscriptionId,
    dispatcher: InputDispatcher,
    notifier: Notifier,
    feed: NotificationFeed,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("store", &self.store)
            .field("view", &self.view.view())
            .field("commands", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Build a session from configuration, choosing the planner from the AI
    /// settings. Seeds the demo board when `board.seed_demo_data` is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Ai` if the remote planner cannot be constructed.
    pub fn from_config(config: &GlobalConfig) -> Result<Self> {
        let planner = planner_from_config(&config.ai)?;
        let store = if config.board.seed_demo_data {
            TaskStore::with_demo_data()
        } else {
            TaskStore::default()
        };
        Ok(Self::new(config, Arc::new(store), planner))
    }

    /// Build a session over an existing store and planner.
    #[must_use]
    pub fn new(config: &GlobalConfig, store: Arc<TaskStore>, planner: Arc<dyn TaskPlanner>) -> Self {
        let cancel = CancellationToken::new();
        let (notifier, feed) = notify::channel(cancel.clone());
        let view = ViewState::default();

        let board = Board::new(
            Arc::clone(&store),
            view.clone(),
            notifier.clone(),
            config.sync.auto_close_delay(),
        );
        let form = CreationForm::new(
            Arc::clone(&store),
            planner,
            notifier.clone(),
            config.board.clone(),
        );
        let sync = GitSync::new(
            Arc::clone(&store),
            notifier.clone(),
            config.sync.delay(),
            cancel.clone(),
        );

        let registry = Arc::new(CommandRegistry::standard(&CommandContext {
            store: Arc::clone(&store),
            view: view.clone(),
            forms: Arc::new(form.clone()),
            sync: sync.clone(),
            notifier: notifier.clone(),
        }));

        let matcher = FuzzyMatcher::new(config.palette.fuzzy_threshold);
        let palette = Arc::new(SharedPalette {
            session: Mutex::new(PaletteSession::new(
                Arc::clone(&store),
                Arc::clone(&registry),
                matcher,
                notifier.clone(),
            )),
            stale: AtomicBool::new(false),
        });
        let watched = Arc::downgrade(&palette);
        let palette_subscription = store.subscribe(move |_| {
            if let Some(palette) = watched.upgrade() {
                palette.stale.store(true, Ordering::Release);
            }
        });

        let dispatcher = build_dispatcher(&palette, &form, &sync);

        info!(
            tasks = store.snapshot().len(),
            commands = registry.len(),
            "board session ready"
        );

        Self {
            store,
            view,
            board,
            form,
            sync,
            registry,
            matcher,
            palette,
            palette_subscription,
            dispatcher,
            notifier,
            feed,
            cancel,
        }
    }

    // ── Presentation boundary: reads ────────────────────────

    /// Current task list.
    #[must_use]
    pub fn tasks(&self) -> TaskSnapshot {
        self.store.snapshot()
    }

    /// Dashboard statistics of the current task list.
    #[must_use]
    pub fn stats(&self) -> BoardStats {
        BoardStats::from_tasks(&self.store.snapshot())
    }

    /// Shared store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    /// Current page.
    #[must_use]
    pub fn view(&self) -> View {
        self.view.view()
    }

    /// View switcher and filter state.
    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Kanban interactions.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Creation form handle.
    #[must_use]
    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    /// Simulated git sync handle.
    #[must_use]
    pub fn git_sync(&self) -> &GitSync {
        &self.sync
    }

    /// Command registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Notifier for host-side messages.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // ── Presentation boundary: store mutations ──────────────

    /// Append a task. Id uniqueness is the caller's precondition.
    pub fn add_task(&self, task: Task) {
        self.store.add_task(task);
    }

    /// Change a task's status; unknown ids are ignored.
    pub fn update_status(&self, id: &str, status: TaskStatus) -> bool {
        self.store.update_status(id, status)
    }

    /// Delete a task; unknown ids are ignored.
    pub fn delete_task(&self, id: &str) -> bool {
        self.store.delete_task(id)
    }

    /// Merge git activity into a task that already tracks a branch.
    pub fn update_git_info(&self, id: &str, commits: u32, last_message: &str) -> bool {
        self.store.update_git_info(id, commits, last_message)
    }

    // ── Palette ─────────────────────────────────────────────

    /// Resolve a palette query against the current tasks.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Vec<ResolvedEntry> {
        resolve(query, &self.store.snapshot(), &self.registry, &self.matcher)
    }

    /// Lock the palette session, re-resolved if the store changed since
    /// the last lock.
    pub fn palette(&self) -> MutexGuard<'_, PaletteSession> {
        self.palette.lock()
    }

    /// Open the creation form targeting `column`.
    pub fn open_creation_form(&self, column: TaskStatus) {
        self.form.open_creation_form(column);
    }

    // ── Input and notifications ─────────────────────────────

    /// Route a key press through the input dispatcher.
    pub fn handle_key(&self, event: &KeyEvent, input_focused: bool) -> Option<Intent> {
        let focus = FocusState {
            input_focused,
            palette_open: self.palette().is_open(),
            form_open: self.form.is_open(),
        };
        self.dispatcher.dispatch(event, focus)
    }

    /// Take every queued notification.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.feed.drain()
    }

    /// Wait for the next notification.
    pub async fn next_notification(&mut self) -> Option<Notification> {
        self.feed.recv().await
    }

    /// Cancel pending timers (delayed toasts, running syncs).
    pub fn shutdown(&self) {
        info!("board session shutting down");
        self.cancel.cancel();
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.store.unsubscribe(self.palette_subscription);
        self.cancel.cancel();
    }
}

fn build_dispatcher(
    palette: &Arc<SharedPalette>,
    form: &CreationForm,
    sync: &GitSync,
) -> InputDispatcher {
    let lock = |palette: &Arc<SharedPalette>| {
        let palette = Arc::clone(palette);
        move |apply: fn(&mut PaletteSession)| {
            apply(&mut palette.lock());
        }
    };

    let mut dispatcher = InputDispatcher::new();

    let toggle = lock(palette);
    dispatcher.register(Intent::TogglePalette, move || toggle(PaletteSession::toggle));
    let close = lock(palette);
    dispatcher.register(Intent::ClosePalette, move || close(PaletteSession::close));
    let next = lock(palette);
    dispatcher.register(Intent::PaletteNext, move || next(PaletteSession::move_down));
    let previous = lock(palette);
    dispatcher.register(Intent::PalettePrevious, move || {
        previous(PaletteSession::move_up);
    });
    let execute = lock(palette);
    dispatcher.register(Intent::PaletteExecute, move || {
        execute(|session| {
            session.execute();
        });
    });

    let new_task = form.clone();
    dispatcher.register(Intent::NewTask, move || new_task.open(TaskStatus::Todo));
    let close_form = form.clone();
    dispatcher.register(Intent::CloseForm, move || close_form.close());
    let submit = form.clone();
    dispatcher.register(Intent::SubmitForm, move || {
        submit.submit();
    });

    let sync = sync.clone();
    dispatcher.register(Intent::TriggerSync, move || sync.trigger());

    dispatcher
}

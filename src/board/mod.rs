//! Board interactions: view state, drag-and-drop moves, and the creation
//! form.

pub mod form;

pub use form::{AssistState, AssistTicket, CreationForm, FormOpener, TaskDraft};

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::{debug, info};

use crate::models::{BoardFilter, BoardLayout, NotificationKind, TaskStatus, View};
use crate::notify::Notifier;
use crate::store::{Column, TaskStore};

#[derive(Debug, Default)]
struct ViewInner {
    view: View,
    layout: BoardLayout,
    filter: BoardFilter,
}

/// Shared view switcher and filter holder. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    inner: Arc<RwLock<ViewInner>>,
}

impl ViewState {
    /// Current page.
    #[must_use]
    pub fn view(&self) -> View {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).view
    }

    /// Switch page.
    pub fn set_view(&self, view: View) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).view = view;
        info!(?view, "view switched");
    }

    /// Current board layout.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).layout
    }

    /// Active column filter.
    #[must_use]
    pub fn filter(&self) -> BoardFilter {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .filter
            .clone()
    }

    /// Replace the column filter.
    pub fn set_filter(&self, filter: BoardFilter) {
        debug!(?filter, "board filter set");
        self.inner.write().unwrap_or_else(PoisonError::into_inner).filter = filter;
    }

    fn set_layout(&self, layout: BoardLayout) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).layout = layout;
    }
}

/// Kanban interactions over the store.
#[derive(Debug, Clone)]
pub struct Board {
    store: Arc<TaskStore>,
    view: ViewState,
    notifier: Notifier,
    auto_close_delay: Duration,
}

impl Board {
    /// Create the board.
    #[must_use]
    pub fn new(
        store: Arc<TaskStore>,
        view: ViewState,
        notifier: Notifier,
        auto_close_delay: Duration,
    ) -> Self {
        Self {
            store,
            view,
            notifier,
            auto_close_delay,
        }
    }

    /// Columns with the active filter applied.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        self.store.columns(&self.view.filter())
    }

    /// Drop `task_id` onto `column`.
    ///
    /// Unknown ids and drops onto the task's current column do nothing and
    /// return `false`.
    pub fn move_task(&self, task_id: &str, column: TaskStatus) -> bool {
        let Some(task) = self.store.get(task_id) else {
            debug!(task_id, "drop of unknown task ignored");
            return false;
        };
        if task.status == column {
            return false;
        }

        self.store.update_status(task_id, column);
        self.notifier.notify(
            format!(
                "{} {} → {}",
                column.move_glyph(),
                task.id,
                column.column_label()
            ),
            NotificationKind::Info,
        );
        if column == TaskStatus::Done {
            self.notifier.notify_after(
                self.auto_close_delay,
                format!("⚡ Git Sync: {} auto-closing PR…", task.id),
                NotificationKind::Git,
            );
        }
        true
    }

    /// Switch the board layout. Only the column board exists yet; other
    /// layouts announce themselves and leave the layout unchanged.
    pub fn switch_layout(&self, layout: BoardLayout) {
        if layout == BoardLayout::Board {
            self.view.set_layout(layout);
        } else {
            self.notifier.notify(
                format!("📅 {} view — coming in v1.1", layout.label()),
                NotificationKind::Info,
            );
        }
    }
}

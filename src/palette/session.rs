//! Palette selection state: query, cursor, and execution.

use std::sync::Arc;

use tracing::{debug, info};

use super::fuzzy::FuzzyMatcher;
use super::registry::CommandRegistry;
use super::resolver::{resolve, sections, ResolvedEntry, Section};
use crate::models::NotificationKind;
use crate::notify::Notifier;
use crate::store::TaskStore;

/// What [`PaletteSession::execute`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// Nothing to execute: the result list was empty.
    Nothing,
    /// A task entry was selected; carries the task id.
    NavigatedToTask(String),
    /// A command ran; carries the command id.
    RanCommand(&'static str),
}

/// One palette interaction: open, type, move, execute.
///
/// The cursor indexes the flat entry list and is clamped at both ends.
#[derive(Debug)]
pub struct PaletteSession {
    store: Arc<TaskStore>,
    registry: Arc<CommandRegistry>,
    matcher: FuzzyMatcher,
    notifier: Notifier,
    open: bool,
    query: String,
    cursor: usize,
    entries: Vec<ResolvedEntry>,
}

impl PaletteSession {
    /// Create a closed session.
    #[must_use]
    pub fn new(
        store: Arc<TaskStore>,
        registry: Arc<CommandRegistry>,
        matcher: FuzzyMatcher,
        notifier: Notifier,
    ) -> Self {
        let mut session = Self {
            store,
            registry,
            matcher,
            notifier,
            open: false,
            query: String::new(),
            cursor: 0,
            entries: Vec::new(),
        };
        session.refresh();
        session
    }

    /// Whether the palette is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the palette with an empty query.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.cursor = 0;
        self.refresh();
        debug!("palette opened");
    }

    /// Hide the palette.
    pub fn close(&mut self) {
        self.open = false;
        debug!("palette closed");
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query, re-resolve, and move the cursor back to the top.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
        self.refresh();
    }

    /// Re-resolve against the current store snapshot, keeping the cursor
    /// within bounds.
    pub fn refresh(&mut self) {
        let tasks = self.store.snapshot();
        self.entries = resolve(&self.query, &tasks, &self.registry, &self.matcher);
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }

    /// Flat entry list.
    #[must_use]
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Entries grouped for display.
    #[must_use]
    pub fn sections(&self) -> Vec<Section<'_>> {
        sections(&self.entries)
    }

    /// Cursor position in the flat list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&ResolvedEntry> {
        self.entries.get(self.cursor)
    }

    /// Advance the cursor, stopping at the last entry.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Retreat the cursor, stopping at the first entry.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Point the cursor at `index` (pointer hover), clamped to the list.
    pub fn select(&mut self, index: usize) {
        self.cursor = index.min(self.entries.len().saturating_sub(1));
    }

    /// Execute the entry under the cursor and close the palette.
    ///
    /// Does nothing on an empty result list.
    pub fn execute(&mut self) -> Execution {
        let Some(entry) = self.entries.get(self.cursor).cloned() else {
            return Execution::Nothing;
        };
        self.close();
        match entry {
            ResolvedEntry::Task(task) => {
                info!(task_id = %task.id, "navigate to task");
                self.notifier
                    .notify(format!("Navigating to {}", task.id), NotificationKind::Info);
                Execution::NavigatedToTask(task.id)
            }
            ResolvedEntry::Command(command) => {
                command.execute();
                Execution::RanCommand(command.id)
            }
        }
    }
}

//! Ranked result composition for the command palette.
//!
//! [`resolve`] is pure: it reads the task list and the registry and returns
//! the flat, ordered entry list the cursor indexes into. [`sections`] groups
//! that list for display without reordering it.

use tracing::trace;

use super::fuzzy::FuzzyMatcher;
use super::registry::{Command, CommandRegistry};
use crate::models::Task;

/// Leading character that switches the palette into command mode.
pub const COMMAND_PREFIX: char = '>';

/// Section label of matched tasks.
pub const TASKS_SECTION: &str = "Tasks";

/// How a query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode<'q> {
    /// Empty query: every command, registry order.
    Default,
    /// `>` prefix: commands only, filtered by the remaining term.
    Commands(&'q str),
    /// Free text: fuzzy-matched tasks followed by matching commands.
    Mixed(&'q str),
}

impl<'q> QueryMode<'q> {
    /// Classify a raw query.
    #[must_use]
    pub fn parse(query: &'q str) -> Self {
        if let Some(rest) = query.strip_prefix(COMMAND_PREFIX) {
            return Self::Commands(rest.trim());
        }
        let term = query.trim();
        if term.is_empty() {
            Self::Default
        } else {
            Self::Mixed(term)
        }
    }
}

/// A selectable palette entry.
#[derive(Debug, Clone)]
pub enum ResolvedEntry {
    /// A matched task.
    Task(Task),
    /// A matched command.
    Command(Command),
}

impl ResolvedEntry {
    /// Display section this entry belongs to.
    #[must_use]
    pub fn section(&self) -> &'static str {
        match self {
            Self::Task(_) => TASKS_SECTION,
            Self::Command(command) => command.section,
        }
    }

    /// Primary display text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Task(task) => &task.title,
            Self::Command(command) => command.name,
        }
    }

    /// Stable key for the entry (task id or command id).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Task(task) => &task.id,
            Self::Command(command) => command.id,
        }
    }
}

/// A display group of entries. Each item keeps its index in the flat list.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    /// Group label.
    pub name: &'static str,
    /// `(flat index, entry)` pairs, in flat order.
    pub items: Vec<(usize, &'a ResolvedEntry)>,
}

/// Resolve `query` into the ordered palette entries.
#[must_use]
pub fn resolve(
    query: &str,
    tasks: &[Task],
    registry: &CommandRegistry,
    matcher: &FuzzyMatcher,
) -> Vec<ResolvedEntry> {
    let mode = QueryMode::parse(query);
    let entries: Vec<ResolvedEntry> = match mode {
        QueryMode::Default => registry
            .commands()
            .iter()
            .cloned()
            .map(ResolvedEntry::Command)
            .collect(),
        QueryMode::Commands(term) => matching_commands(term, registry).collect(),
        QueryMode::Mixed(term) => matching_tasks(term, tasks, matcher)
            .into_iter()
            .map(ResolvedEntry::Task)
            .chain(matching_commands(term, registry))
            .collect(),
    };
    trace!(?mode, results = entries.len(), "palette resolved");
    entries
}

/// Group entries for display: tasks under [`TASKS_SECTION`], commands under
/// their own section, sections in first-seen order.
#[must_use]
pub fn sections(entries: &[ResolvedEntry]) -> Vec<Section<'_>> {
    let mut out: Vec<Section<'_>> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let name = entry.section();
        match out.iter_mut().find(|s| s.name == name) {
            Some(section) => section.items.push((index, entry)),
            None => out.push(Section {
                name,
                items: vec![(index, entry)],
            }),
        }
    }
    out
}

/// Tasks matching `term` on any searchable field, best score first, ties
/// in list order.
fn matching_tasks(term: &str, tasks: &[Task], matcher: &FuzzyMatcher) -> Vec<Task> {
    let mut scored: Vec<(f64, &Task)> = tasks
        .iter()
        .filter_map(|task| matcher.score_task(term, task).map(|score| (score, task)))
        .collect();
    // sort_by is stable, which keeps list order among equal scores.
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, task)| task.clone()).collect()
}

fn matching_commands<'r>(
    term: &str,
    registry: &'r CommandRegistry,
) -> impl Iterator<Item = ResolvedEntry> + 'r {
    let needle = term.to_lowercase();
    registry
        .commands()
        .iter()
        .filter(move |command| command.matches_lowercase(&needle))
        .cloned()
        .map(ResolvedEntry::Command)
}

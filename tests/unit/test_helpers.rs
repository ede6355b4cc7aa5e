//! Shared construction of registries and sessions for unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskflow::board::{FormOpener, ViewState};
use taskflow::models::{GitMetadata, Priority, Task, TaskStatus};
use taskflow::notify::{self, NotificationFeed};
use taskflow::palette::{CommandContext, CommandRegistry};
use taskflow::store::TaskStore;
use taskflow::sync::GitSync;
use tokio_util::sync::CancellationToken;

/// Form opener that records the requested columns.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<TaskStatus>>,
}

impl FormOpener for RecordingOpener {
    fn open_creation_form(&self, column: TaskStatus) {
        self.opened.lock().unwrap().push(column);
    }
}

/// Everything a command effect can touch, plus handles to observe it.
pub struct Fixture {
    pub store: Arc<TaskStore>,
    pub view: ViewState,
    pub opener: Arc<RecordingOpener>,
    pub ctx: CommandContext,
    pub feed: NotificationFeed,
}

pub fn fixture(tasks: Vec<Task>) -> Fixture {
    let store = Arc::new(TaskStore::new(tasks));
    let cancel = CancellationToken::new();
    let (notifier, feed) = notify::channel(cancel.clone());
    let view = ViewState::default();
    let opener = Arc::new(RecordingOpener::default());
    let sync = GitSync::new(Arc::clone(&store), notifier.clone(), Duration::ZERO, cancel);

    let ctx = CommandContext {
        store: Arc::clone(&store),
        view: view.clone(),
        forms: Arc::clone(&opener) as Arc<dyn FormOpener>,
        sync,
        notifier,
    };

    Fixture {
        store,
        view,
        opener,
        ctx,
        feed,
    }
}

pub fn standard_registry(fixture: &Fixture) -> Arc<CommandRegistry> {
    Arc::new(CommandRegistry::standard(&fixture.ctx))
}

/// Task with tags and a branch.
pub fn task(id: &str, title: &str, tags: &[&str], branch: Option<&str>) -> Task {
    let task = Task::new(id, title, TaskStatus::Todo, Priority::Medium).with_tags(tags.to_vec());
    match branch {
        Some(branch) => task.with_git(GitMetadata::new(branch, "taskflow-web")),
        None => task,
    }
}

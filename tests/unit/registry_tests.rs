use taskflow::models::{BoardFilter, NotificationKind, Priority, TaskStatus, View};
use taskflow::palette::registry::SPRINT_NAME;
use taskflow::palette::{Command, CommandRegistry};
use taskflow::store::seed::demo_tasks;

use super::test_helpers::{fixture, standard_registry};

#[test]
fn standard_registry_order_and_sections() {
    let fx = fixture(demo_tasks());
    let registry = standard_registry(&fx);

    let layout: Vec<(&str, &str)> = registry
        .commands()
        .iter()
        .map(|c| (c.id, c.section))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("cmd-new", "Actions"),
            ("cmd-sync", "Actions"),
            ("cmd-board", "Navigation"),
            ("cmd-dash", "Navigation"),
            ("cmd-filter-high", "Filters"),
            ("cmd-filter-clear", "Filters"),
            ("cmd-sprint", "Sprint"),
        ]
    );
}

#[test]
fn command_ids_are_unique() {
    let fx = fixture(Vec::new());
    let registry = standard_registry(&fx);

    let mut ids: Vec<&str> = registry.commands().iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), registry.len());
}

#[test]
fn new_task_opens_form_in_todo() {
    let fx = fixture(Vec::new());
    let registry = standard_registry(&fx);

    registry.get("cmd-new").expect("cmd-new").execute();
    assert_eq!(*fx.opener.opened.lock().unwrap(), vec![TaskStatus::Todo]);
}

#[test]
fn navigation_commands_switch_view() {
    let fx = fixture(Vec::new());
    let registry = standard_registry(&fx);

    registry.get("cmd-dash").expect("cmd-dash").execute();
    assert_eq!(fx.view.view(), View::Dashboard);
    registry.get("cmd-board").expect("cmd-board").execute();
    assert_eq!(fx.view.view(), View::Kanban);
}

#[test]
fn filter_commands_set_and_clear() {
    let fx = fixture(demo_tasks());
    let registry = standard_registry(&fx);

    registry.get("cmd-filter-high").expect("filter").execute();
    assert_eq!(fx.view.filter(), BoardFilter::priority(Priority::High));
    let visible: usize = fx
        .store
        .columns(&fx.view.filter())
        .iter()
        .map(|c| c.tasks.len())
        .sum();
    assert_eq!(visible, 2);

    registry.get("cmd-filter-clear").expect("clear").execute();
    assert!(fx.view.filter().is_empty());
}

#[test]
fn sync_command_reports_tracked_branches() {
    let mut fx = fixture(demo_tasks());
    let registry = standard_registry(&fx);

    // No runtime: the sync completes inline.
    registry.get("cmd-sync").expect("cmd-sync").execute();

    let messages: Vec<String> = fx.feed.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec!["⟳ Git Sync started", "⚡ Git Sync: 4 branches up to date"]
    );
}

#[test]
fn sprint_summary_counts_done_tasks() {
    let mut fx = fixture(demo_tasks());
    let registry = standard_registry(&fx);

    registry.get("cmd-sprint").expect("cmd-sprint").execute();

    let notes = fx.feed.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, format!("{SPRINT_NAME}: 1/4 tasks done"));
    assert_eq!(notes[0].kind, NotificationKind::Info);
}

#[test]
fn cloned_command_shares_effect() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let command = Command::new("cmd-x", "Count", "Increment", "Actions", None, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let registry = CommandRegistry::new(vec![command.clone()]);
    command.execute();
    registry.commands()[0].execute();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn matches_name_or_hint() {
    let command = Command::new("cmd-x", "Go to Board", "Kanban columns", "Navigation", None, || {});
    assert!(command.matches_lowercase("board"));
    assert!(command.matches_lowercase("kanban"));
    assert!(!command.matches_lowercase("dashboard"));
}

#[test]
fn unknown_command_lookup_is_none() {
    let registry = CommandRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.get("cmd-new").is_none());
}

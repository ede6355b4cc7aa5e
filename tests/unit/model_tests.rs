use taskflow::models::{
    BoardFilter, BoardLayout, GitMetadata, Notification, NotificationKind, Priority, Task,
    TaskStatus, TaskType,
};

#[test]
fn column_labels_and_glyphs() {
    let labels: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.column_label()).collect();
    assert_eq!(labels, vec!["TODO", "IN PROGRESS", "CODE REVIEW", "DONE"]);
    assert_eq!(TaskStatus::Done.move_glyph(), "✅");
    assert_eq!(TaskStatus::InProgress.move_glyph(), "🔄");
    assert_eq!(TaskStatus::Review.move_glyph(), "📋");
}

#[test]
fn status_display_uses_wire_form() {
    assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
    assert_eq!(Priority::High.to_string(), "high");
}

#[test]
fn defaults_match_creation_form() {
    assert_eq!(Priority::default(), Priority::Medium);
    assert_eq!(TaskType::default(), TaskType::Feature);
    assert_eq!(TaskType::Bug.as_str(), "bug");
    assert_eq!(BoardLayout::default(), BoardLayout::Board);
}

#[test]
fn task_deserializes_from_camel_case_json() {
    let raw = r#"{
        "id": "TASK-200",
        "title": "Parse me",
        "status": "in-progress",
        "priority": "low",
        "tags": ["api"],
        "git": { "branchName": "feat/parse", "commits": 2, "repo": "taskflow-api" },
        "createdAt": "2024-05-01T10:00:00Z"
    }"#;

    let task: Task = serde_json::from_str(raw).expect("task parses");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.commits(), 2);
    assert!(task.description.is_none());
    assert!(task.git.and_then(|g| g.last_commit_hash).is_none());
}

#[test]
fn commits_default_to_zero_without_git() {
    let task = Task::new("T-1", "Plain", TaskStatus::Todo, Priority::Low);
    assert_eq!(task.commits(), 0);

    let task = task.with_git(GitMetadata::new("feat/plain", "repo"));
    assert_eq!(task.commits(), 0);
}

#[test]
fn filter_matches_priority_and_tag() {
    let task = Task::new("T-1", "x", TaskStatus::Todo, Priority::High).with_tags(["backend"]);

    assert!(BoardFilter::default().matches(&task));
    assert!(BoardFilter::priority(Priority::High).matches(&task));
    assert!(!BoardFilter::priority(Priority::Low).matches(&task));

    let both = BoardFilter {
        priority: Some(Priority::High),
        tag: Some("frontend".into()),
    };
    assert!(!both.matches(&task));
    assert!(!both.is_empty());
}

#[test]
fn notification_defaults_to_info() {
    assert_eq!(NotificationKind::default(), NotificationKind::Info);
    let note = Notification::new("hello", NotificationKind::Git);
    assert_eq!(note.message, "hello");
    assert_eq!(note.kind, NotificationKind::Git);
}

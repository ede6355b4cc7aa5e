use taskflow::models::{GitMetadata, Priority, Task, TaskStatus};
use taskflow::store::seed::demo_tasks;
use taskflow::store::stats::BoardStats;

#[test]
fn demo_board_statistics() {
    let stats = BoardStats::from_tasks(&demo_tasks());

    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.completion_rate, 25);
    assert_eq!(stats.total_commits, 24);
    assert_eq!(stats.estimated_hours, 36);
    assert_eq!(stats.count(TaskStatus::InProgress), 1);
    assert_eq!(
        stats.by_priority,
        vec![(Priority::High, 2), (Priority::Medium, 1), (Priority::Low, 1)]
    );
}

#[test]
fn empty_board_is_all_zero() {
    let stats = BoardStats::from_tasks(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.estimated_hours, 0);
    assert!(stats.commit_activity.is_empty());
    assert!(stats.git_events.is_empty());
}

#[test]
fn commit_activity_skips_tasks_without_commits() {
    let stats = BoardStats::from_tasks(&demo_tasks());

    let ids: Vec<&str> = stats
        .commit_activity
        .iter()
        .map(|a| a.task_id.as_str())
        .collect();
    assert_eq!(ids, vec!["TASK-101", "TASK-102", "TASK-103"]);
    assert_eq!(stats.commit_activity[0].label, "Implement ...");
    assert_eq!(stats.commit_activity[0].commits, 12);
}

#[test]
fn estimated_hours_floor_odd_commit_totals() {
    let task = Task::new("T-1", "Odd", TaskStatus::Todo, Priority::Low).with_git(GitMetadata {
        commits: 3,
        ..GitMetadata::new("feat/odd", "repo")
    });
    let stats = BoardStats::from_tasks(&[task]);
    assert_eq!(stats.total_commits, 3);
    assert_eq!(stats.estimated_hours, 4);
}

#[test]
fn git_events_are_capped_at_four() {
    let tasks: Vec<Task> = (0..6)
        .map(|n| {
            Task::new(format!("T-{n}"), "Work", TaskStatus::Todo, Priority::Low).with_git(
                GitMetadata {
                    commits: 1,
                    last_commit_message: Some(format!("commit {n}")),
                    ..GitMetadata::new(format!("feat/{n}"), "repo")
                },
            )
        })
        .collect();

    let stats = BoardStats::from_tasks(&tasks);
    assert_eq!(stats.git_events.len(), 4);
    assert_eq!(stats.git_events[0].message.as_deref(), Some("commit 0"));
    assert_eq!(stats.git_events[3].branch_name, "feat/3");
}

#[test]
fn stats_follow_store_mutations() {
    let store = taskflow::store::TaskStore::with_demo_data();
    store.update_status("TASK-101", TaskStatus::Done);

    let stats = BoardStats::from_tasks(&store.snapshot());
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.completion_rate, 50);
}

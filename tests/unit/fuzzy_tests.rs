use taskflow::palette::FuzzyMatcher;

use super::test_helpers::task;

#[test]
fn exact_substring_scores_zero() {
    let matcher = FuzzyMatcher::default();
    let score = matcher.score("Auth", "Implement Authentication Middleware");
    assert_eq!(score, Some(0.0));
}

#[test]
fn one_typo_in_a_long_query_matches() {
    let matcher = FuzzyMatcher::default();
    let score = matcher
        .score("authentcation", "Implement Authentication Middleware")
        .expect("one edit over thirteen characters qualifies");
    assert!(score > 0.0 && score < 0.1, "score was {score}");
}

#[test]
fn unrelated_text_does_not_match() {
    let matcher = FuzzyMatcher::default();
    assert!(matcher.score("xyzxyz", "Implement Authentication Middleware").is_none());
}

#[test]
fn threshold_is_clamped() {
    assert!((FuzzyMatcher::new(7.0).threshold() - 1.0).abs() < f64::EPSILON);
    assert!(FuzzyMatcher::new(-1.0).threshold().abs() < f64::EPSILON);
}

#[test]
fn zero_threshold_requires_verbatim_substring() {
    let matcher = FuzzyMatcher::new(0.0);
    assert!(matcher.score("palette", "Design Command Palette UI").is_some());
    assert!(matcher.score("palete", "Design Command Palette UI").is_none());
}

#[test]
fn task_score_considers_every_searchable_field() {
    let matcher = FuzzyMatcher::default();
    let t = task(
        "TASK-104",
        "Optimize Git Sync Polling",
        &["performance", "worker"],
        Some("refactor/sync-engine"),
    );

    assert_eq!(matcher.score_task("TASK-104", &t), Some(0.0), "id");
    assert_eq!(matcher.score_task("worker", &t), Some(0.0), "tag");
    assert_eq!(matcher.score_task("refactor", &t), Some(0.0), "branch");
    assert_eq!(matcher.score_task("polling", &t), Some(0.0), "title");
    assert!(matcher.score_task("kubernetes", &t).is_none());
}

#[test]
fn task_score_takes_best_field() {
    let matcher = FuzzyMatcher::default();
    // Misspelled against the title, exact against the tag.
    let t = task("T-1", "Securty review", &["security"], None);
    assert_eq!(matcher.score_task("security", &t), Some(0.0));
}

#[test]
fn task_without_git_is_still_searchable() {
    let matcher = FuzzyMatcher::default();
    let t = task("T-9", "Write docs", &[], None);
    assert!(matcher.score_task("docs", &t).is_some());
}

use std::time::Duration;

use taskflow::ai::local::LocalPlanner;
use taskflow::ai::{planner_from_config, PlanningResult, TaskPlanner};
use taskflow::config::AiConfig;

#[test]
fn local_suggestion_is_deterministic() {
    let plan = LocalPlanner::suggestion("Add OAuth Login");

    assert_eq!(
        plan.subtasks,
        vec![
            "Research requirements for Add OAuth Login",
            "Implement core logic",
            "Write unit tests",
        ]
    );
    assert_eq!(plan.branch_name_suggestion, "feat/add-oauth-login");
    assert!((plan.estimated_hours - 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn local_planner_answers_without_latency() {
    let planner = LocalPlanner::new(Duration::ZERO);
    let plan = planner.plan("Fix bug").await.expect("local plan");
    assert_eq!(plan, LocalPlanner::suggestion("Fix bug"));
    assert_eq!(planner.name(), "local");
}

#[tokio::test]
async fn local_planner_honours_latency() {
    let planner = LocalPlanner::new(Duration::from_millis(30));
    let started = tokio::time::Instant::now();
    planner.plan("Slow").await.expect("local plan");
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn config_without_key_selects_local_planner() {
    let planner = planner_from_config(&AiConfig::default()).expect("planner");
    assert_eq!(planner.name(), "local");
}

#[test]
fn disabled_ai_selects_local_planner_even_with_key() {
    let config = AiConfig {
        enabled: false,
        api_key: Some("k".into()),
        ..AiConfig::default()
    };
    let planner = planner_from_config(&config).expect("planner");
    assert_eq!(planner.name(), "local");
}

#[test]
fn credentialed_config_selects_remote_planner() {
    let config = AiConfig {
        api_key: Some("k".into()),
        ..AiConfig::default()
    };
    let planner = planner_from_config(&config).expect("planner");
    assert_eq!(planner.name(), "gemini");
}

#[test]
fn planning_result_uses_camel_case_wire_names() {
    let plan = LocalPlanner::suggestion("X");
    let value = serde_json::to_value(&plan).expect("serialize");
    assert!(value.get("branchNameSuggestion").is_some());
    assert!(value.get("estimatedHours").is_some());

    let back: PlanningResult = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, plan);
}

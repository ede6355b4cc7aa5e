//! Unit tests for AI credential loading.
//!
//! The test environment has no keychain entry for the `taskflow` service,
//! so lookups fall through to the `API_KEY` environment variable.
//!
//! NOTE: These tests mutate process-global env vars and must run serially.

use taskflow::config::API_KEY_ENV;
use taskflow::GlobalConfig;

#[tokio::test]
#[serial_test::serial]
#[allow(unsafe_code)]
async fn env_var_credential_loading() {
    let mut config = GlobalConfig::default();

    unsafe {
        std::env::set_var(API_KEY_ENV, "test-api-key");
    }

    let result = config.load_credentials().await;
    assert!(result.is_ok(), "load_credentials should succeed with env var");
    assert_eq!(config.ai.api_key.as_deref(), Some("test-api-key"));
    assert!(config.ai.remote_available());

    unsafe {
        std::env::remove_var(API_KEY_ENV);
    }
}

#[tokio::test]
#[serial_test::serial]
#[allow(unsafe_code)]
async fn missing_credential_is_not_an_error() {
    let mut config = GlobalConfig::default();

    unsafe {
        std::env::remove_var(API_KEY_ENV);
    }

    let result = config.load_credentials().await;
    assert!(result.is_ok(), "a missing key degrades to the local planner");
    assert!(config.ai.api_key.is_none());
    assert!(!config.ai.remote_available());
}

#[tokio::test]
#[serial_test::serial]
#[allow(unsafe_code)]
async fn empty_env_var_counts_as_missing() {
    let mut config = GlobalConfig::default();

    unsafe {
        std::env::set_var(API_KEY_ENV, "");
    }

    config.load_credentials().await.expect("load succeeds");
    assert!(config.ai.api_key.is_none());

    unsafe {
        std::env::remove_var(API_KEY_ENV);
    }
}

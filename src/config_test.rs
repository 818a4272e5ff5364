use std::collections::HashMap;
use std::time::Duration;

use serial_test::serial;

use crate::config::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_from_lookup_with_required_values_uses_defaults() {
    let config = Config::from_lookup(lookup(&[
        (API_KEY_VAR, "secret"),
        (WORKSPACE_SLUG_VAR, "acme"),
    ]))
    .unwrap();

    assert_eq!(config.api_key, "secret");
    assert_eq!(config.workspace_slug, "acme");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        config.request_timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
}

#[test]
fn test_missing_api_key_fails() {
    let err = Config::from_lookup(lookup(&[(WORKSPACE_SLUG_VAR, "acme")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { name: API_KEY_VAR });
    assert!(err.to_string().contains("PLANE_API_KEY"));
}

#[test]
fn test_missing_workspace_fails() {
    let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingVar {
            name: WORKSPACE_SLUG_VAR
        }
    );
}

#[test]
fn test_empty_value_counts_as_missing() {
    let err = Config::from_lookup(lookup(&[(API_KEY_VAR, ""), (WORKSPACE_SLUG_VAR, "acme")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { name: API_KEY_VAR });
}

#[test]
fn test_base_url_override_drops_trailing_slash() {
    let config = Config::from_lookup(lookup(&[
        (API_KEY_VAR, "secret"),
        (WORKSPACE_SLUG_VAR, "acme"),
        (BASE_URL_VAR, "https://plane.internal/api/v1/"),
    ]))
    .unwrap();

    assert_eq!(config.base_url, "https://plane.internal/api/v1");
}

#[test]
fn test_timeout_override() {
    let config = Config::from_lookup(lookup(&[
        (API_KEY_VAR, "secret"),
        (WORKSPACE_SLUG_VAR, "acme"),
        (TIMEOUT_VAR, "5"),
    ]))
    .unwrap();

    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
fn test_invalid_timeout_is_rejected() {
    for value in ["soon", "0", "-1"] {
        let result = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (WORKSPACE_SLUG_VAR, "acme"),
            (TIMEOUT_VAR, value),
        ]));
        assert!(
            matches!(result, Err(ConfigError::InvalidVar { name, .. }) if name == TIMEOUT_VAR),
            "timeout '{}' should be rejected",
            value
        );
    }
}

#[test]
fn test_debug_output_hides_api_key() {
    let config = Config::new("super-secret", "acme");
    let debug = format!("{:?}", config);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("acme"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    // SAFETY: serialized with every other test that touches the environment.
    unsafe {
        std::env::set_var(API_KEY_VAR, "env-secret");
        std::env::set_var(WORKSPACE_SLUG_VAR, "env-workspace");
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(TIMEOUT_VAR);
    }

    let config = Config::from_env().unwrap();

    unsafe {
        std::env::remove_var(API_KEY_VAR);
        std::env::remove_var(WORKSPACE_SLUG_VAR);
    }

    assert_eq!(config.api_key, "env-secret");
    assert_eq!(config.workspace_slug, "env-workspace");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
#[serial]
fn test_from_env_without_key_fails() {
    unsafe {
        std::env::remove_var(API_KEY_VAR);
        std::env::set_var(WORKSPACE_SLUG_VAR, "env-workspace");
    }

    let result = Config::from_env();

    unsafe {
        std::env::remove_var(WORKSPACE_SLUG_VAR);
    }

    assert_eq!(
        result.unwrap_err(),
        ConfigError::MissingVar { name: API_KEY_VAR }
    );
}

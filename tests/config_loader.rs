mod common;

use common::temp_config;
use scanreport::config::{Config, ConfigError};
use std::path::Path;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.defaults.timeout_seconds, 120);
    assert_eq!(config.defaults.connect_timeout_seconds, 10);
    assert_eq!(config.server.bind_addr, "127.0.0.1:8501");
    assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
    assert_eq!(config.model.model, "gemini-2.5-pro");
    assert_eq!(config.model.base_url, "https://generativelanguage.googleapis.com");
    assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
    assert!(config.model.api_key.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_gives_defaults() {
    let config = Config::load_from(Path::new("/nonexistent/scanreport/config.toml")).unwrap();
    assert_eq!(config.model.model, "gemini-2.5-pro");
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = temp_config(
        r#"
[model]
model = "gemini-2.5-flash"
api_key = "abc"
max_output_tokens = 4096
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.model.model, "gemini-2.5-flash");
    assert_eq!(config.model.api_key.as_deref(), Some("abc"));
    assert_eq!(config.model.max_output_tokens, Some(4096));
    assert_eq!(config.model.base_url, "https://generativelanguage.googleapis.com");
    assert_eq!(config.server.bind_addr, "127.0.0.1:8501");
    assert_eq!(config.defaults.timeout_seconds, 120);
}

#[test]
fn test_full_file() {
    let (_dir, path) = temp_config(
        r#"
[defaults]
timeout_seconds = 30
connect_timeout_seconds = 3

[server]
bind_addr = "0.0.0.0:9000"
max_upload_bytes = 1048576

[model]
base_url = "http://localhost:1234"
model = "local-vision"
api_key_env = "LOCAL_KEY"
temperature = 0.2
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.defaults.timeout_seconds, 30);
    assert_eq!(config.defaults.connect_timeout_seconds, 3);
    assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.server.max_upload_bytes, 1_048_576);
    assert_eq!(config.model.base_url, "http://localhost:1234");
    assert_eq!(config.model.api_key_env, "LOCAL_KEY");
    assert_eq!(config.model.temperature, Some(0.2));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[server\nbind_addr = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_invalid_bind_addr_fails_validation() {
    let (_dir, path) = temp_config("[server]\nbind_addr = \"not-an-address\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn test_validation_rules() {
    let mut config = Config::default();
    config.model.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.model.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.server.max_upload_bytes = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.defaults.timeout_seconds = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_connect_timeout_fails_validation() {
    let (_dir, path) = temp_config("[defaults]\nconnect_timeout_seconds = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("connect_timeout_seconds"));
}

#[test]
fn test_config_path_ends_with_app_dir() {
    let path = Config::config_path();
    assert!(path.ends_with("scanreport/config.toml"));
}

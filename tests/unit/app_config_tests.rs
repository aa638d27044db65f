/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;
use std::time::Duration;

use lexistore::app_config::{Config, LogLevel};
use log::LevelFilter;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    // Test default values
    assert_eq!(config.database_path, None);
    assert_eq!(config.cache_ttl_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);

    // The TTL accessor mirrors the raw seconds field
    assert_eq!(config.cache_ttl(), Duration::from_secs(60));
}

/// Test configuration validation
#[test]
fn test_config_validation_withZeroTtl_shouldFail() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Zero TTL is rejected
    config.cache_ttl_secs = 0;
    assert!(config.validate().is_err());

    // Any positive TTL is accepted
    config.cache_ttl_secs = 1;
    assert!(config.validate().is_ok());
}

/// Test that missing fields fall back to defaults when parsing
#[test]
fn test_config_parsing_withPartialJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str(r#"{ "log_level": "debug" }"#)
        .expect("partial config should parse");

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.database_path, None);
    assert_eq!(config.cache_ttl_secs, 60);
}

/// Test that a fully-specified config file is honored
#[test]
fn test_config_parsing_withFullJson_shouldUseProvidedValues() {
    let config: Config = serde_json::from_str(
        r#"{
            "database_path": "/tmp/lexistore-test.db",
            "cache_ttl_secs": 5,
            "log_level": "warn"
        }"#,
    )
    .expect("full config should parse");

    assert_eq!(
        config.database_path,
        Some(PathBuf::from("/tmp/lexistore-test.db"))
    );
    assert_eq!(config.cache_ttl_secs, 5);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.cache_ttl(), Duration::from_secs(5));
}

/// Test log level mapping to the log crate's filter levels
#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryVariant() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}

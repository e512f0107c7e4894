use super::*;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.api_url, "http://localhost:3000/api");
    assert_eq!(config.net_timeout_ms, 5000);
    assert_eq!(config.token_file, None);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_validate_rejects_empty_api_url() {
    let config = AppConfig {
        api_url: "  ".to_string(),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout_ms: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_api_client_config_carries_url_and_timeout() {
    let config = AppConfig {
        api_url: "https://api.example.com".to_string(),
        net_timeout_ms: 1234,
        ..AppConfig::default()
    };
    let client_config = config.api_client_config();
    assert_eq!(client_config.base_url, "https://api.example.com");
    assert_eq!(client_config.timeout_ms, 1234);
}

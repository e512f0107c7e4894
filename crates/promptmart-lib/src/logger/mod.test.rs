use super::*;

// Logger::init installs a process-global subscriber, so everything that
// touches it lives in one test.
#[test]
fn test_logger_init_once() {
    assert!(!Logger::is_initialized());
    assert!(Logger::global().is_none());

    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: ColorIntent::Never,
    };

    Logger::init(config.clone()).unwrap();
    assert!(Logger::is_initialized());
    assert!(Logger::global().is_some());

    // Second initialization is rejected
    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized)
    ));
}

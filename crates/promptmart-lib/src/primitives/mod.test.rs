use super::*;

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(99), LogLevel::Trace);
}

#[test]
fn test_log_level_parses_names_and_digits() {
    assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
    assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("2".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert!("loud".parse::<LogLevel>().is_err());
}

#[test]
fn test_log_format_aliases() {
    assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert!("yaml".parse::<LogFormat>().is_err());
}

#[test]
fn test_color_intent_aliases() {
    assert_eq!("auto".parse::<ColorIntent>().unwrap(), ColorIntent::Auto);
    assert_eq!("on".parse::<ColorIntent>().unwrap(), ColorIntent::Always);
    assert_eq!("off".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
}

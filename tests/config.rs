use faultline::utils::config::{ConfigError, LogConfig, LogFormat, parse_fields};
use faultline::utils::telemetry;
use serde_json::json;

#[test]
fn log_formats_parse_case_insensitively() {
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("cli".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    assert!(matches!(
        "xml".parse::<LogFormat>(),
        Err(ConfigError::UnsupportedFormat(format)) if format == "xml"
    ));
}

#[test]
fn static_fields_parse_from_pairs() {
    let fields = parse_fields("env=staging, region = eu-west-1,,").unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields["env"], json!("staging"));
    assert_eq!(fields["region"], json!("eu-west-1"));
}

#[test]
fn malformed_static_fields_are_rejected() {
    assert!(matches!(
        parse_fields("env"),
        Err(ConfigError::InvalidField(field)) if field == "env"
    ));
    assert!(parse_fields("=value").is_err());
}

#[test]
fn invalid_levels_are_rejected_before_installing() {
    let config = LogConfig {
        level: "faultline=loud".to_string(),
        ..LogConfig::default()
    };

    assert!(matches!(
        telemetry::init(&config),
        Err(ConfigError::InvalidLevel(level)) if level == "faultline=loud"
    ));
}

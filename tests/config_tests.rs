//! Loading `AppConfig` from files on disk

use darwin::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 8080
events:
  capacity: 512
log:
  filter: "darwin=debug,audit=info"
"#,
    );

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.events.capacity, Some(512));
    assert_eq!(config.log.filter, "darwin=debug,audit=info");
}

#[test]
fn test_empty_sections_use_defaults() {
    let file = write_config("events: {}\n");

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_missing_file_reports_path() {
    let err = AppConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
}

#[test]
fn test_malformed_file_reports_path() {
    let file = write_config("server:\n  port: [\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = AppConfig::from_yaml_file(&path).unwrap_err();
    assert!(err.to_string().contains(&path));
}

#[test]
fn test_zero_event_capacity_is_rejected() {
    let file = write_config("events:\n  capacity: 0\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = AppConfig::from_yaml_file(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains(&path));
    assert!(message.contains("events.capacity must be greater than zero"));
}

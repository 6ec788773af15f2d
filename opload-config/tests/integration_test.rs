//! Integration tests for opload-config

use opload_config::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = OploadConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("OPLOAD_HTTP_BASE_URL", Some("http://bank.internal:9000")),
        ("OPLOAD_HTTP_TIMEOUT", Some("15")),
        ("OPLOAD_LOG_LEVEL", Some("debug")),
        ("OPLOAD_RUN_USERS", Some("25")),
        ("OPLOAD_RUN_SPAWN_RATE", Some("5")),
        ("OPLOAD_RUN_TIME", Some("2m")),
        ("OPLOAD_SEEDS_DUMPS_DIR", Some("/tmp/opload-dumps")),
        ("OPLOAD_SEEDS_OPERATIONS_COUNT", Some("40")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.http.base_url, "http://bank.internal:9000");
        assert_eq!(config.http.timeout, Duration::from_secs(15));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.run.users, 25);
        assert_eq!(config.run.spawn_rate, 5.0);
        assert_eq!(config.run.run_time, Some(Duration::from_secs(120)));
        assert_eq!(config.seeds.dumps_dir, PathBuf::from("/tmp/opload-dumps"));
        assert_eq!(config.seeds.operations_count, Some(40));
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("OPLOAD_RUN_USERS", Some("many"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(ref msg) if msg.contains("RUN_USERS")));
    });
}

#[test]
fn test_env_override_is_validated() {
    with_vars(vec![("OPLOAD_RUN_USERS", Some("0"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { ref domain, .. } if domain == "run"));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("LOADTEST_RUN_USERS", Some("3"))], || {
        let config = ConfigLoader::with_prefix("LOADTEST").from_env().unwrap();
        assert_eq!(config.run.users, 3);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let config = OploadConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();

    // Parse it back
    let parsed: OploadConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.http.base_url, config.http.base_url);
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
http:
  base_url: "https://bank.example.com"
  timeout: 30
  verify_ssl: false

logging:
  level: warn
  format: json

run:
  users: 50
  spawn_rate: 10
  run_time: 10m
  iterations: 1000
  wait_time:
    min: 100ms
    max: 1s

seeds:
  dumps_dir: "./out/dumps"
  operations_count: 100
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(vec![("OPLOAD_RUN_USERS", None::<&str>)], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();

        assert_eq!(config.http.base_url, "https://bank.example.com");
        assert!(!config.http.verify_ssl);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.run.users, 50);
        assert_eq!(config.run.iterations, Some(1000));
        assert_eq!(config.run.wait_time.min, Duration::from_millis(100));
        assert_eq!(config.seeds.operations_count, Some(100));
    });
}

#[test]
fn test_partial_config_uses_defaults() {
    let yaml = "run:\n  users: 4\n";
    let config: OploadConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.run.users, 4);
    assert_eq!(config.http.base_url, "http://localhost:8003");
    assert_eq!(config.seeds.dumps_dir, PathBuf::from("dumps"));
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_missing_file_is_read_error() {
    let err = ConfigLoader::new()
        .from_file("/nonexistent/opload.yaml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}

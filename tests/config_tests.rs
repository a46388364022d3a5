// Config loading and validation tests

use roastmon::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8000
host = "127.0.0.1"

[dashboard]
port = 8501
host = "127.0.0.1"
api_url = "http://127.0.0.1:8000"
poll_interval_ms = 1000
request_timeout_ms = 300
history_length = 60

[sensors]
gpu = false

[supervisor]
warmup_ms = 2000
terminate_grace_ms = 1500
log_file = "roastmon.log"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.dashboard.port, 8501);
    assert_eq!(config.dashboard.api_url, "http://127.0.0.1:8000");
    assert_eq!(config.dashboard.history_length, 60);
    assert!(!config.sensors.gpu);
    assert_eq!(config.supervisor.warmup_ms, 2000);
}

#[test]
fn test_config_sensor_categories_default_like_the_provider() {
    let minimal = r#"
[server]
port = 8000
host = "127.0.0.1"

[dashboard]
port = 8501
host = "127.0.0.1"
api_url = "http://127.0.0.1:8000"
"#;
    let config = AppConfig::load_from_str(minimal).expect("minimal config");
    assert!(config.sensors.cpu);
    assert!(config.sensors.gpu);
    assert!(config.sensors.memory);
    assert!(config.sensors.motherboard);
    assert!(config.sensors.controller);
    assert!(!config.sensors.storage);
    assert!(!config.sensors.network);
    assert!(config.sensors.nvml_path.is_empty());
    assert_eq!(config.dashboard.poll_interval_ms, 1000);
    assert_eq!(config.dashboard.request_timeout_ms, 300);
    assert_eq!(config.dashboard.history_length, 60);
    assert_eq!(config.supervisor.warmup_ms, 2000);
    assert_eq!(config.supervisor.terminate_grace_ms, 1500);
    assert_eq!(config.supervisor.log_file, "roastmon.log");
}

#[test]
fn test_config_validation_rejects_invalid_server_port() {
    let bad = VALID_CONFIG.replace("port = 8000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_invalid_dashboard_port() {
    let bad = VALID_CONFIG.replace("port = 8501", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("dashboard.port"));
}

#[test]
fn test_config_validation_rejects_empty_api_url() {
    let bad = VALID_CONFIG.replace("api_url = \"http://127.0.0.1:8000\"", "api_url = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("dashboard.api_url"));
}

#[test]
fn test_config_validation_rejects_poll_interval_zero() {
    let bad = VALID_CONFIG.replace("poll_interval_ms = 1000", "poll_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("poll_interval_ms"));
}

#[test]
fn test_config_validation_rejects_request_timeout_zero() {
    let bad = VALID_CONFIG.replace("request_timeout_ms = 300", "request_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_history_length_zero() {
    let bad = VALID_CONFIG.replace("history_length = 60", "history_length = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("history_length"));
}

#[test]
fn test_config_validation_rejects_warmup_zero() {
    let bad = VALID_CONFIG.replace("warmup_ms = 2000", "warmup_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("warmup_ms"));
}

#[test]
fn test_config_validation_rejects_terminate_grace_zero() {
    let bad = VALID_CONFIG.replace("terminate_grace_ms = 1500", "terminate_grace_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("terminate_grace_ms"));
}

#[test]
fn test_config_validation_rejects_empty_log_file() {
    let bad = VALID_CONFIG.replace("log_file = \"roastmon.log\"", "log_file = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("log_file"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.dashboard.port, 8501);
}

/// Integration tests for configuration loading. Env-touching tests are
/// serialized since the process environment is shared.
use pretty_assertions::assert_eq;
use sensor_simulator::config::Config;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_config_loading_from_yaml() {
    let config_str = r#"
backend:
  url: "http://backend.local:3000"
  timeout_secs: 10

device:
  token: "c0ffee00c0ffee00"
  port_id: "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"

reading:
  interval_secs: 1
"#;

    let temp_file =
        std::env::temp_dir().join(format!("test-config-simulator-{}.yaml", std::process::id()));
    std::fs::write(&temp_file, config_str).unwrap();

    let config = Config::load(&temp_file).unwrap();

    assert_eq!(config.backend.url, "http://backend.local:3000");
    assert_eq!(config.backend.timeout_secs, 10);
    assert_eq!(config.device.token, "c0ffee00c0ffee00");
    assert_eq!(
        config.device.port_id,
        "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"
    );
    assert_eq!(config.reading.interval_secs, 1);
    assert!(config.validate().is_ok());

    std::fs::remove_file(&temp_file).ok();
}

#[tokio::test]
#[serial]
async fn test_missing_sections_fall_back_to_defaults() {
    let config_str = r#"
device:
  token: "c0ffee00c0ffee00"
  port_id: "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"
"#;

    let temp_file =
        std::env::temp_dir().join(format!("test-config-defaults-{}.yaml", std::process::id()));
    std::fs::write(&temp_file, config_str).unwrap();

    let config = Config::load(&temp_file).unwrap();

    assert_eq!(config.backend.url, "http://localhost:3000");
    assert_eq!(config.backend.timeout_secs, 5);
    assert_eq!(config.reading.interval_secs, 2);

    std::fs::remove_file(&temp_file).ok();
}

#[tokio::test]
#[serial]
async fn test_config_env_override() {
    let config_str = r#"
backend:
  url: "http://backend.local:3000"

device:
  token: "from-yaml"
  port_id: "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"
"#;

    let temp_file =
        std::env::temp_dir().join(format!("test-config-env-{}.yaml", std::process::id()));
    std::fs::write(&temp_file, config_str).unwrap();

    std::env::set_var("BACKEND_URL", "http://override.local:4000");
    std::env::set_var("DEVICE_TOKEN", "from-env");
    std::env::set_var("READING_INTERVAL_SECS", "7");

    let config = Config::load(&temp_file).unwrap();

    assert_eq!(config.backend.url, "http://override.local:4000");
    assert_eq!(config.device.token, "from-env");
    assert_eq!(config.reading.interval_secs, 7);
    // Not overridden, kept from YAML
    assert_eq!(
        config.device.port_id,
        "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"
    );

    std::env::remove_var("BACKEND_URL");
    std::env::remove_var("DEVICE_TOKEN");
    std::env::remove_var("READING_INTERVAL_SECS");

    std::fs::remove_file(&temp_file).ok();
}

#[tokio::test]
#[serial]
async fn test_env_placeholder_expansion() {
    let config_str = r#"
device:
  token: "$(SIM_TEST_TOKEN)"
  port_id: "0d3f4c1e-77aa-4b0e-9c2d-5a6b7c8d9e0f"
"#;

    let temp_file =
        std::env::temp_dir().join(format!("test-config-expand-{}.yaml", std::process::id()));
    std::fs::write(&temp_file, config_str).unwrap();

    std::env::set_var("SIM_TEST_TOKEN", "expanded-token");

    let config = Config::load(&temp_file).unwrap();
    assert_eq!(config.device.token, "expanded-token");

    std::env::remove_var("SIM_TEST_TOKEN");
    std::fs::remove_file(&temp_file).ok();
}

/// The shipped example config must be refused before any network call: its
/// credentials are still the placeholder sentinels.
#[tokio::test]
#[serial]
async fn test_shipped_example_config_is_unconfigured() {
    let config = Config::load("config/config.example.yaml").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("not configured"));
}

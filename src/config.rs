use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Sentinel values shipped in the example config. The simulator refuses to
/// start while either of them is still in place.
pub const TOKEN_PLACEHOLDER: &str = "YOUR_DEVICE_TOKEN_HERE";
pub const PORT_PLACEHOLDER: &str = "YOUR_PORT_ID_HERE";

/// Printed when the simulator starts with placeholder credentials.
pub const SETUP_GUIDE: &str = "\
To connect the simulator to a backend:
  1. Start the backend and log in to the frontend
  2. Create a device on the Devices page and generate a device token
  3. Create a port on the Ports page and copy its UUID
  4. Put both values in the config file, or set DEVICE_TOKEN and PORT_ID";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_token")]
    pub token: String,
    #[serde(default = "default_port_id")]
    pub port_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:3000".into()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_token() -> String {
    TOKEN_PLACEHOLDER.into()
}

fn default_port_id() -> String {
    PORT_PLACEHOLDER.into()
}

fn default_interval_secs() -> u64 {
    2
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            port_id: default_port_id(),
        }
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Config {
    /// Load YAML from disk, substitute $(VAR) with env vars, then parse.
    /// Afterwards, selected env vars override whatever the YAML had.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&raw);
        let mut cfg: Config = serde_yaml::from_str(&expanded)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(token) = std::env::var("DEVICE_TOKEN") {
            self.device.token = token;
        }
        if let Ok(port_id) = std::env::var("PORT_ID") {
            self.device.port_id = port_id;
        }
        if let Ok(secs) = std::env::var("READING_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse() {
                self.reading.interval_secs = secs;
            }
        }
    }

    /// Validate configuration values. A placeholder token or port id means
    /// the simulator has not been pointed at a real device yet.
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.is_empty() {
            return Err(AppError::Config("backend url cannot be empty".to_string()));
        }

        if self.backend.timeout_secs == 0 {
            return Err(AppError::Config(
                "request timeout must be at least 1 second".to_string(),
            ));
        }

        if self.device.token.is_empty() || self.device.token == TOKEN_PLACEHOLDER {
            return Err(AppError::Config(
                "device token is not configured (placeholder value present)".to_string(),
            ));
        }

        if self.device.port_id.is_empty() || self.device.port_id == PORT_PLACEHOLDER {
            return Err(AppError::Config(
                "port id is not configured (placeholder value present)".to_string(),
            ));
        }

        if Uuid::parse_str(&self.device.port_id).is_err() {
            return Err(AppError::Config(format!(
                "port id '{}' is not a valid UUID",
                self.device.port_id
            )));
        }

        if self.reading.interval_secs == 0 {
            return Err(AppError::Config(
                "reading interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

/// Expand environment variables in the format $(VAR_NAME).
/// Unset variables are left in place.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    let re = regex::Regex::new(r"\$\(([A-Z_][A-Z0-9_]*)\)").unwrap();

    for cap in re.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];

        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(full_match, &value);
        }
    }

    result
}

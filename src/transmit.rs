use crate::config::Config;
use crate::error::{AppError, Result};
use crate::reading::SensorReading;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for the ingestion endpoint. Field names follow the
/// backend's JSON contract.
#[derive(Debug, Serialize)]
struct ReadingPayload<'a> {
    #[serde(rename = "deviceToken")]
    device_token: &'a str,
    #[serde(rename = "portId")]
    port_id: &'a str,
    voltage: f64,
    current: f64,
    power: f64,
}

#[derive(Debug, Deserialize)]
struct ReadingResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<ResponseData>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseData {
    #[serde(rename = "phantomDetected", default)]
    phantom_detected: bool,
    #[serde(rename = "portStatus", default)]
    port_status: Option<String>,
}

/// What the backend acknowledged for an accepted reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingAck {
    pub phantom_detected: bool,
    pub port_status: Option<String>,
}

/// Posts readings to the ingestion endpoint. Holds one HTTP client for the
/// process lifetime; every send is independent of the previous one.
pub struct Transmitter {
    client: reqwest::Client,
    endpoint: String,
    device_token: String,
    port_id: String,
}

impl Transmitter {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.backend.timeout_secs))
            .build()
            .map_err(|e| AppError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/api/sensor/reading",
                cfg.backend.url.trim_end_matches('/')
            ),
            device_token: cfg.device.token.clone(),
            port_id: cfg.device.port_id.clone(),
        })
    }

    /// Submit one reading. Any failure comes back as an error value; the
    /// caller decides whether to keep going.
    pub async fn send(&self, reading: &SensorReading) -> Result<ReadingAck> {
        let payload = ReadingPayload {
            device_token: &self.device_token,
            port_id: &self.port_id,
            voltage: reading.voltage,
            current: reading.current,
            power: reading.power,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        interpret_response(status, &body)
    }

    fn classify(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(self.endpoint.clone())
        } else if err.is_connect() {
            AppError::Connect(self.endpoint.clone())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

/// A reading counts as delivered only on HTTP 201 with a `success: true`
/// body. Everything else maps to a distinct error.
fn interpret_response(status: StatusCode, body: &str) -> Result<ReadingAck> {
    if status != StatusCode::CREATED {
        let message = serde_json::from_str::<ReadingResponse>(body)
            .ok()
            .and_then(|r| r.message)
            .unwrap_or_else(|| body.to_string());
        return Err(AppError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let decoded: ReadingResponse = serde_json::from_str(body)?;
    if !decoded.success {
        return Err(AppError::Rejected(
            decoded
                .message
                .unwrap_or_else(|| "backend reported failure".to_string()),
        ));
    }

    let data = decoded.data.unwrap_or_default();
    Ok(ReadingAck {
        phantom_detected: data.phantom_detected,
        port_status: data.port_status,
    })
}

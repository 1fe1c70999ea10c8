use sensor_simulator::config::{self, Config};
use sensor_simulator::reading;
use sensor_simulator::transmit::Transmitter;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let cfg_path =
        std::env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.example.yaml".into());
    let cfg = Config::load(&cfg_path)?;

    info!("Starting phantom-energy sensor simulator");
    info!("Backend URL: {}", cfg.backend.url);
    info!("Port ID: {}", cfg.device.port_id);
    info!(
        "Device token: {}***",
        &cfg.device.token[..8.min(cfg.device.token.len())]
    );
    info!("Reading interval: {}s", cfg.reading.interval_secs);

    if let Err(e) = cfg.validate() {
        error!("{e}");
        for line in config::SETUP_GUIDE.lines() {
            info!("{line}");
        }
        return Ok(());
    }

    let transmitter = Transmitter::new(&cfg)?;
    let interval = Duration::from_secs(cfg.reading.interval_secs);

    info!("Sending readings; press Ctrl+C to stop");

    let sig = shutdown_signal();
    tokio::pin!(sig);

    let mut consecutive_failures: u64 = 0;
    loop {
        let reading = reading::generate(&mut rand::thread_rng());

        match transmitter.send(&reading).await {
            Ok(ack) => {
                consecutive_failures = 0;
                info!(
                    voltage = reading.voltage,
                    current = reading.current,
                    power = reading.power,
                    "reading accepted"
                );
                if ack.phantom_detected {
                    warn!(
                        port_status = ack.port_status.as_deref().unwrap_or("unknown"),
                        "backend reported phantom energy on this port"
                    );
                }
            }
            Err(e) => {
                consecutive_failures += 1;
                warn!(consecutive_failures, error = %e, "failed to deliver reading");
            }
        }

        tokio::select! {
            biased;
            _ = &mut sig => {
                info!("shutdown requested; stopping simulator");
                break;
            }
            _ = sleep(interval) => {}
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

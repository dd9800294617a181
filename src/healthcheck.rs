use anyhow::{Context, bail};
use std::time::Duration;
use tonic::transport::Endpoint;
use tonic_health::pb::HealthCheckRequest;
use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::health_client::HealthClient;

use crate::config;

const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Perform a health check against the port the server would listen on
pub async fn healthcheck() -> anyhow::Result<()> {
    let port = configured_port(|name| std::env::var(name).ok())?;
    healthcheck_with_port(port).await
}

/// Resolve the port through the same settings the server starts from.
fn configured_port<F>(lookup: F) -> anyhow::Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = config::settings_from(lookup).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(settings.port)
}

/// Perform a `grpc.health.v1` check of the whole server on a specific port
pub async fn healthcheck_with_port(port: u16) -> anyhow::Result<()> {
    let channel = Endpoint::from_shared(format!("http://127.0.0.1:{port}"))?
        .connect_timeout(HEALTHCHECK_TIMEOUT)
        .timeout(HEALTHCHECK_TIMEOUT)
        .connect()
        .await
        .context("Failed to connect")?;

    let response = HealthClient::new(channel)
        .check(HealthCheckRequest {
            service: String::new(),
        })
        .await
        .context("Health check request failed")?;

    let status = response.into_inner().status();
    if status != ServingStatus::Serving {
        bail!("Server reported status {}", status.as_str_name());
    }
    Ok(())
}

//! Keep-alive scheduler
//!
//! Managed hosts with an idle-suspend policy stop a process that has not
//! seen traffic for a while. When enabled, a background task requests the
//! service's own public health endpoint on a fixed interval.
//!
//! The task is only spawned when the hosting flag is set and an external
//! URL is configured. A failed ping is logged and otherwise ignored.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Path appended to the external base URL
pub const HEALTH_PATH: &str = "/api/health";

/// Keep-alive settings
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    /// Managed-hosting flag
    pub enabled: bool,
    /// Externally reachable base URL of this service
    pub external_url: Option<String>,
    pub interval: Duration,
    /// Per-ping request timeout
    pub timeout: Duration,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            external_url: None,
            interval: Duration::from_secs(14 * 60),
            timeout: Duration::from_secs(10),
        }
    }
}

impl KeepAliveConfig {
    /// Health URL to ping, or `None` when keep-alive should not run
    pub fn target_url(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let base = self.external_url.as_deref()?.trim().trim_end_matches('/');
        if base.is_empty() {
            return None;
        }

        Some(format!("{}{}", base, HEALTH_PATH))
    }
}

/// A single failed ping
#[derive(Debug, thiserror::Error)]
pub enum PingFailure {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

/// Issue one GET against `url`, treating any non-2xx answer as a failure
pub async fn ping_once(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<(), PingFailure> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| PingFailure::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PingFailure::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(())
}

/// Handle to the running keep-alive task
pub struct KeepAlive {
    url: String,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl KeepAlive {
    /// Start the keep-alive task if `config` allows it
    pub fn spawn(config: &KeepAliveConfig, client: reqwest::Client) -> Option<Self> {
        let url = config.target_url()?;
        let (shutdown, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(run(
            url.clone(),
            config.interval,
            config.timeout,
            client,
            shutdown_rx,
        ));

        Some(Self {
            url,
            shutdown,
            handle,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            tracing::warn!("Keep-alive task ended abnormally: {}", e);
        }
        tracing::info!("Keep-alive stopped");
    }
}

async fn run(
    url: String,
    period: Duration,
    timeout: Duration,
    client: reqwest::Client,
    mut shutdown: watch::Receiver<bool>,
) {
    // First ping one full period after startup
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match ping_once(&client, &url, timeout).await {
                    Ok(()) => tracing::debug!(url = %url, "Keep-alive ping succeeded"),
                    Err(e) => tracing::error!(error = %e, "Keep-alive ping failed"),
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}

//! Readiness gating against the backend health endpoint
//!
//! The backend is started out-of-band, so the only synchronization
//! available to the harness is polling the health endpoint with a bounded
//! attempt budget before any browser work starts.

use std::time::Duration;

use tracing::{debug, info, warn};

/// Bounded poller for the backend health endpoint.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    health_url: String,
    max_attempts: u32,
    interval: Duration,
    probe_timeout: Duration,
}

impl ReadinessGate {
    pub fn new(health_url: &str, max_attempts: u32, interval: Duration) -> Self {
        Self {
            health_url: health_url.to_string(),
            max_attempts,
            interval,
            probe_timeout: Duration::from_secs(2),
        }
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Poll the health endpoint until it answers with a success status.
    ///
    /// A probe that errors (connection refused, DNS failure, timeout) or
    /// that returns a non-2xx status counts as one attempt and is
    /// otherwise swallowed; both are expected while the backend is still
    /// starting. Returns `true` as soon as one probe succeeds, without
    /// waiting out the remaining budget, and `false` once `max_attempts`
    /// probes have failed.
    pub async fn wait_until_ready(&self) -> bool {
        let client = reqwest::Client::new();

        for attempt in 1..=self.max_attempts {
            match client
                .get(&self.health_url)
                .timeout(self.probe_timeout)
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    info!("backend ready after {} probe(s)", attempt);
                    return true;
                }
                Ok(resp) => {
                    warn!(
                        "health probe {}/{} returned {}",
                        attempt,
                        self.max_attempts,
                        resp.status()
                    );
                }
                Err(e) => {
                    if attempt == 1 {
                        info!("waiting for backend at {}...", self.health_url);
                    }
                    // Connection refused is expected while the backend is starting
                    if !e.is_connect() {
                        debug!("health probe {}/{} failed: {}", attempt, self.max_attempts, e);
                    }
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_keeps_its_configuration() {
        let gate = ReadinessGate::new("http://localhost:3001/api/health", 15, Duration::from_secs(1));
        assert_eq!(gate.health_url(), "http://localhost:3001/api/health");
        assert_eq!(gate.max_attempts(), 15);
    }
}

//! Orchestration of the verification flows
//!
//! Every entry point gates on backend readiness, then drives compiled
//! flows through the browser driver. Success is the absence of an error;
//! the only artifacts of a run are the screenshots on disk.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::driver::{Driver, DriverConfig};
use crate::error::{VerifyError, VerifyResult};
use crate::fixtures::Fixtures;
use crate::flows::{actor_flow, view_tour};
use crate::readiness::ReadinessGate;

/// Configuration for a verification run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Frontend base URL.
    pub base_url: String,
    /// Backend health endpoint.
    pub health_url: String,
    /// Health probe budget.
    pub max_attempts: u32,
    /// Pause between health probes.
    pub poll_interval: Duration,
    /// Directory the evidence screenshots are written to.
    pub screenshot_dir: PathBuf,
    pub driver: DriverConfig,
    pub fixtures: Fixtures,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            health_url: "http://localhost:3001/api/health".to_string(),
            max_attempts: 15,
            poll_interval: Duration::from_secs(1),
            screenshot_dir: PathBuf::from("verification"),
            driver: DriverConfig::default(),
            fixtures: Fixtures::default(),
        }
    }
}

/// Verification harness: the readiness gate plus the two flow runners.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Run the role login flows, one browser session per actor.
    pub async fn verify_roles(&self) -> VerifyResult<()> {
        self.await_backend().await?;
        let driver = self.driver()?;
        self.run_roles(&driver).await
    }

    /// Run the view tour in a single session.
    pub async fn verify_views(&self) -> VerifyResult<()> {
        self.await_backend().await?;
        let driver = self.driver()?;
        self.run_views(&driver).await
    }

    /// Run both flows: the role logins, then the view tour.
    pub async fn verify_all(&self) -> VerifyResult<()> {
        self.await_backend().await?;
        let driver = self.driver()?;
        self.run_roles(&driver).await?;
        self.run_views(&driver).await
    }

    /// Probe the health endpoint once, without retries.
    pub async fn probe_backend(&self) -> bool {
        ReadinessGate::new(&self.config.health_url, 1, self.config.poll_interval)
            .wait_until_ready()
            .await
    }

    async fn await_backend(&self) -> VerifyResult<()> {
        let gate = ReadinessGate::new(
            &self.config.health_url,
            self.config.max_attempts,
            self.config.poll_interval,
        );
        if gate.wait_until_ready().await {
            Ok(())
        } else {
            Err(VerifyError::BackendUnavailable {
                url: self.config.health_url.clone(),
                attempts: self.config.max_attempts,
            })
        }
    }

    fn driver(&self) -> VerifyResult<Driver> {
        std::fs::create_dir_all(&self.config.screenshot_dir)?;
        Driver::new(self.config.driver.clone())
    }

    async fn run_roles(&self, driver: &Driver) -> VerifyResult<()> {
        for actor in &self.config.fixtures.actors {
            info!("verifying login for role '{}'", actor.role_label);
            let steps = actor_flow(actor, &self.config.base_url, &self.config.screenshot_dir);
            driver.run(&steps).await?;
            info!("role '{}' verified", actor.role_label);
        }
        Ok(())
    }

    async fn run_views(&self, driver: &Driver) -> VerifyResult<()> {
        let fixtures = &self.config.fixtures;
        info!("touring {} view(s)", fixtures.views.len());
        let steps = view_tour(
            fixtures.tour_login.as_ref(),
            &fixtures.views,
            &self.config.base_url,
            &self.config.screenshot_dir,
        );
        driver.run(&steps).await?;
        info!("view tour completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_deployment() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:5173");
        assert_eq!(config.health_url, "http://localhost:3001/api/health");
        assert_eq!(config.max_attempts, 15);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.screenshot_dir, PathBuf::from("verification"));
    }
}

//! Restarting the wallpaper daemon after its config changes.
//!
//! hyprpaper only reads `hyprpaper.conf` at startup, so a rewrite has no visible
//! effect until the user service is restarted. [`SystemdUserService`] does that with
//! `systemctl --user restart`, bounded by a timeout so a wedged service manager
//! cannot hang the caller.

use crate::error::HyprError;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

/// Something able to restart a named background service.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceRestarter {
    /// Restart `service`, blocking until it finished or failed.
    fn restart(&self, service: &str) -> Result<(), HyprError>;
}

/// Restarts user services through `systemctl --user`.
#[derive(Debug, Clone)]
pub struct SystemdUserService {
    timeout: Duration,
}

impl SystemdUserService {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run_systemctl(&self, service: &str) -> Result<(), HyprError> {
        let restart_error = |reason: String| HyprError::ServiceRestart {
            service: service.to_string(),
            reason,
        };

        tracing::info!("Executing: systemctl --user restart {}", service);
        let start = Instant::now();

        let child = Command::new("systemctl")
            .args(["--user", "restart", service])
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, child)
            .await
            .map_err(|_| {
                tracing::warn!("systemctl timed out after {:?}", self.timeout);
                restart_error(format!("timed out after {:?}", self.timeout))
            })?
            .map_err(|e| restart_error(format!("failed to run systemctl: {e}")))?;

        tracing::info!(
            "systemctl completed in {:.2}s with exit code {:?}",
            start.elapsed().as_secs_f32(),
            output.status.code()
        );

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(restart_error(format!(
                "systemctl exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}

impl Default for SystemdUserService {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl ServiceRestarter for SystemdUserService {
    /// Runs on a private current-thread runtime; must not be called from inside
    /// another tokio runtime.
    fn restart(&self, service: &str) -> Result<(), HyprError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HyprError::ServiceRestart {
                service: service.to_string(),
                reason: format!("failed to start runtime: {e}"),
            })?;

        runtime.block_on(self.run_systemctl(service))
    }
}

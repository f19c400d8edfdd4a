//! Connectivity polling for the optimization service.
//!
//! [`HealthMonitor::spawn`] checks the service once right away and then on a
//! fixed interval, publishing the latest [`ServerStatus`] through a watch
//! channel. Dropping the monitor stops the polling task.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::OptimizerClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    /// No probe has completed yet.
    Checking,
    Connected,
    Disconnected,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checking => "Checking...",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        })
    }
}

pub struct HealthMonitor {
    rx: watch::Receiver<ServerStatus>,
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Start polling `client` every `interval`. Must be called inside a Tokio runtime.
    pub fn spawn(client: OptimizerClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(ServerStatus::Checking);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let status = client.check_health().await;
                let changed = tx.send_if_modified(|current| {
                    let changed = *current != status;
                    *current = status;
                    changed
                });
                if changed {
                    tracing::info!(%status, url = %client.base_url(), "optimizer status changed");
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Latest known status.
    pub fn status(&self) -> ServerStatus {
        *self.rx.borrow()
    }

    /// Wait for the next status change and return it.
    pub async fn changed(&mut self) -> Option<ServerStatus> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

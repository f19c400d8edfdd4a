//! CLI `status` command: optimizer connectivity.

use std::time::Duration;

use anyhow::Result;

use scribe::config::ScribeConfig;
use scribe::optimize::{HealthMonitor, OptimizerClient};

/// Probe the optimizer once, or with `watch` keep polling and print each
/// change until Ctrl-C.
pub async fn status(config: &ScribeConfig, watch: bool) -> Result<()> {
    let client = OptimizerClient::new(&config.optimizer)?;

    if !watch {
        let status = client.check_health().await;
        println!("Server status: {status} ({})", client.base_url());
        return Ok(());
    }

    let base_url = client.base_url().to_string();
    let mut monitor = HealthMonitor::spawn(
        client,
        Duration::from_secs(config.optimizer.health_interval_secs),
    );
    println!("Server status: {} ({base_url})", monitor.status());

    loop {
        tokio::select! {
            changed = monitor.changed() => match changed {
                Some(status) => println!("Server status: {status}"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

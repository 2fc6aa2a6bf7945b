//! Fixed-interval agent loop

use std::time::Duration;

use roost_core::{CoordinationStore, Reconciler, StoreError};
use roost_probe::AdbProbe;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// Ticks forever: probe local device state, then reconcile it into the
/// coordination store. Recoverable store errors abort only the current
/// tick; a lost connection ends the loop.
pub struct Agent<S> {
    probe: AdbProbe,
    reconciler: Reconciler<S>,
    poll_interval: Duration,
}

impl<S: CoordinationStore> Agent<S> {
    pub fn new(probe: AdbProbe, reconciler: Reconciler<S>, poll_interval: Duration) -> Self {
        Self {
            probe,
            reconciler,
            poll_interval,
        }
    }

    pub async fn run(&self) -> Result<(), StoreError> {
        let mut ticker = interval(self.poll_interval);
        info!(
            interval_secs = self.poll_interval.as_secs(),
            path = %self.reconciler.path().leaf(),
            "Agent loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.tick().await {
                        if err.is_fatal() {
                            return Err(err);
                        }
                        warn!(error = %err, "Reconciliation failed, retrying next tick");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested");
                    return Ok(());
                }
            }
        }
    }

    async fn tick(&self) -> Result<(), StoreError> {
        let serial = self.probe.probe().await;
        debug!(serial = ?serial.as_ref().map(|s| s.as_str()), "Reconciling");
        self.reconciler.reconcile(serial.as_ref()).await
    }
}

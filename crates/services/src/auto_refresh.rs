use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::reachability::Reachability;
use crate::sync::SyncService;

/// Periodic forced refresh of the topic set.
///
/// A tick is skipped when the network is unavailable or another refresh is
/// still in flight, so overlapping fires never race on the cache.
#[derive(Debug)]
pub struct AutoRefreshTask {
    handle: JoinHandle<()>,
}

impl AutoRefreshTask {
    /// Spawn the refresh loop on the current tokio runtime.
    #[must_use]
    pub fn spawn(
        sync: SyncService,
        reachability: Reachability,
        url: String,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately;
            // consume it so the loop waits a full period before refreshing.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !reachability.is_available() {
                    debug!("auto refresh tick skipped, network unavailable");
                    continue;
                }
                match sync.refresh_if_idle(&url, true).await {
                    None => debug!("auto refresh tick skipped, refresh already in flight"),
                    Some(Ok(outcome)) => {
                        debug!(origin = ?outcome.origin, "auto refresh completed");
                    }
                    Some(Err(err)) => warn!(error = %err, "auto refresh failed"),
                }
            }
        });
        Self { handle }
    }

    /// Stop firing further refreshes.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for AutoRefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

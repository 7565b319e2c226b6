use tokio::sync::watch;

/// Sender half of the availability signal, handed to the embedding
/// application's network monitor.
pub type ReachabilityMonitor = watch::Sender<bool>;

/// Shared, subscribable view of network availability.
///
/// The external network monitor owns the sender and pushes boolean
/// availability changes; fetchers, the sync service, and the auto-refresh
/// task each hold a cloned receiver.
#[derive(Clone, Debug)]
pub struct Reachability {
    rx: watch::Receiver<bool>,
}

impl Reachability {
    /// Create a new signal with the given initial availability.
    #[must_use]
    pub fn channel(initially_available: bool) -> (ReachabilityMonitor, Self) {
        let (tx, rx) = watch::channel(initially_available);
        (tx, Self { rx })
    }

    /// Whether the network is currently reported as available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the next availability change and return the new value, or
    /// `None` once the monitor has gone away.
    pub async fn next_change(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reflects_pushed_availability() {
        let (monitor, reachability) = Reachability::channel(false);
        assert!(!reachability.is_available());

        monitor.send(true).unwrap();
        assert!(reachability.is_available());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let (monitor, mut reachability) = Reachability::channel(true);
        monitor.send(false).unwrap();
        assert_eq!(reachability.next_change().await, Some(false));

        drop(monitor);
        assert_eq!(reachability.next_change().await, None);
    }
}

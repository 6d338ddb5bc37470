use async_trait::async_trait;
use tokio::sync::watch;

/// Port for network reachability.
#[async_trait]
pub trait ConnectivityMonitor: Send + Sync {
    /// Last known reachability.
    fn is_online(&self) -> bool;

    /// Re-check reachability now, updating the published value.
    async fn check(&self) -> bool;

    /// Subscribe to reachability changes.
    fn subscribe(&self) -> watch::Receiver<bool>;
}

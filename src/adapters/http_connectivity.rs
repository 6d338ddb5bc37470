use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Url};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::config::ConnectivityConfig;
use crate::domain::DomainError;
use crate::ports::ConnectivityMonitor;

/// Reachability monitor that sends HEAD requests to a URL over HTTP.
///
/// Any HTTP response, whatever its status, counts as online; only
/// transport failures and timeouts count as offline.
pub struct HttpConnectivityMonitor {
    client: Client,
    check_url: Url,
    state: watch::Sender<bool>,
}

impl HttpConnectivityMonitor {
    pub fn new(config: &ConnectivityConfig) -> Result<Self, DomainError> {
        let check_url = Url::parse(&config.check_url)
            .map_err(|e| DomainError::Config(format!("Invalid check URL: {}", e)))?;

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.check_timeout_secs.max(1)))
            .user_agent(format!("CurrencySense/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        // Optimistic until the first check says otherwise
        let (state, _) = watch::channel(true);

        info!(check_url = %check_url, "HttpConnectivityMonitor initialized");

        Ok(Self {
            client,
            check_url,
            state,
        })
    }

    /// Record a reachability signal coming from outside the HEAD check, such as
    /// an OS network notification.
    pub fn set_online(&self, online: bool) {
        let changed = self.state.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        });
        if changed {
            info!(online = online, "Connectivity changed");
        }
    }
}

#[async_trait]
impl ConnectivityMonitor for HttpConnectivityMonitor {
    fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    async fn check(&self) -> bool {
        let online = match self
            .client
            .head(self.check_url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
        {
            Ok(response) => {
                debug!(status = %response.status(), "Connectivity check answered");
                true
            }
            Err(e) => {
                warn!(error = %e, "Connectivity check failed");
                false
            }
        };
        self.set_online(online);
        online
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(url: &str) -> ConnectivityConfig {
        ConnectivityConfig {
            check_url: url.to_string(),
            check_timeout_secs: 1,
            poll_interval_secs: 0,
        }
    }

    #[test]
    fn test_invalid_check_url_rejected() {
        let result = HttpConnectivityMonitor::new(&local_config("not a url"));
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[tokio::test]
    async fn test_set_online_notifies_only_on_change() {
        let monitor = HttpConnectivityMonitor::new(&local_config("http://127.0.0.1:9/")).unwrap();
        let mut rx = monitor.subscribe();
        assert!(monitor.is_online());

        monitor.set_online(true);
        assert!(!rx.has_changed().unwrap());

        monitor.set_online(false);
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
        assert!(!monitor.is_online());
    }

    #[tokio::test]
    async fn test_unreachable_host_reports_offline() {
        let monitor = HttpConnectivityMonitor::new(&local_config("http://127.0.0.1:9/")).unwrap();
        assert!(!monitor.check().await);
        assert!(!monitor.is_online());
    }
}

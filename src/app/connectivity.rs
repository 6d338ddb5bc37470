use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::app::AppController;
use crate::ports::ConnectivityMonitor;

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Forward reachability changes from the controller's monitor into the
/// controller, starting with the current value.
pub fn spawn_connectivity_watcher(controller: Arc<AppController>) -> JoinHandle<()> {
    let mut updates = controller.connectivity().subscribe();

    tokio::spawn(async move {
        let initial = *updates.borrow_and_update();
        controller.handle_connectivity_change(initial);

        while updates.changed().await.is_ok() {
            let online = *updates.borrow_and_update();
            controller.handle_connectivity_change(online);
        }
        debug!("Connectivity monitor dropped, watcher stopping");
    })
}

/// Check `monitor` every `period` (at least one second). Results reach the
/// controller through the watcher.
pub fn spawn_connectivity_polling(
    monitor: Arc<dyn ConnectivityMonitor>,
    period: Duration,
) -> JoinHandle<()> {
    let period = period.max(MIN_POLL_INTERVAL);
    info!(period_secs = period.as_secs(), "Starting connectivity polling");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let online = monitor.check().await;
            debug!(online = online, "Connectivity polled");
        }
    })
}

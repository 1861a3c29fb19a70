use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::feed::NotificationFeed;

/// How often the admin shell refreshes the feed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running poll loop. Stopping (or dropping) the handle tears
/// the loop down; no timer outlives the view that started it.
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal the loop to stop and wait for it to finish its current tick.
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Start the background poll loop.
///
/// The first fetch happens immediately, then once per `interval`. While no
/// session exists yet the loop idles; once a session has been seen and later
/// goes away (logout), the loop exits on its own. Restarting after a
/// re-login is the caller's job, the same way the owning view would be
/// remounted.
pub fn spawn_poller(feed: Arc<NotificationFeed>, interval: Duration) -> PollerHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut had_session = false;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop_rx.changed() => {
                    debug!("notification poller stopped");
                    return;
                }
            }

            if feed.has_session() {
                had_session = true;
                feed.fetch().await;
            } else if had_session {
                info!("session ended, notification poller exiting");
                return;
            }
        }
    });

    PollerHandle {
        stop: stop_tx,
        task: Some(task),
    }
}

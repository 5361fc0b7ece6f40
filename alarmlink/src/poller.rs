//! Background status polling

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::client::PanelInner;

/// Handle to a running poll loop
#[derive(Debug)]
pub(crate) struct Poller {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a loop that requests status every `interval`
    ///
    /// The loop holds the client weakly and ends once every handle to it is
    /// gone. A poll that fails is logged by the exchange layer and the loop
    /// carries on.
    pub(crate) fn spawn(panel: Weak<PanelInner>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            info!("Status polling started, every {:?}", interval);

            loop {
                if *shutdown_rx.borrow() {
                    break;
                }

                let Some(panel) = panel.upgrade() else {
                    debug!("Panel dropped, polling ends");
                    break;
                };
                panel.get_status().await;
                drop(panel);

                tokio::select! {
                    _ = sleep(interval) => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Status polling stopped");
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Signal the loop to stop
    ///
    /// A pending sleep ends at once; a poll already on the wire is left to
    /// finish on its own.
    pub(crate) fn stop(self) {
        let _ = self.shutdown_tx.send(true);
    }
}

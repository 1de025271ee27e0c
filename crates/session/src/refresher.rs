use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use therabook_core::SessionTokens;
use therabook_gateway::IdentityGateway;

/// Refresh cadence, chosen to sit safely inside the provider's one-hour
/// token lifetime.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(50 * 60);

/// Proactive session refresher.
///
/// Fires on a fixed cadence while the session lives, exchanging the refresh
/// token for a new pair each tick; a rotated refresh token is used on the
/// next tick. Failures are logged and the cadence continues; a genuinely
/// dead session is caught by the next request's fail-closed check.
///
/// Dropping the refresher (or calling [`SessionRefresher::shutdown`]) stops
/// the cadence within one tick.
pub struct SessionRefresher {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl SessionRefresher {
    pub fn spawn(
        gateway: Arc<dyn IdentityGateway>,
        tokens: SessionTokens,
        interval: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(gateway, tokens, interval, rx));
        Self { tx, task }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }

    pub async fn join(self) {
        let _ = self.task.await;
    }
}

async fn run(
    gateway: Arc<dyn IdentityGateway>,
    mut tokens: SessionTokens,
    interval: Duration,
    mut rx: mpsc::UnboundedReceiver<()>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    loop {
        tokio::select! {
            // Explicit shutdown, or the handle was dropped.
            _ = rx.recv() => return,
            _ = ticker.tick() => {
                match gateway.refresh_session(&tokens.refresh_token).await {
                    Ok(rotated) => {
                        tracing::debug!("session refreshed ahead of expiry");
                        tokens = rotated;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "proactive session refresh failed");
                    }
                }
            }
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use therabook_core::SessionTokens;
use therabook_gateway::IdentityGateway;

/// Default inactivity timeout before auto sign-out.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default head start the warning callback gets before the logout fires.
pub const DEFAULT_WARNING_WINDOW: Duration = Duration::from_secs(2 * 60);

/// User-activity kinds that reset the inactivity timers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

/// Configuration and callbacks for one monitor instance.
///
/// `on_warning` receives the remaining seconds until logout; `on_logout`
/// runs after the gateway sign-out attempt. Both are invoked at most once
/// per timer cycle.
pub struct MonitorConfig {
    pub timeout: Duration,
    pub warning_window: Duration,
    pub on_warning: Option<Box<dyn Fn(u64) + Send>>,
    pub on_logout: Option<Box<dyn FnOnce() + Send>>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            warning_window: DEFAULT_WARNING_WINDOW,
            on_warning: None,
            on_logout: None,
        }
    }
}

enum Command {
    Activity(ActivityKind),
    Shutdown,
}

/// Inactivity watchdog for an authenticated client session.
///
/// Runs as a background task. Any reported activity restarts both the
/// warning and the logout timer from zero; a warning that has already fired
/// is re-armed by the same reset. When the full timeout elapses the gateway
/// sign-out is invoked, then the logout callback, and the task ends.
///
/// Dropping the monitor (or calling [`InactivityMonitor::shutdown`]) tears
/// the task down without firing any callback.
pub struct InactivityMonitor {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl InactivityMonitor {
    pub fn spawn(
        gateway: Arc<dyn IdentityGateway>,
        tokens: SessionTokens,
        config: MonitorConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(gateway, tokens, config, rx));
        Self { tx, task }
    }

    /// Report a tracked activity event; resets both timers.
    pub fn activity(&self, kind: ActivityKind) {
        let _ = self.tx.send(Command::Activity(kind));
    }

    /// Tear down without signing out or firing callbacks.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);
    }

    /// Wait for the task to finish (after logout or shutdown).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

async fn run(
    gateway: Arc<dyn IdentityGateway>,
    tokens: SessionTokens,
    config: MonitorConfig,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let MonitorConfig {
        timeout,
        warning_window,
        on_warning,
        mut on_logout,
    } = config;

    // A warning only makes sense strictly inside the timeout.
    let warning_enabled =
        on_warning.is_some() && warning_window > Duration::ZERO && warning_window < timeout;

    let started = Instant::now();
    let mut warn_at = started + timeout.saturating_sub(warning_window);
    let mut logout_at = started + timeout;
    let mut warned = !warning_enabled;

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Activity(kind)) => {
                    tracing::trace!(?kind, "activity observed; inactivity timers reset");
                    let now = Instant::now();
                    warn_at = now + timeout.saturating_sub(warning_window);
                    logout_at = now + timeout;
                    warned = !warning_enabled;
                }
                // Teardown: clear timers, fire nothing.
                Some(Command::Shutdown) | None => return,
            },
            _ = time::sleep_until(warn_at), if !warned => {
                warned = true;
                if let Some(on_warning) = &on_warning {
                    on_warning(warning_window.as_secs());
                }
            }
            _ = time::sleep_until(logout_at) => {
                tracing::info!("inactivity timeout reached; signing session out");
                if let Err(error) = gateway.sign_out(&tokens).await {
                    // Attempted, not swallowed silently.
                    tracing::warn!(%error, "sign-out on inactivity logout failed");
                }
                if let Some(on_logout) = on_logout.take() {
                    on_logout();
                }
                return;
            }
        }
    }
}

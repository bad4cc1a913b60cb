//! Connection/auth monitor
//!
//! A background task polls `GET /health` and, when the backend is
//! reachable and a token is stored, probes `GET /auth/me` to confirm the
//! token still resolves to a user. The three derived flags are republished
//! through a watch channel after every tick.
//!
//! Ticks never overlap: the loop awaits both probes before the interval is
//! re-armed. The task is aborted when the monitor is dropped, so no poll
//! can outlive its owner.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::AuthState;
use crate::ports::FinanceApi;

use super::AuthStateStore;

/// Cadence for connection-only monitoring
pub const CONNECTION_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Cadence for connection + auth monitoring
pub const AUTH_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Derived reachability/auth flags, recomputed each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    pub is_connected: bool,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            is_connected: false,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

/// Handle to a running monitor task
///
/// Dropping the monitor cancels the task.
pub struct ConnectionMonitor {
    state_rx: watch::Receiver<ConnectionState>,
    handle: JoinHandle<()>,
}

impl ConnectionMonitor {
    /// Monitor backend reachability only (5s cadence)
    pub fn connection_only(api: Arc<dyn FinanceApi>) -> Self {
        Self::spawn(api, None, CONNECTION_POLL_INTERVAL)
    }

    /// Monitor reachability and token validity (10s cadence)
    pub fn with_auth(api: Arc<dyn FinanceApi>, auth: Arc<AuthStateStore>) -> Self {
        Self::spawn(api, Some(auth), AUTH_POLL_INTERVAL)
    }

    /// Spawn a monitor with an explicit cadence
    pub fn spawn(
        api: Arc<dyn FinanceApi>,
        auth: Option<Arc<AuthStateStore>>,
        poll_interval: Duration,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(ConnectionState::default());
        let mut auth_events = auth.as_ref().map(|a| a.subscribe());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let next = run_tick(api.as_ref(), auth.as_deref()).await;
                        debug!(
                            "monitor tick: connected={} authenticated={}",
                            next.is_connected, next.is_authenticated
                        );
                        state_tx.send_replace(next);
                    }
                    Some(event) = next_auth_event(&mut auth_events) => {
                        // A forced logout is reflected immediately instead of
                        // waiting out the poll interval
                        if !event.is_authenticated {
                            let mut state = *state_tx.borrow();
                            state.is_authenticated = false;
                            state_tx.send_replace(state);
                        }
                    }
                }
            }
        });

        Self { state_rx, handle }
    }

    /// Current flags
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Watch for flag changes
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Stop polling
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One poll cycle: health first, then the user probe if warranted
async fn run_tick(api: &dyn FinanceApi, auth: Option<&AuthStateStore>) -> ConnectionState {
    if api.health_check().await.is_error() {
        return ConnectionState {
            is_connected: false,
            is_authenticated: false,
            is_loading: false,
        };
    }

    let is_authenticated = match auth {
        Some(auth) if auth.token().is_some() => api.get_current_user().await.is_data(),
        _ => false,
    };

    ConnectionState {
        is_connected: true,
        is_authenticated,
        is_loading: false,
    }
}

/// Await the next auth event, or pend forever when no bus is attached
async fn next_auth_event(
    events: &mut Option<broadcast::Receiver<AuthState>>,
) -> Option<AuthState> {
    loop {
        match events {
            Some(receiver) => match receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    *events = None;
                }
            },
            None => return std::future::pending().await,
        }
    }
}

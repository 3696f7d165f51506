use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::entity::{ApiError, PendingTransaction};
use crate::interactor::MultiSigInteractor;

/// What the watcher currently knows about transactions awaiting my approval
#[derive(Debug, Clone, Default)]
pub struct WatcherSnapshot {
    /// `None` until the first configuration check completes
    pub configured: Option<bool>,
    pub pending: Vec<PendingTransaction>,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Ticket of the fetch that produced this snapshot
    pub revision: u64,
}

struct WatcherInner {
    interactor: Arc<dyn MultiSigInteractor>,
    state: watch::Sender<WatcherSnapshot>,
    next_ticket: AtomicU64,
}

impl WatcherInner {
    async fn refresh(&self) -> Result<(), ApiError> {
        // Take a ticket before any await so concurrent cycles are ordered
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        // Check configuration first, the pending endpoint is not touched otherwise
        let configured = match self.interactor.is_configured().await {
            Ok(configured) => configured,
            Err(e) => {
                self.apply(ticket, |s| s.last_error = Some(e.user_message()));
                return Err(e);
            }
        };

        if !configured {
            debug!("Multi-signature not configured, skipping pending approvals");
            self.apply_not_configured(ticket);
            return Ok(());
        }

        match self.interactor.pending_approvals().await {
            Ok(transactions) => {
                // Only entries the signer can still act on
                let now = Utc::now();
                let pending: Vec<PendingTransaction> = transactions
                    .into_iter()
                    .filter(|tx| tx.is_actionable(now))
                    .collect();
                let count = pending.len();

                if self.apply(ticket, move |s| {
                    s.configured = Some(true);
                    s.pending = pending;
                    s.last_error = None;
                    s.last_updated = Some(now);
                }) {
                    debug!("{} transaction(s) awaiting approval", count);
                }
                Ok(())
            }
            // Backend has no multi-signature row for the user
            Err(e) if e.is_not_configured() => {
                self.apply_not_configured(ticket);
                Ok(())
            }
            // Keep the previous list, only surface the error
            Err(e) => {
                self.apply(ticket, |s| s.last_error = Some(e.user_message()));
                Err(e)
            }
        }
    }

    fn apply_not_configured(&self, ticket: u64) {
        self.apply(ticket, |s| {
            s.configured = Some(false);
            s.pending.clear();
            s.last_error = None;
            s.last_updated = Some(Utc::now());
        });
    }

    /// Publishes the update unless a newer fetch already landed
    fn apply(&self, ticket: u64, update: impl FnOnce(&mut WatcherSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if ticket <= snapshot.revision {
                debug!(
                    "Discarding stale result #{} (current #{})",
                    ticket, snapshot.revision
                );
                return false;
            }
            snapshot.revision = ticket;
            update(snapshot);
            true
        })
    }
}

/// Polls the transactions awaiting my signature and exposes approve/reject/cancel.
///
/// Nothing is requested from the pending endpoint while multi-signature is not
/// configured. Every decision is followed by a full refetch instead of patching
/// the local list. Stopping or dropping the watcher ends the polling task.
pub struct MultiSigWatcher {
    inner: Arc<WatcherInner>,
    poll_interval: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MultiSigWatcher {
    pub fn new(interactor: Arc<dyn MultiSigInteractor>, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(WatcherSnapshot::default());
        Self {
            inner: Arc::new(WatcherInner {
                interactor,
                state,
                next_ticket: AtomicU64::new(0),
            }),
            poll_interval,
            stop_tx: None,
            handle: None,
        }
    }

    pub fn snapshot(&self) -> WatcherSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WatcherSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Runs a single poll cycle
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.inner.refresh().await
    }

    // Start polling in the background, first poll happens immediately
    pub fn start(&mut self) {
        if self.stop_tx.is_some() {
            warn!("Multi-signature watcher is already running");
            return;
        }

        // Create a channel for stopping the watcher
        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let inner = self.inner.clone();
        let period = self.poll_interval;

        self.handle = Some(tokio::spawn(async move {
            // First tick fires immediately, later ones wait a full period
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                select! {
                    // Poll, but give up on the in-flight request if asked to stop
                    _ = ticker.tick() => {
                        select! {
                            result = inner.refresh() => {
                                if let Err(e) = result {
                                    error!("Failed to refresh pending approvals: {}", e);
                                }
                            }
                            _ = stop_rx.recv() => break,
                        }
                    }
                    // Stop signal, or the watcher was dropped
                    _ = stop_rx.recv() => break,
                }
            }

            info!("Multi-signature watcher stopped");
        }));

        info!(
            "Multi-signature watcher started (interval: {:?})",
            self.poll_interval
        );
    }

    // Stop polling; no request is issued once this returns
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
        }

        // Wait for the task so nothing runs after we return
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!("Multi-signature watcher task failed: {}", e);
                }
            }
        }
    }

    pub async fn approve(
        &self,
        id: &str,
        message: Option<String>,
    ) -> Result<PendingTransaction, ApiError> {
        // Full refetch instead of patching the local list
        let tx = self.inner.interactor.approve(id, message).await?;
        self.refresh_after("approve").await;
        Ok(tx)
    }

    pub async fn reject(
        &self,
        id: &str,
        reason: Option<String>,
    ) -> Result<PendingTransaction, ApiError> {
        let tx = self.inner.interactor.reject(id, reason).await?;
        self.refresh_after("reject").await;
        Ok(tx)
    }

    pub async fn cancel(&self, id: &str) -> Result<PendingTransaction, ApiError> {
        let tx = self.inner.interactor.cancel(id).await?;
        self.refresh_after("cancel").await;
        Ok(tx)
    }

    async fn refresh_after(&self, action: &str) {
        if let Err(e) = self.inner.refresh().await {
            warn!("Refresh after {} failed: {}", action, e);
        }
    }
}

impl Drop for MultiSigWatcher {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

//! Cancellable polling subscriptions
//!
//! A subscription is a spawned task owned by a handle. Dropping the handle
//! aborts the task, so a forgotten subscription cannot keep polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::cache::PriceCache;

/// Deregistration handle for a polling subscription
pub struct PriceSubscription {
    handle: JoinHandle<()>,
}

impl PriceSubscription {
    /// Stop the periodic task; no further callback invocations happen
    pub fn unsubscribe(self) {
        self.handle.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PriceSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl PriceCache {
    /// Invoke `callback` with the current price once immediately, then once
    /// per `cadence` tick, until the returned handle is dropped
    pub fn subscribe<F>(self: &Arc<Self>, cadence: Duration, mut callback: F) -> PriceSubscription
    where
        F: FnMut(f64) + Send + 'static,
    {
        let cache = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // The first tick completes immediately, which gives the
            // subscriber its registration-time invocation.
            loop {
                interval.tick().await;
                let price = cache.current_price().await;
                callback(price);
            }
        });

        PriceSubscription { handle }
    }

    /// Channel-flavored subscription for stream consumers
    ///
    /// Same cadence semantics as [`subscribe`](Self::subscribe); the task
    /// also exits on its own once the receiver is dropped.
    pub fn subscribe_channel(
        self: &Arc<Self>,
        cadence: Duration,
    ) -> (PriceSubscription, mpsc::Receiver<f64>) {
        let (tx, rx) = mpsc::channel(16);
        let cache = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let price = cache.current_price().await;
                if tx.send(price).await.is_err() {
                    debug!("price subscriber went away, stopping poll task");
                    break;
                }
            }
        });

        (PriceSubscription { handle }, rx)
    }
}

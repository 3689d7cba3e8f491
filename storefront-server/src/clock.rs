//! Shared time ticker
//!
//! Many parts of the system want periodic time updates: the availability
//! watcher, cache refreshers, anything rendering "opens at" hints. Running
//! one timer per consumer would be a timer storm; this module runs exactly
//! one interval process-wide and fans fresh [`TimeData`] out to registered
//! listeners.
//!
//! Listeners are called on the ticker task, in registration order, and once
//! immediately upon registration so late subscribers are not stale until
//! the next tick. Callbacks must not block; spawn if the reaction is async.
//! When the last listener is removed the interval task is torn down; the
//! next registration starts a fresh one.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use parking_lot::Mutex;
use shared::time::TimeData;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Boxed listener callback
pub type ListenerFn = Box<dyn Fn(TimeData) + Send + Sync>;

struct Registered {
    id: String,
    callback: Arc<ListenerFn>,
}

struct Inner {
    listeners: Vec<Registered>,
    cancel: Option<CancellationToken>,
}

/// The process-wide ticker
pub struct TimeTicker {
    tz: Tz,
    period: Duration,
    inner: Mutex<Inner>,
}

impl TimeTicker {
    pub fn new(tz: Tz, period: Duration) -> Self {
        Self {
            tz,
            period,
            inner: Mutex::new(Inner {
                listeners: Vec::new(),
                cancel: None,
            }),
        }
    }

    /// Start the shared interval task. Idempotent: only the first call (or
    /// the first after a teardown) spawns anything.
    pub fn init(self: &Arc<Self>) {
        let mut inner = self.inner.lock();
        if inner.cancel.is_some() {
            return;
        }
        let cancel = CancellationToken::new();
        inner.cancel = Some(cancel.clone());
        drop(inner);

        let ticker = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ticker.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; listeners already got
            // their registration-time call, so swallow it.
            interval.tick().await;
            tracing::debug!(period_secs = ticker.period.as_secs(), "Time ticker started");
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("Time ticker stopped");
                        return;
                    }
                    _ = interval.tick() => ticker.tick(),
                }
            }
        });
    }

    /// Register a listener under `id`, replacing any previous listener with
    /// the same id, and invoke it once with fresh time data.
    pub fn add_listener<F>(self: &Arc<Self>, id: &str, callback: F)
    where
        F: Fn(TimeData) + Send + Sync + 'static,
    {
        let callback: Arc<ListenerFn> = Arc::new(Box::new(callback));
        {
            let mut inner = self.inner.lock();
            inner.listeners.retain(|r| r.id != id);
            inner.listeners.push(Registered {
                id: id.to_string(),
                callback: callback.clone(),
            });
        }
        callback(TimeData::now_in(self.tz));
        self.init();
    }

    /// Deregister. When the set becomes empty the interval task is stopped.
    pub fn remove_listener(&self, id: &str) {
        let mut inner = self.inner.lock();
        inner.listeners.retain(|r| r.id != id);
        if inner.listeners.is_empty()
            && let Some(cancel) = inner.cancel.take()
        {
            cancel.cancel();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().cancel.is_some()
    }

    /// One tick: compute fresh time data once, fan it out.
    ///
    /// The listener list is snapshotted so a callback mutating the registry
    /// cannot deadlock the fan-out.
    fn tick(&self) {
        let data = TimeData::now_in(self.tz);
        let callbacks: Vec<Arc<ListenerFn>> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|r| r.callback.clone())
            .collect();
        for callback in callbacks {
            callback(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::time::DEFAULT_TIMEZONE;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn ticker(period_secs: u64) -> Arc<TimeTicker> {
        Arc::new(TimeTicker::new(
            DEFAULT_TIMEZONE,
            Duration::from_secs(period_secs),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn listener_fires_immediately_on_registration() {
        let ticker = ticker(60);
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        ticker.add_listener("badge", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_fan_out_to_all_listeners() {
        let ticker = ticker(60);
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        let c = first.clone();
        ticker.add_listener("first", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = second.clone();
        ticker.add_listener("second", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        // Two paused-time ticks.
        tokio::time::sleep(Duration::from_secs(121)).await;
        tokio::task::yield_now().await;

        assert_eq!(first.load(Ordering::SeqCst), 3); // immediate + 2 ticks
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn removing_the_last_listener_stops_the_interval() {
        let ticker = ticker(60);
        ticker.add_listener("only", |_| {});
        assert!(ticker.is_running());

        ticker.remove_listener("only");
        assert_eq!(ticker.listener_count(), 0);
        assert!(!ticker.is_running());

        // Re-registering restarts it.
        ticker.add_listener("again", |_| {});
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn registering_the_same_id_replaces_the_listener() {
        let ticker = ticker(60);
        let old = Arc::new(AtomicU32::new(0));
        let new = Arc::new(AtomicU32::new(0));

        let c = old.clone();
        ticker.add_listener("menu", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = new.clone();
        ticker.add_listener("menu", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(ticker.listener_count(), 1);

        tokio::time::sleep(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;

        // Old listener saw only its registration call.
        assert_eq!(old.load(Ordering::SeqCst), 1);
        assert_eq!(new.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn init_is_idempotent() {
        let ticker = ticker(60);
        ticker.add_listener("a", |_| {});
        ticker.init();
        ticker.init();
        assert!(ticker.is_running());
        assert_eq!(ticker.listener_count(), 1);
    }
}

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

/// Identifies one armed timer. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PendingToken(u64);

#[derive(Default)]
struct Pending {
    last_token: u64,
    current: Option<(PendingToken, JoinHandle<()>)>,
}

/// Delays a commit until no new value has arrived for `delay`.
///
/// Every `submit` discards the pending timer and arms a new one carrying only
/// the latest value; superseded values are dropped, never queued.
pub struct Debouncer<T> {
    delay: Duration,
    commit: Arc<dyn Fn(T) + Send + Sync>,
    pending: Arc<Mutex<Pending>>,
}

fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    // A panicking commit callback must not wedge the search box.
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, commit: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            commit: Arc::new(commit),
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn submit(&self, value: T) -> PendingToken {
        let mut pending = lock(&self.pending);
        if let Some((stale, handle)) = pending.current.take() {
            handle.abort();
            tracing::trace!(token = stale.0, "debounce timer superseded");
        }

        pending.last_token += 1;
        let token = PendingToken(pending.last_token);

        let delay = self.delay;
        let commit = Arc::clone(&self.commit);
        let shared = Arc::clone(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let still_current = {
                let mut pending = lock(&shared);
                let is_current = matches!(pending.current, Some((current, _)) if current == token);
                if is_current {
                    pending.current = None;
                }
                is_current
            };
            if still_current {
                commit(value);
            }
        });

        pending.current = Some((token, handle));
        token
    }

    /// Discards the pending timer, if any, before it fires.
    pub fn cancel(&self) -> Option<PendingToken> {
        let (token, handle) = lock(&self.pending).current.take()?;
        handle.abort();
        Some(token)
    }

    pub fn pending(&self) -> Option<PendingToken> {
        lock(&self.pending).current.as_ref().map(|(token, _)| *token)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some((_, handle)) = lock(&self.pending).current.take() {
            handle.abort();
        }
    }
}

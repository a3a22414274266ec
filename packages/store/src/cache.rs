//! # Query cache: keyed results with freshness, invalidation and de-duplication
//!
//! [`QueryCache`] remembers the last result of every keyed query the UI has run
//! (the signed-in user's profile, the region list, ...). It is deliberately
//! free of any UI framework: the `ui` crate wraps it in a shared cell and
//! drives it from its hooks.
//!
//! ## Lookup protocol
//!
//! Callers ask [`QueryCache::lookup`] before fetching and act on the returned
//! [`Lookup`]:
//!
//! | Variant | Meaning | Caller does |
//! |---------|---------|-------------|
//! | [`Lookup::Fresh`] | Data present, not invalidated, younger than `stale_time`. | Use it. |
//! | [`Lookup::Wait`] | Another fetch for this key is in flight. | Await the receiver. |
//! | [`Lookup::Fetch`] | Nothing usable; the entry is now marked in flight. | Fetch, then [`resolve`](QueryCache::resolve) (or [`abandon`](QueryCache::abandon)). |
//!
//! A key therefore has at most one request in flight at a time. Waiters are
//! woken with the same result the fetching caller resolves with. When a fetch
//! is abandoned (its future dropped) the waiters' senders are dropped too and
//! they are expected to look up again.
//!
//! ## Freshness
//!
//! Each entry records the [`QueryOptions`] it was last looked up with. With the
//! default `stale_time` of zero an entry is never fresh, so every lookup that
//! is not de-duplicated refetches. [`invalidate`](QueryCache::invalidate) forces
//! the next lookup to refetch regardless of age, and
//! [`invalidate_on_focus`](QueryCache::invalidate_on_focus) does so for stale
//! entries that opted into refetch-on-window-focus.
//!
//! ## Values
//!
//! Results are stored type-erased as [`QueryData`]; [`QueryCache::get`]
//! downcasts back to the concrete type. Errors are cached alongside (previous
//! data is kept when a refetch fails).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::channel::oneshot;

/// Type-erased cached value.
pub type QueryData = Arc<dyn Any + Send + Sync>;

/// Identifier of a cached query, e.g. `["userProfile"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Per-query caching behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long a result counts as fresh. Zero means always stale.
    pub stale_time: Duration,
    /// Whether a stale entry is refetched when the window regains focus.
    pub refetch_on_window_focus: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            refetch_on_window_focus: true,
        }
    }
}

impl QueryOptions {
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_refetch_on_window_focus(mut self, refetch: bool) -> Self {
        self.refetch_on_window_focus = refetch;
        self
    }
}

/// Result of [`QueryCache::lookup`].
pub enum Lookup<E> {
    Fresh(QueryData),
    Wait(oneshot::Receiver<Result<QueryData, E>>),
    Fetch,
}

impl<E> fmt::Debug for Lookup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Fresh(_) => f.write_str("Fresh"),
            Lookup::Wait(_) => f.write_str("Wait"),
            Lookup::Fetch => f.write_str("Fetch"),
        }
    }
}

struct Entry<E> {
    data: Option<QueryData>,
    error: Option<E>,
    updated_at: Option<u64>,
    invalidated: bool,
    options: QueryOptions,
    /// `Some` while a fetch is in flight.
    waiters: Option<Vec<oneshot::Sender<Result<QueryData, E>>>>,
}

impl<E> Entry<E> {
    fn new(options: QueryOptions) -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            options,
            waiters: None,
        }
    }

    fn is_stale(&self, now_ms: u64) -> bool {
        let Some(updated_at) = self.updated_at else {
            return true;
        };
        let age = now_ms.saturating_sub(updated_at);
        self.invalidated || u128::from(age) >= self.options.stale_time.as_millis()
    }
}

/// Keyed query results. Single-owner; wrap it for sharing.
pub struct QueryCache<E> {
    entries: HashMap<QueryKey, Entry<E>>,
}

impl<E> Default for QueryCache<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E: Clone> QueryCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&mut self, key: &QueryKey, options: QueryOptions, now_ms: u64) -> Lookup<E> {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(options));
        entry.options = options;

        if let Some(waiters) = entry.waiters.as_mut() {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            return Lookup::Wait(rx);
        }

        if let Some(data) = &entry.data {
            if !entry.is_stale(now_ms) {
                return Lookup::Fresh(data.clone());
            }
        }

        entry.waiters = Some(Vec::new());
        Lookup::Fetch
    }

    /// Store the outcome of a fetch started by [`Lookup::Fetch`] and wake waiters.
    pub fn resolve(&mut self, key: &QueryKey, result: Result<QueryData, E>, now_ms: u64) {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(QueryOptions::default()));

        let waiters = entry.waiters.take().unwrap_or_default();
        match &result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.error = None;
                entry.updated_at = Some(now_ms);
                entry.invalidated = false;
            }
            Err(error) => {
                entry.error = Some(error.clone());
            }
        }
        tracing::debug!(%key, ok = result.is_ok(), waiters = waiters.len(), "query resolved");

        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }

    /// Clear the in-flight marker without a result. Pending waiters observe a
    /// cancelled channel.
    pub fn abandon(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.waiters = None;
        }
    }

    /// Mark an entry so that its next lookup refetches. Returns whether the key
    /// was known.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    /// Invalidate every stale entry that refetches on window focus.
    pub fn invalidate_on_focus(&mut self, now_ms: u64) -> Vec<QueryKey> {
        let mut invalidated = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.options.refetch_on_window_focus && entry.data.is_some() && entry.is_stale(now_ms) {
                entry.invalidated = true;
                invalidated.push(key.clone());
            }
        }
        invalidated
    }

    pub fn get<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let data = self.entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    pub fn error(&self, key: &QueryKey) -> Option<E> {
        self.entries.get(key)?.error.clone()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.waiters.is_some())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Milliseconds since the Unix epoch.
///
/// Uses `js_sys::Date::now()` in the browser, where `std::time` has no clock.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

//! Cached queries and mutations on top of [`store::QueryCache`].
//!
//! [`SharedCache`] is the framework-free part: it runs a fetch through the
//! cache's lookup protocol, so concurrent readers of one key share a single
//! request and a dropped fetch releases whoever was waiting on it.
//! [`QueryClient`] adds a revision signal: invalidation bumps it, every
//! [`use_query`] resource reads it, and stale or invalidated entries refetch.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use api::ApiError;
use dioxus::prelude::*;
use store::{now_millis, Lookup, QueryCache, QueryData, QueryKey, QueryOptions};

/// Shared handle to the query cache. Never borrowed across an `.await`.
#[derive(Clone, Default)]
pub struct SharedCache(Rc<RefCell<QueryCache<ApiError>>>);

impl SharedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `key`, running `fetch` only if no fresh value exists and no
    /// other fetch for the key is in flight.
    pub async fn fetch<T, Fut>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
        fetch: Fut,
    ) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut fetch = Some(fetch);
        let data = loop {
            let lookup = self.0.borrow_mut().lookup(key, options, now_millis());
            match lookup {
                Lookup::Fresh(data) => break Ok(data),
                Lookup::Wait(rx) => match rx.await {
                    Ok(result) => break result,
                    // The fetching caller went away; look again.
                    Err(_) => continue,
                },
                Lookup::Fetch => {
                    let Some(request) = fetch.take() else {
                        self.0.borrow_mut().abandon(key);
                        break Err(ApiError::Request(format!("query {key} could not be started")));
                    };
                    let mut guard = InFlight {
                        cache: self,
                        key,
                        armed: true,
                    };
                    let result = request.await.map(|value| Arc::new(value) as QueryData);
                    guard.armed = false;
                    self.0.borrow_mut().resolve(key, result.clone(), now_millis());
                    break result;
                }
            }
        }?;

        data.downcast::<T>()
            .map_err(|_| ApiError::Decode(format!("cached value for {key} has an unexpected type")))
    }

    pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.0.borrow().get(key)
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.0.borrow().is_fetching(key)
    }

    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.0.borrow_mut().invalidate(key)
    }

    pub fn invalidate_on_focus(&self) -> Vec<QueryKey> {
        self.0.borrow_mut().invalidate_on_focus(now_millis())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Releases the in-flight marker if a fetch future is dropped mid-request.
struct InFlight<'a> {
    cache: &'a SharedCache,
    key: &'a QueryKey,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut cache) = self.cache.0.try_borrow_mut() {
            tracing::debug!(key = %self.key, "query abandoned");
            cache.abandon(self.key);
        }
    }
}

/// Query cache plus the revision signal query resources subscribe to.
#[derive(Clone)]
pub struct QueryClient {
    cache: SharedCache,
    revision: Signal<u64>,
}

impl QueryClient {
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Force the next read of `key` to refetch.
    pub fn invalidate(&self, key: &QueryKey) {
        if self.cache.invalidate(key) {
            tracing::debug!(%key, "query invalidated");
            self.bump();
        }
    }

    /// Refetch stale queries that opted into refetch-on-focus.
    pub fn refetch_on_focus(&self) {
        let keys = self.cache.invalidate_on_focus();
        if !keys.is_empty() {
            tracing::debug!(count = keys.len(), "window focused, refetching stale queries");
            self.bump();
        }
    }

    /// Wake query resources after entries were invalidated through
    /// [`QueryClient::cache`].
    pub fn refresh(&self) {
        self.bump();
    }

    /// Drop every cached result.
    pub fn reset(&self) {
        self.cache.clear();
        self.bump();
    }

    fn bump(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    fn subscribe(&self) -> u64 {
        (self.revision)()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// Provides the [`QueryClient`] to its children.
#[component]
pub fn QueryClientProvider(children: Element) -> Element {
    let revision = use_signal(|| 0u64);
    let client = use_context_provider(|| QueryClient {
        cache: SharedCache::new(),
        revision,
    });

    use_hook(move || {
        #[cfg(target_arch = "wasm32")]
        listen_for_window_focus(client.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let _ = &client;
    });

    rsx! {
        {children}
    }
}

#[cfg(target_arch = "wasm32")]
fn listen_for_window_focus(client: QueryClient) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_focus = Closure::<dyn FnMut()>::new(move || client.refetch_on_focus());
    if let Err(e) =
        window.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref())
    {
        tracing::warn!("Failed to listen for window focus: {:?}", e);
    }
    on_focus.forget();
}

/// Current state of a cached query.
pub enum QueryState<T> {
    /// Disabled, nothing requested.
    Idle,
    Loading,
    Ready(Arc<T>),
    Failed(ApiError),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Ready(data) => QueryState::Ready(data.clone()),
            QueryState::Failed(err) => QueryState::Failed(err.clone()),
        }
    }
}

impl<T> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryState::Idle => f.write_str("Idle"),
            QueryState::Loading => f.write_str("Loading"),
            QueryState::Ready(_) => f.write_str("Ready"),
            QueryState::Failed(err) => write!(f, "Failed({err})"),
        }
    }
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<Arc<T>> {
        match self {
            QueryState::Ready(data) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

/// Run `fetch` through the query cache under `key` while `enabled` holds.
///
/// Re-runs when `enabled` reads a changed signal or when the query client is
/// invalidated; fresh cached values are served without a request.
pub fn use_query<T, E, F, Fut>(key: QueryKey, options: QueryOptions, enabled: E, fetch: F) -> QueryState<T>
where
    T: Send + Sync + 'static,
    E: Fn() -> bool + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let resource = use_resource(move || {
        let client = client.clone();
        let key = key.clone();
        let _revision = client.subscribe();
        let request = enabled().then(|| fetch());
        async move {
            let Some(request) = request else {
                return QueryState::Idle;
            };
            match client.cache().fetch::<T, _>(&key, options, request).await {
                Ok(data) => QueryState::Ready(data),
                Err(err) => QueryState::Failed(err),
            }
        }
    });

    let state = (*resource.read()).clone();
    state.unwrap_or(QueryState::Loading)
}

/// State of an on-demand operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationState<O> {
    Idle,
    Pending,
    Success(O),
    Failed(ApiError),
}

impl<O> MutationState<O> {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    pub fn data(&self) -> Option<&O> {
        match self {
            MutationState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            MutationState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Handle returned by [`use_mutation`].
pub struct UseMutation<I: 'static, O: 'static> {
    state: Signal<MutationState<O>>,
    run: Callback<I>,
}

impl<I: 'static, O: 'static> Clone for UseMutation<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static, O: 'static> Copy for UseMutation<I, O> {}

impl<I: 'static, O: Clone + 'static> UseMutation<I, O> {
    /// Start the operation. The previous result is replaced.
    pub fn mutate(&self, input: I) {
        self.run.call(input);
    }

    pub fn state(&self) -> MutationState<O> {
        (self.state)()
    }

    pub fn is_pending(&self) -> bool {
        self.state.read().is_pending()
    }
}

/// Wrap an async operation so components can trigger it and render its state.
pub fn use_mutation<I, O, F, Fut>(mut operation: F) -> UseMutation<I, O>
where
    I: 'static,
    O: 'static,
    F: FnMut(I) -> Fut + 'static,
    Fut: Future<Output = Result<O, ApiError>> + 'static,
{
    let mut state = use_signal(|| MutationState::Idle);
    let run = use_callback(move |input: I| {
        state.set(MutationState::Pending);
        let request = operation(input);
        spawn(async move {
            let next = match request.await {
                Ok(output) => MutationState::Success(output),
                Err(err) => MutationState::Failed(err),
            };
            state.set(next);
        });
    });

    UseMutation { state, run }
}

/// Await `request`, logging instead of returning its failure.
pub async fn log_failure<Fut>(what: &str, request: Fut)
where
    Fut: Future<Output = Result<(), ApiError>>,
{
    if let Err(err) = request.await {
        tracing::warn!(error = %err, "{} failed", what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn five_minutes() -> QueryOptions {
        QueryOptions::default().with_stale_time(Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = SharedCache::new();
        let key = QueryKey::new("regions");
        let calls = Rc::new(Cell::new(0));

        let request = |value: u32| {
            let calls = calls.clone();
            async move {
                calls.set(calls.get() + 1);
                tokio::task::yield_now().await;
                Ok::<u32, ApiError>(value)
            }
        };

        let (first, second) = futures::join!(
            cache.fetch::<u32, _>(&key, QueryOptions::default(), request(1)),
            cache.fetch::<u32, _>(&key, QueryOptions::default(), request(2)),
        );

        assert_eq!(*first.unwrap(), 1);
        assert_eq!(*second.unwrap(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_fresh_value_is_served_from_cache() {
        let cache = SharedCache::new();
        let key = QueryKey::new("regions");

        cache
            .fetch::<u32, _>(&key, five_minutes(), async { Ok(1) })
            .await
            .unwrap();
        let again = cache
            .fetch::<u32, _>(&key, five_minutes(), async { Ok(2) })
            .await
            .unwrap();
        assert_eq!(*again, 1);
        assert_eq!(cache.get::<u32>(&key).as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn test_dropped_fetch_does_not_block_next_reader() {
        let cache = SharedCache::new();
        let key = QueryKey::new("userProfile");

        let mut stuck = Box::pin(cache.fetch::<u32, _>(
            &key,
            QueryOptions::default(),
            futures::future::pending::<Result<u32, ApiError>>(),
        ));
        assert!(futures::poll!(stuck.as_mut()).is_pending());
        assert!(cache.is_fetching(&key));

        drop(stuck);
        assert!(!cache.is_fetching(&key));

        let value = cache
            .fetch::<u32, _>(&key, QueryOptions::default(), async { Ok(5) })
            .await
            .unwrap();
        assert_eq!(*value, 5);
    }

    #[tokio::test]
    async fn test_errors_reach_every_reader() {
        let cache = SharedCache::new();
        let key = QueryKey::new("regions");

        let failing = async {
            tokio::task::yield_now().await;
            Err::<u32, ApiError>(ApiError::Network("offline".into()))
        };
        let (first, second) = futures::join!(
            cache.fetch::<u32, _>(&key, five_minutes(), failing),
            cache.fetch::<u32, _>(&key, five_minutes(), async { Ok(9) }),
        );

        assert_eq!(first.unwrap_err(), ApiError::Network("offline".into()));
        assert_eq!(second.unwrap_err(), ApiError::Network("offline".into()));
    }

    #[tokio::test]
    async fn test_wrong_type_is_decode_error() {
        let cache = SharedCache::new();
        let key = QueryKey::new("regions");
        cache
            .fetch::<u32, _>(&key, five_minutes(), async { Ok(1) })
            .await
            .unwrap();

        let err = cache
            .fetch::<String, _>(&key, five_minutes(), async { Ok(String::new()) })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_log_failure_swallows_errors() {
        let attempted = Cell::new(false);
        log_failure("visit", async {
            attempted.set(true);
            Err(ApiError::Server {
                status: 500,
                message: "boom".into(),
            })
        })
        .await;
        assert!(attempted.get());
    }

    #[test]
    fn test_mutation_state_accessors() {
        let pending: MutationState<u32> = MutationState::Pending;
        assert!(pending.is_pending());
        assert!(pending.data().is_none());

        let done = MutationState::Success(3u32);
        assert_eq!(done.data(), Some(&3));

        let failed: MutationState<u32> = MutationState::Failed(ApiError::MissingToken);
        assert_eq!(failed.error(), Some(&ApiError::MissingToken));
    }
}

//! Single-flight memoizing cache.
//!
//! A [`Coalescer`] guarantees at most one in-flight operation per key. Every
//! caller that asks for a key while it is in flight awaits the same shared
//! outcome. Successful results are memoized for the lifetime of the
//! coalescer; failures clear the key so the next caller starts afresh.
//!
//! ```text
//!            get(k)                      success
//!  Absent ─────────────► InFlight ─────────────────► Completed
//!    ▲                      │
//!    └──────────────────────┘
//!            failure
//! ```
//!
//! The state map is only locked to register or finalize an entry; the work
//! itself runs on a spawned task, so unrelated keys proceed in parallel and
//! a caller that stops waiting does not cancel the work for the others.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::LookupError;

/// Outcome shared by every waiter of one in-flight request.
type SharedOutcome<T> = Shared<BoxFuture<'static, Result<T, LookupError>>>;

/// State of a single key. A missing entry means no request has succeeded
/// and none is running.
enum RequestState<T> {
    /// A request is running; await the shared outcome.
    InFlight(SharedOutcome<T>),
    /// A request succeeded with this value.
    Completed(T),
}

/// Per-key single-flight cache.
///
/// `K` is the key type and `T` the cached value. Use one coalescer per
/// operation family so keys of different families can never collide.
pub struct Coalescer<K, T> {
    name: &'static str,
    states: Arc<Mutex<HashMap<K, RequestState<T>>>>,
}

impl<K, T> Coalescer<K, T>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty coalescer. `name` labels log events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the value for `key`, running `fetch` only if the key is
    /// neither cached nor already in flight.
    ///
    /// # Errors
    ///
    /// Returns the error of the shared attempt. Every caller attached to
    /// that attempt receives the same error.
    pub async fn get<F, Fut>(&self, key: K, fetch: F) -> Result<T, LookupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LookupError>> + Send + 'static,
    {
        let outcome = {
            let mut states = self.states.lock().await;
            match states.get(&key) {
                Some(RequestState::Completed(value)) => {
                    debug!(cache = self.name, key = %key, "Cache hit");
                    return Ok(value.clone());
                }
                Some(RequestState::InFlight(outcome)) => {
                    debug!(cache = self.name, key = %key, "Joining in-flight request");
                    outcome.clone()
                }
                None => {
                    debug!(cache = self.name, key = %key, "Starting request");
                    let outcome = self.spawn(key.clone(), fetch());
                    states.insert(key, RequestState::InFlight(outcome.clone()));
                    outcome
                }
            }
        };

        outcome.await
    }

    /// Returns the memoized value for `key`, if a request has succeeded.
    pub async fn cached(&self, key: &K) -> Option<T> {
        match self.states.lock().await.get(key) {
            Some(RequestState::Completed(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns true if a request for `key` is currently running.
    pub async fn is_in_flight(&self, key: &K) -> bool {
        matches!(
            self.states.lock().await.get(key),
            Some(RequestState::InFlight(_))
        )
    }

    /// Number of keys that are cached or in flight.
    pub async fn len(&self) -> usize {
        self.states.lock().await.len()
    }

    /// Returns true if no key is cached or in flight.
    pub async fn is_empty(&self) -> bool {
        self.states.lock().await.is_empty()
    }

    /// Runs `work` on its own task and finalizes the entry when it ends.
    ///
    /// The map is updated before the shared outcome resolves, so a waiter
    /// that wakes up never observes a stale `InFlight` entry. If the task is
    /// aborted (runtime shutdown) the first waiter to observe it clears the
    /// entry instead.
    fn spawn<Fut>(&self, key: K, work: Fut) -> SharedOutcome<T>
    where
        Fut: Future<Output = Result<T, LookupError>> + Send + 'static,
    {
        let states = Arc::clone(&self.states);
        let name = self.name;
        let aborted = (Arc::clone(&self.states), key.clone());

        let handle = tokio::spawn(async move {
            let result = AssertUnwindSafe(work)
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(LookupError::Other("Lookup task panicked".to_string())));

            let mut states = states.lock().await;
            match &result {
                Ok(value) => {
                    debug!(cache = name, key = %key, "Request succeeded, caching result");
                    states.insert(key, RequestState::Completed(value.clone()));
                }
                Err(error) => {
                    warn!(cache = name, key = %key, error = %error, "Request failed, clearing entry");
                    states.remove(&key);
                }
            }
            result
        });

        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    // The task never reached finalization
                    let (states, key) = aborted;
                    warn!(cache = name, key = %key, "Request task aborted, clearing entry");
                    states.lock().await.remove(&key);
                    Err(LookupError::Other(format!("Lookup task aborted: {e}")))
                }
            }
        }
        .boxed()
        .shared()
    }
}

impl<K, T> std::fmt::Debug for Coalescer<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coalescer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # Pokedex Testing
//!
//! Testing utilities and helpers for the pokedex reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given/When/Then API for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use pokedex_testing::mocks::ManualFetcher;
//!
//! #[tokio::test]
//! async fn shows_loading_until_resolved() {
//!     let fetcher = ManualFetcher::new();
//!     let store = Store::new(AppState::default(), AppReducer::new(), env(&fetcher));
//!
//!     store.send(AppAction::Submit { name: "pikachu".into() }).await?;
//!     assert_eq!(fetcher.calls(), vec!["pikachu"]);
//!
//!     fetcher.resolve("pikachu", Ok(pikachu()));
//! }
//! ```

use chrono::{DateTime, Utc};
use pokedex_core::environment::{Clock, Fetch};


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Fetch, Utc};
    use futures::future::{BoxFuture, FutureExt};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use pokedex_testing::mocks::FixedClock;
    /// use pokedex_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Shared, poison-tolerant call log
    #[derive(Debug, Default)]
    struct CallLog(Mutex<Vec<String>>);

    impl CallLog {
        fn record(&self, key: &str) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(key.to_string());
        }

        fn snapshot(&self) -> Vec<String> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    /// Fetcher answering from a table of canned results
    ///
    /// Keys without a canned result never resolve, which keeps the caller in
    /// its loading phase for as long as the test needs.
    ///
    /// # Example
    ///
    /// ```
    /// use pokedex_core::environment::Fetch;
    /// use pokedex_testing::mocks::StubFetcher;
    ///
    /// # tokio_test::block_on(async {
    /// let fetcher = StubFetcher::<u32, String>::new().with_response("mew", Ok(151));
    ///
    /// assert_eq!(fetcher.fetch("mew".to_string()).await, Ok(151));
    /// assert_eq!(fetcher.calls(), vec!["mew"]);
    /// # });
    /// ```
    #[derive(Clone)]
    pub struct StubFetcher<T, E> {
        responses: HashMap<String, Result<T, E>>,
        latency: Option<Duration>,
        calls: Arc<CallLog>,
    }

    impl<T, E> StubFetcher<T, E> {
        /// Create a fetcher with no canned results
        #[must_use]
        pub fn new() -> Self {
            Self {
                responses: HashMap::new(),
                latency: None,
                calls: Arc::new(CallLog::default()),
            }
        }

        /// Answer `key` with `result`
        #[must_use]
        pub fn with_response(mut self, key: impl Into<String>, result: Result<T, E>) -> Self {
            self.responses.insert(key.into(), result);
            self
        }

        /// Delay every answer by `latency`
        #[must_use]
        pub const fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        /// Keys requested so far, in call order
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.snapshot()
        }
    }

    impl<T, E> Default for StubFetcher<T, E> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T, E> Fetch<String> for StubFetcher<T, E>
    where
        T: Clone + Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        type Output = T;
        type Error = E;

        fn fetch(&self, key: String) -> BoxFuture<'static, Result<T, E>> {
            self.calls.record(&key);

            let response = self.responses.get(&key).cloned();
            let latency = self.latency;

            async move {
                if let Some(latency) = latency {
                    tokio::time::sleep(latency).await;
                }
                match response {
                    Some(result) => result,
                    None => futures::future::pending().await,
                }
            }
            .boxed()
        }
    }

    /// A call parked in a [`ManualFetcher`]
    struct ParkedCall<T, E> {
        key: String,
        reply: oneshot::Sender<Result<T, E>>,
    }

    /// Fetcher whose calls stay in flight until the test settles them
    ///
    /// Calls can be settled in any order, which makes it possible to deliver
    /// the response to a superseded request after the current one.
    pub struct ManualFetcher<T, E> {
        parked: Arc<Mutex<Vec<ParkedCall<T, E>>>>,
        calls: Arc<CallLog>,
    }

    impl<T, E> ManualFetcher<T, E> {
        /// Create a fetcher with nothing in flight
        #[must_use]
        pub fn new() -> Self {
            Self {
                parked: Arc::new(Mutex::new(Vec::new())),
                calls: Arc::new(CallLog::default()),
            }
        }

        /// Keys requested so far, in call order
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.snapshot()
        }

        /// Number of calls still waiting for an answer
        #[must_use]
        pub fn in_flight(&self) -> usize {
            self.parked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Settle the oldest in-flight call for `key`
        ///
        /// Returns `false` if no call for `key` is in flight or the caller has
        /// gone away.
        pub fn resolve(&self, key: &str, result: Result<T, E>) -> bool {
            let call = {
                let mut parked = self.parked.lock().unwrap_or_else(PoisonError::into_inner);
                let Some(index) = parked.iter().position(|call| call.key == key) else {
                    return false;
                };
                parked.remove(index)
            };

            call.reply.send(result).is_ok()
        }
    }

    impl<T, E> Default for ManualFetcher<T, E> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T, E> Clone for ManualFetcher<T, E> {
        fn clone(&self) -> Self {
            Self {
                parked: Arc::clone(&self.parked),
                calls: Arc::clone(&self.calls),
            }
        }
    }

    impl<T, E> Fetch<String> for ManualFetcher<T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        type Output = T;
        type Error = E;

        fn fetch(&self, key: String) -> BoxFuture<'static, Result<T, E>> {
            self.calls.record(&key);

            let (reply, answer) = oneshot::channel();
            self.parked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(ParkedCall { key, reply });

            async move {
                match answer.await {
                    Ok(result) => result,
                    // Fetcher dropped without answering: stay in flight forever
                    Err(_) => futures::future::pending().await,
                }
            }
            .boxed()
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, ManualFetcher, StubFetcher};

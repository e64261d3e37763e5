//! Async query with loading/success/error states, polled from the event loop.
//!
//! The fetcher runs on a spawned task and reports back through a channel.
//! A refetch keeps showing the previous data until the new result arrives, so
//! only the very first load is observed as `Loading`.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

/// The state of a query
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// Query has not been started
    Idle,
    /// First fetch in flight, nothing to show yet
    Loading,
    /// Last fetch succeeded
    Success(T),
    /// Last fetch failed
    Error(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<T> + Send + Sync>;

pub struct Query<T> {
    state: QueryState<T>,
    fetcher: FetcherFn<T>,
    receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T: Send + 'static> Query<T> {
    pub fn new<F, Fut>(fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, String>> + Send + 'static,
    {
        Self {
            state: QueryState::Idle,
            fetcher: Box::new(move || Box::pin(fetcher())),
            receiver: None,
        }
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// A fetch is in flight, whether or not older data is shown.
    pub fn is_fetching(&self) -> bool {
        self.receiver.is_some()
    }

    /// Start fetching unless a fetch is already in flight.
    pub fn fetch(&mut self) {
        if self.is_fetching() {
            return;
        }
        self.start_fetch();
    }

    /// Start a new fetch, dropping any result still pending.
    pub fn refetch(&mut self) {
        self.receiver = None;
        self.start_fetch();
    }

    /// Non-blocking check for a finished fetch. Returns `true` if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &mut self.receiver else {
            return false;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.apply(result);
                true
            }
            Err(mpsc::error::TryRecvError::Empty) => false,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.apply(Err("Query was cancelled".to_string()));
                true
            }
        }
    }

    /// Waits for the in-flight fetch, if any, and applies its result.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if let Some(receiver) = &mut self.receiver {
            let result = receiver
                .recv()
                .await
                .unwrap_or_else(|| Err("Query was cancelled".to_string()));
            self.apply(result);
        }
    }

    fn apply(&mut self, result: Result<T, String>) {
        self.receiver = None;
        self.state = match result {
            Ok(data) => QueryState::Success(data),
            Err(error) => QueryState::Error(error),
        };
    }

    fn start_fetch(&mut self) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.receiver = Some(rx);
        if !matches!(self.state, QueryState::Success(_)) {
            self.state = QueryState::Loading;
        }

        let future = (self.fetcher)();
        tokio::spawn(async move {
            // Receiver may have been dropped by a refetch.
            let _ = tx.send(future.await);
        });
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("state", &self.state)
            .field("fetching", &self.receiver.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_query_success() {
        let mut query = Query::new(|| async { Ok::<_, String>(vec![1, 2, 3]) });
        assert!(matches!(query.state(), QueryState::Idle));

        query.fetch();
        assert!(query.state().is_loading());

        query.settle().await;
        assert_eq!(query.data(), Some(&vec![1, 2, 3]));
        assert!(!query.is_fetching());
    }

    #[tokio::test]
    async fn test_query_error() {
        let mut query: Query<i32> = Query::new(|| async { Err("Something went wrong".to_string()) });

        query.fetch();
        query.settle().await;

        assert!(query.state().is_error());
    }

    #[tokio::test]
    async fn test_poll_reports_state_change_once() {
        let mut query = Query::new(|| async { Ok::<_, String>(42) });

        query.fetch();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(query.poll());
        assert!(!query.poll());
        assert_eq!(query.data(), Some(&42));
    }

    #[tokio::test]
    async fn test_refetch_keeps_previous_data_visible() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        let mut query = Query::new(move || {
            let counter = counter_clone.clone();
            async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst)) }
        });

        query.fetch();
        query.settle().await;
        query.refetch();

        assert!(query.is_fetching());
        assert_eq!(query.data(), Some(&0));

        query.settle().await;
        assert_eq!(query.data(), Some(&1));
    }

    #[tokio::test]
    async fn test_fetch_while_fetching_is_noop() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        let mut query = Query::new(move || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, String>(())
            }
        });

        query.fetch();
        query.fetch();
        query.settle().await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

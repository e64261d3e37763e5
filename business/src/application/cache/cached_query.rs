use std::future::Future;

use tokio::sync::Mutex;

use super::query_cache::{CacheTag, QueryCache};

struct CacheEntry<T> {
    generation: u64,
    data: T,
}

/// Memoized result of one query that provides a cache tag.
///
/// The entry is served only while the tag's generation equals the generation
/// read before the fetch started, so an invalidation that lands during a fetch
/// still forces the next call to refetch. Errors are never memoized.
pub struct CachedQuery<T> {
    tag: CacheTag,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone + Send> CachedQuery<T> {
    pub fn new(tag: CacheTag) -> Self {
        Self {
            tag,
            entry: Mutex::new(None),
        }
    }

    /// Returns the memoized data if still fresh, otherwise runs `fetcher`.
    pub async fn fetch<F, Fut, E>(&self, cache: &QueryCache, fetcher: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = cache.generation(self.tag);

        if let Some(entry) = self.entry.lock().await.as_ref()
            && entry.generation == generation
        {
            return Ok(entry.data.clone());
        }

        let data = fetcher().await?;
        *self.entry.lock().await = Some(CacheEntry {
            generation,
            data: data.clone(),
        });
        Ok(data)
    }

    /// Whether a call to `fetch` right now would be served from memory.
    pub async fn is_fresh(&self, cache: &QueryCache) -> bool {
        let generation = cache.generation(self.tag);
        self.entry
            .lock()
            .await
            .as_ref()
            .is_some_and(|entry| entry.generation == generation)
    }
}

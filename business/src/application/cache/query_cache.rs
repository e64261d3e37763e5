//! Tag-based invalidation for cached queries.
//!
//! Each tag carries a generation counter published through a `watch` channel.
//! Queries remember the generation they were fetched at; mutations bump the
//! generation of the tags they touch, which makes every dependent query stale
//! and wakes anyone subscribed to the tag.

use tokio::sync::watch;

/// Labels tying cached queries to the mutations that invalidate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Product,
}

impl std::fmt::Display for CacheTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheTag::Product => write!(f, "Product"),
        }
    }
}

pub struct QueryCache {
    product: watch::Sender<u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        let (product, _) = watch::channel(0);
        Self { product }
    }

    fn sender(&self, tag: CacheTag) -> &watch::Sender<u64> {
        match tag {
            CacheTag::Product => &self.product,
        }
    }

    /// Current generation of `tag`. Starts at 0 and only grows.
    pub fn generation(&self, tag: CacheTag) -> u64 {
        *self.sender(tag).borrow()
    }

    /// Marks every query providing one of `tags` as stale.
    pub fn invalidate(&self, tags: &[CacheTag]) {
        for tag in tags {
            self.sender(*tag)
                .send_modify(|generation| *generation = generation.wrapping_add(1));
        }
    }

    /// Receiver that resolves `changed()` on every invalidation of `tag`
    /// after the moment of subscription.
    pub fn subscribe(&self, tag: CacheTag) -> watch::Receiver<u64> {
        self.sender(tag).subscribe()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

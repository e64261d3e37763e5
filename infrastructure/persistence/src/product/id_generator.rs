use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use business::domain::product::services::ProductIdGenerator;
use business::domain::product::value_objects::ProductId;

/// Ids are the creation time in Unix milliseconds, bumped by one when the
/// clock has not moved past the previously issued id.
#[derive(Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductIdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> ProductId {
        let now = Utc::now().timestamp_millis();
        let advance = |prev: i64| now.max(prev.saturating_add(1));

        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(advance(prev)))
            .unwrap_or_else(|prev| prev);

        ProductId::new(advance(prev).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn should_derive_id_from_current_time() {
        let before = Utc::now().timestamp_millis();
        let id = TimestampIdGenerator::new().next_id();
        let after = Utc::now().timestamp_millis();

        let millis: i64 = id.as_str().parse().unwrap();
        assert!(millis >= before && millis <= after + 1);
    }

    #[test]
    fn should_issue_strictly_increasing_ids_within_the_same_millisecond() {
        let generator = TimestampIdGenerator::new();

        let ids: Vec<i64> = (0..1_000)
            .map(|_| generator.next_id().as_str().parse().unwrap())
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}

use super::value_objects::ProductId;

/// Service port for assigning identifiers to new products.
///
/// Identifiers must be unique within the collection; implementations are free
/// to derive them from the clock.
pub trait ProductIdGenerator: Send + Sync {
    fn next_id(&self) -> ProductId;
}

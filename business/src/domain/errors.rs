/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    /// The stored collection could not be read or did not decode.
    #[error("repository.read_failure")]
    ReadFailure,
    /// The collection could not be written back to storage.
    #[error("repository.write_failure")]
    WriteFailure,
    /// An insert hit an id already present in the collection.
    #[error("repository.duplicate_id")]
    DuplicateId,
}

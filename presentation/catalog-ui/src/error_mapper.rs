use business::domain::errors::RepositoryError;
use business::domain::product::errors::ProductError;

/// Status/name/message view of a failed data-access call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub name: &'static str,
    pub message: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> ErrorResponse;
}

impl IntoErrorResponse for &ProductError {
    fn into_error_response(self) -> ErrorResponse {
        let (status, name) = match self {
            ProductError::NameEmpty | ProductError::CategoryEmpty | ProductError::InvalidPrice => {
                (400, "ValidationError")
            }
            ProductError::NotFound | ProductError::Repository(RepositoryError::NotFound) => {
                (404, "NotFound")
            }
            ProductError::Repository(RepositoryError::DuplicateId) => (409, "Conflict"),
            ProductError::Repository(RepositoryError::ReadFailure) => (500, "ReadFailure"),
            ProductError::Repository(RepositoryError::WriteFailure) => (500, "WriteFailure"),
        };

        ErrorResponse {
            status,
            name,
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_not_found_to_404() {
        let response = (&ProductError::NotFound).into_error_response();

        assert_eq!(response.status, 404);
        assert_eq!(response.name, "NotFound");
        assert_eq!(response.message, "product.not_found");
    }

    #[test]
    fn should_map_storage_failures_to_500() {
        let read = (&ProductError::Repository(RepositoryError::ReadFailure)).into_error_response();
        let write =
            (&ProductError::Repository(RepositoryError::WriteFailure)).into_error_response();

        assert_eq!(read.status, 500);
        assert_eq!(read.message, "repository.read_failure");
        assert_eq!(write.name, "WriteFailure");
    }

    #[test]
    fn should_map_validation_errors_to_400() {
        let response = (&ProductError::InvalidPrice).into_error_response();

        assert_eq!(response.status, 400);
        assert_eq!(response.name, "ValidationError");
    }

    #[test]
    fn should_map_id_clash_to_409() {
        let response =
            (&ProductError::Repository(RepositoryError::DuplicateId)).into_error_response();

        assert_eq!(response.status, 409);
        assert_eq!(response.name, "Conflict");
        assert_eq!(response.message, "repository.duplicate_id");
    }
}

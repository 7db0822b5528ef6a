//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category already exists")
        }
        CategoriesServiceError::InvalidLength { field, max } => StatusError::bad_request()
            .brief(format!("{field} must be between 1 and {max} characters")),
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category request")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage failed: {source}");

            StatusError::internal_server_error()
        }
        CategoriesServiceError::TimedOut(_elapsed) => {
            error!("category storage timed out");

            StatusError::internal_server_error()
        }
    }
}

use thiserror::Error;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Filter with ID {0} not found")]
    SavedFilterNotFound(i64),

    #[error("Location with ID {0} not found")]
    LocationNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::SavedFilterNotFound(_)
            | ServiceError::LocationNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
        }
    }
}

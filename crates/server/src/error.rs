//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `AppError` type mapping the service and factory error
//! taxonomy to status codes. All route handlers return `Result<T, AppError>`.
//! Error bodies are JSON `{"error": "<message>"}`; internal detail never
//! reaches the client on 5xx responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::FactoryError;
use crate::services::{AccountError, CartError, CatalogError};

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Account operation failed.
    #[error("account error: {0}")]
    Account(#[from] AccountError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Repository resolution failed (backend misconfiguration).
    #[error("configuration error: {0}")]
    Configuration(#[from] FactoryError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::NameTaken => StatusCode::CONFLICT,
                CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Account(err) => match err {
                AccountError::EmailTaken => StatusCode::CONFLICT,
                AccountError::InvalidEmail(_) | AccountError::WeakPassword(_) => {
                    StatusCode::BAD_REQUEST
                }
                AccountError::PasswordHash | AccountError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Cart(err) => match err {
                CartError::UserNotFound | CartError::ItemNotFound => StatusCode::NOT_FOUND,
                CartError::NotEnoughStock | CartError::AlreadyInCart => StatusCode::CONFLICT,
                CartError::Validation(_) => StatusCode::BAD_REQUEST,
                CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal failures are collapsed to a generic
    /// message; the detail goes to the logs instead.
    fn message(&self) -> String {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::NameTaken => "An item with this name already exists".to_owned(),
                CatalogError::Validation(msg) => msg.clone(),
                CatalogError::Repository(_) => "Internal server error".to_owned(),
            },
            Self::Account(err) => match err {
                AccountError::EmailTaken => {
                    "A user with this email address already exists".to_owned()
                }
                AccountError::InvalidEmail(e) => format!("Invalid email address: {e}"),
                AccountError::WeakPassword(msg) => msg.clone(),
                AccountError::PasswordHash | AccountError::Repository(_) => {
                    "Internal server error".to_owned()
                }
            },
            Self::Cart(err) => match err {
                CartError::UserNotFound => "User does not exist".to_owned(),
                CartError::ItemNotFound => "Item does not exist".to_owned(),
                CartError::NotEnoughStock => "Not enough items in stock".to_owned(),
                CartError::AlreadyInCart => "Item already in cart".to_owned(),
                CartError::Validation(msg) => msg.clone(),
                CartError::Repository(_) => "Internal server error".to_owned(),
            },
            Self::Configuration(_) => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;

    #[test]
    fn test_conflict_taxonomy_maps_to_409() {
        assert_eq!(
            AppError::from(CatalogError::NameTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AccountError::EmailTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(CartError::NotEnoughStock).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(CartError::AlreadyInCart).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_not_found_taxonomy_maps_to_404() {
        assert_eq!(
            AppError::from(CartError::UserNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(CartError::ItemNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = AppError::from(CatalogError::Repository(RepositoryError::DataCorruption(
            "bad row".to_owned(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_missing_pool_is_an_internal_error() {
        let err = AppError::from(FactoryError::MissingPool);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Errors returned by list endpoints.
//!
//! Database failures are logged through `tracing` and answered with a
//! generic message; the driver's error text never reaches the client.
//!
//! ```rust,ignore
//! async fn list_products(
//!     query: PaginateQuery,
//!     State(db): State<DatabaseConnection>,
//! ) -> Result<Json<Paginated<Product>>, ApiError> {
//!     Ok(Json(Product::paginate(&db, &query).await?))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

const DATABASE_ERROR_MESSAGE: &str = "A database error occurred";

#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        /// Resource type, e.g. "Product"
        resource: String,
        id: Option<String>,
    },

    /// 500, details logged but not sent
    Database { message: String, internal: DbErr },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Wrap a database error; only a generic message is shown to the client.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: DATABASE_ERROR_MESSAGE.to_string(),
            internal: err,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id: Some(id) } => {
                format!("{resource} with ID '{id}' not found")
            }
            Self::NotFound { resource, id: None } => format!("{resource} not found"),
            Self::Database { message, .. } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::NotFound { .. } => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { internal, .. } => Some(internal),
            Self::NotFound { .. } => None,
        }
    }
}

/// `RecordNotFound` becomes 404, every other database error a sanitized 500.
/// A filter on a column the resource does not have ends up here as a 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::not_found(resource, None)
            }
            _ => Self::database(err),
        }
    }
}

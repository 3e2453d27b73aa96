//! HTTP error taxonomy
//!
//! Every handler returns `Result<_, ApiError>`; the variant decides the
//! status code, the body and how loudly the cause is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::Notice;
use crate::forms::FieldErrors;

/// Notice shown when a write fails for a reason the user cannot fix
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Submitted fields failed validation; re-render the form
    #[error("Validation failed")]
    Validation { errors: FieldErrors, values: Value },

    /// The id in the path does not resolve to a record
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The store refused the write on an integrity constraint
    ///
    /// `notice` is the user-facing message; `None` shows [`GENERIC_FAILURE`].
    #[error("Constraint violation: {cause}")]
    Constraint {
        notice: Option<String>,
        cause: String,
    },

    /// Connection, transaction or other store failure
    #[error("Persistence error: {source}")]
    Persistence {
        notice: Option<String>,
        #[source]
        source: booker_common::Error,
    },
}

impl ApiError {
    pub fn validation(errors: FieldErrors, values: impl serde::Serialize) -> Self {
        ApiError::Validation {
            errors,
            values: serde_json::to_value(values).unwrap_or(Value::Null),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Give a write failure a specific notice unless it already carries one
    pub fn or_notice(self, notice: impl Into<String>) -> Self {
        match self {
            ApiError::Constraint { notice: None, cause } => ApiError::Constraint {
                notice: Some(notice.into()),
                cause,
            },
            ApiError::Persistence { notice: None, source } => ApiError::Persistence {
                notice: Some(notice.into()),
                source,
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Constraint { .. } => StatusCode::CONFLICT,
            ApiError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<booker_common::Error> for ApiError {
    fn from(err: booker_common::Error) -> Self {
        match err {
            booker_common::Error::Constraint(cause) => ApiError::Constraint { notice: None, cause },
            source => ApiError::Persistence { notice: None, source },
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        booker_common::Error::from(err).into()
    }
}

/// Body of the dedicated error pages
pub fn error_page(status: StatusCode, message: &str) -> Value {
    json!({
        "error": {
            "status": status.as_u16(),
            "title": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        }
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation { errors, values } => json!({
                "notice": Notice::error("Please correct the errors below."),
                "errors": errors,
                "form": values,
            }),
            ApiError::NotFound { entity, id } => {
                error_page(status, &format!("{} {} does not exist", entity, id))
            }
            ApiError::Constraint { notice, cause } => {
                warn!("Write rejected by constraint: {}", cause);
                json!({ "notice": Notice::error(notice.as_deref().unwrap_or(GENERIC_FAILURE)) })
            }
            ApiError::Persistence { notice, source } => {
                error!("Persistence failure: {}", source);
                json!({ "notice": Notice::error(notice.as_deref().unwrap_or(GENERIC_FAILURE)) })
            }
        };

        (status, Json(body)).into_response()
    }
}

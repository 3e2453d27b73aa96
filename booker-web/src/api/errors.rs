//! Dedicated 404 and 500 pages

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use tracing::error;

use crate::error::error_page;

/// Fallback for routes that match nothing
pub async fn not_found(uri: Uri) -> Response {
    let status = StatusCode::NOT_FOUND;
    (status, Json(error_page(status, &format!("No page at {}", uri.path())))).into_response()
}

/// Converts a handler panic into the 500 page
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!("Handler panicked: {}", detail);

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (
        status,
        Json(error_page(status, "Something went wrong on our end.")),
    )
        .into_response()
}

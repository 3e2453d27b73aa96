//! HTTP handlers for booker-web

pub mod artists;
pub mod errors;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::{
    create_artist_form, create_artist_submission, delete_artist, edit_artist,
    edit_artist_submission, list_artists, search_artists, show_artist,
};
pub use errors::{handle_panic, not_found};
pub use health::health_routes;
pub use home::index;
pub use shows::{create_show_form, create_show_submission, list_shows};
pub use venues::{
    create_venue_form, create_venue_submission, delete_venue, edit_venue, edit_venue_submission,
    list_venues, search_venues, show_venue,
};

use serde::Serialize;
use sqlx::{Sqlite, Transaction};
use tracing::error;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Result of a successful create/edit/delete: the notice and where to go next
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub redirect: String,
}

/// Commit on success, roll back on failure
///
/// The transaction is consumed either way, so the connection goes back to
/// the pool on every exit path.
pub(crate) async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

/// Numeric id from a path segment; anything else is a missing record
pub(crate) fn record_id(entity: &'static str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::not_found(entity, raw))
}

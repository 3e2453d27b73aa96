//! Landing page

use axum::{extract::State, Json};
use booker_common::db::{artists, venues};

use crate::error::ApiError;
use crate::views::{artist_summaries, EntitySummary, HomePage};
use crate::AppState;

const RECENT_LIMIT: i64 = 10;

/// GET /
///
/// Shows the most recently listed venues and artists.
pub async fn index(State(state): State<AppState>) -> Result<Json<HomePage>, ApiError> {
    let recent_venues = venues::recent(&state.db, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|v| EntitySummary { id: v.id, name: v.name })
        .collect();
    let recent_artists = artists::recent(&state.db, RECENT_LIMIT).await?;

    Ok(Json(HomePage {
        recent_venues,
        recent_artists: artist_summaries(&recent_artists),
    }))
}

//! Show listings and booking

use axum::{extract::State, http::StatusCode, Form, Json};
use booker_common::db::{artists, shows, venues, NewShow};
use sqlx::SqliteConnection;
use tracing::info;

use super::{finish, Notice, Outcome};
use crate::error::ApiError;
use crate::forms::{FieldErrors, FormData, ShowForm};
use crate::views::{FormPage, ShowEntry, ShowsPage};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<ShowsPage>, ApiError> {
    let listings = shows::list_listings(&state.db).await?;

    Ok(Json(ShowsPage {
        shows: listings.iter().map(ShowEntry::from).collect(),
    }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<FormPage<ShowForm>> {
    Json(FormPage::new(ShowForm::default()).without_choices())
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let form = ShowForm::from_data(&FormData::from(pairs));
    let show = form
        .validate()
        .map_err(|errors| ApiError::validation(errors, &form))?;

    let mut tx = state.db.begin().await?;
    let result = book_show(&mut tx, &show, &form).await;
    let id = finish(tx, result)
        .await
        .map_err(|e| e.or_notice("An error occurred. Show could not be listed."))?;

    info!(
        "Listed show {} (artist {} at venue {}, {})",
        id, show.artist_id, show.venue_id, show.start_time
    );

    Ok((
        StatusCode::CREATED,
        Json(Outcome {
            notice: Notice::success("Show was successfully listed!"),
            id: Some(id),
            redirect: "/".to_string(),
        }),
    ))
}

async fn book_show(
    conn: &mut SqliteConnection,
    show: &NewShow,
    form: &ShowForm,
) -> Result<i64, ApiError> {
    let mut errors = FieldErrors::default();
    if !artists::exists(&mut *conn, show.artist_id).await? {
        errors.add("artist_id", format!("No artist with id {}.", show.artist_id));
    }
    if !venues::exists(&mut *conn, show.venue_id).await? {
        errors.add("venue_id", format!("No venue with id {}.", show.venue_id));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors, form));
    }

    Ok(shows::insert(&mut *conn, show).await?)
}

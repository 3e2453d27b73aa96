//! Artist pages and actions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use booker_common::db::{artists, shows};
use booker_common::time;
use sqlx::SqliteConnection;
use tracing::info;

use super::{finish, record_id, Notice, Outcome};
use crate::error::ApiError;
use crate::forms::{ArtistForm, FormData, SearchForm};
use crate::views::{
    artist_detail, artist_summaries, upcoming_by_artist, ArtistDetail, ArtistsPage, FormPage,
    SearchPage, UpcomingSummary,
};
use crate::AppState;

const ENTITY: &str = "Artist";

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> Result<Json<ArtistsPage>, ApiError> {
    let all = artists::list(&state.db).await?;

    Ok(Json(ArtistsPage {
        artists: artist_summaries(&all),
    }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Json<SearchPage>, ApiError> {
    let matches = artists::search(&state.db, &search.search_term).await?;
    let upcoming = upcoming_by_artist(&shows::list(&state.db).await?, &time::now());

    let data = matches
        .into_iter()
        .map(|artist| UpcomingSummary {
            num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
            id: artist.id,
            name: artist.name,
        })
        .collect();

    Ok(Json(SearchPage::new(search.search_term, data)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    let artist = artists::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;
    let listings = shows::for_artist(&state.db, id).await?;

    Ok(Json(artist_detail(artist, listings, &time::now())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormPage<ArtistForm>> {
    Json(FormPage::new(ArtistForm::default()))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let form = ArtistForm::from_data(&FormData::from(pairs));
    let fields = form
        .validate()
        .map_err(|errors| ApiError::validation(errors, &form))?;

    let mut tx = state.db.begin().await?;
    let result = artists::insert(&mut *tx, &fields).await.map_err(ApiError::from);
    let id = finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Artist {} could not be listed.", fields.name)))?;

    info!("Listed artist {} ({})", id, fields.name);

    Ok((
        StatusCode::CREATED,
        Json(Outcome {
            notice: Notice::success(format!("Artist {} was successfully listed!", fields.name)),
            id: Some(id),
            redirect: "/".to_string(),
        }),
    ))
}

/// GET /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FormPage<ArtistForm>>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    let artist = artists::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

    Ok(Json(FormPage::editing(id, ArtistForm::from_artist(&artist))))
}

/// POST /artists/:id/edit
///
/// Replaces every field of the artist with the submitted values.
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<Outcome>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    if !artists::exists(&state.db, id).await? {
        return Err(ApiError::not_found(ENTITY, id));
    }

    let form = ArtistForm::from_data(&FormData::from(pairs));
    let fields = form
        .validate()
        .map_err(|errors| ApiError::validation(errors, &form))?;

    let mut tx = state.db.begin().await?;
    let result = match artists::update(&mut *tx, id, &fields).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::not_found(ENTITY, id)),
        Err(e) => Err(e.into()),
    };
    finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Artist {} could not be updated.", fields.name)))?;

    info!("Updated artist {} ({})", id, fields.name);

    Ok(Json(Outcome {
        notice: Notice::success(format!("Artist {} has been updated", fields.name)),
        id: Some(id),
        redirect: format!("/artists/{}", id),
    }))
}

/// DELETE /artists/:id (also /artist/:id)
///
/// Refused while any show still books the artist.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let id = record_id(ENTITY, &raw)?;

    let mut tx = state.db.begin().await?;
    let result = remove_artist(&mut tx, id).await;
    let name = finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Artist {} could not be deleted.", id)))?;

    info!("Deleted artist {} ({})", id, name);

    Ok(Json(Outcome {
        notice: Notice::success(format!("Artist {} was deleted", name)),
        id: None,
        redirect: "/".to_string(),
    }))
}

async fn remove_artist(conn: &mut SqliteConnection, id: i64) -> Result<String, ApiError> {
    let artist = artists::get(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

    let booked = shows::count_for_artist(&mut *conn, id).await?;
    if booked > 0 {
        return Err(ApiError::Constraint {
            notice: Some(format!(
                "Artist {} has {} booked show(s) and cannot be deleted.",
                artist.name, booked
            )),
            cause: format!("artist {} referenced by {} show(s)", id, booked),
        });
    }

    artists::delete(&mut *conn, id).await?;
    Ok(artist.name)
}

//! Venue pages and actions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use booker_common::db::{shows, venues};
use booker_common::time;
use sqlx::SqliteConnection;
use tracing::info;

use super::{finish, record_id, Notice, Outcome};
use crate::error::ApiError;
use crate::forms::{FormData, SearchForm, VenueForm};
use crate::views::{
    group_by_location, upcoming_by_venue, venue_detail, FormPage, SearchPage, UpcomingSummary,
    VenueDetail, VenuesPage,
};
use crate::AppState;

const ENTITY: &str = "Venue";

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<VenuesPage>, ApiError> {
    let all = venues::list(&state.db).await?;
    let all_shows = shows::list(&state.db).await?;

    Ok(Json(VenuesPage {
        areas: group_by_location(&all, &all_shows, &time::now()),
    }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Json<SearchPage>, ApiError> {
    let matches = venues::search(&state.db, &search.search_term).await?;
    let upcoming = upcoming_by_venue(&shows::list(&state.db).await?, &time::now());

    let data = matches
        .into_iter()
        .map(|v| UpcomingSummary {
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(Json(SearchPage::new(search.search_term, data)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<VenueDetail>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    let venue = venues::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;
    let listings = shows::for_venue(&state.db, id).await?;

    Ok(Json(venue_detail(venue, listings, &time::now())))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormPage<VenueForm>> {
    Json(FormPage::new(VenueForm::default()))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let form = VenueForm::from_data(&FormData::from(pairs));
    let fields = form
        .validate()
        .map_err(|errors| ApiError::validation(errors, &form))?;

    let mut tx = state.db.begin().await?;
    let result = venues::insert(&mut *tx, &fields).await.map_err(ApiError::from);
    let id = finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Venue {} could not be listed.", fields.name)))?;

    info!("Listed venue {} ({})", id, fields.name);

    Ok((
        StatusCode::CREATED,
        Json(Outcome {
            notice: Notice::success(format!("Venue {} was successfully listed!", fields.name)),
            id: Some(id),
            redirect: "/".to_string(),
        }),
    ))
}

/// GET /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FormPage<VenueForm>>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    let venue = venues::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

    Ok(Json(FormPage::editing(id, VenueForm::from_venue(&venue))))
}

/// POST /venues/:id/edit
///
/// Replaces every field of the venue with the submitted values.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<Outcome>, ApiError> {
    let id = record_id(ENTITY, &raw)?;
    if !venues::exists(&state.db, id).await? {
        return Err(ApiError::not_found(ENTITY, id));
    }

    let form = VenueForm::from_data(&FormData::from(pairs));
    let fields = form
        .validate()
        .map_err(|errors| ApiError::validation(errors, &form))?;

    let mut tx = state.db.begin().await?;
    let result = match venues::update(&mut *tx, id, &fields).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::not_found(ENTITY, id)),
        Err(e) => Err(e.into()),
    };
    finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Venue {} could not be updated.", fields.name)))?;

    info!("Updated venue {} ({})", id, fields.name);

    Ok(Json(Outcome {
        notice: Notice::success(format!("Venue {} has been updated", fields.name)),
        id: Some(id),
        redirect: format!("/venues/{}", id),
    }))
}

/// DELETE /venues/:id
///
/// Refused while any show still books the venue.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let id = record_id(ENTITY, &raw)?;

    let mut tx = state.db.begin().await?;
    let result = remove_venue(&mut tx, id).await;
    let name = finish(tx, result)
        .await
        .map_err(|e| e.or_notice(format!("An error occurred. Venue {} could not be deleted.", id)))?;

    info!("Deleted venue {} ({})", id, name);

    Ok(Json(Outcome {
        notice: Notice::success(format!("Venue {} was deleted", name)),
        id: None,
        redirect: "/".to_string(),
    }))
}

async fn remove_venue(conn: &mut SqliteConnection, id: i64) -> Result<String, ApiError> {
    let venue = venues::get(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

    let booked = shows::count_for_venue(&mut *conn, id).await?;
    if booked > 0 {
        return Err(ApiError::Constraint {
            notice: Some(format!(
                "Venue {} has {} booked show(s) and cannot be deleted.",
                venue.name, booked
            )),
            cause: format!("venue {} referenced by {} show(s)", id, booked),
        });
    }

    venues::delete(&mut *conn, id).await?;
    Ok(venue.name)
}

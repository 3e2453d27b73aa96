//! Venue queries

use super::name_matches;
use crate::db::models::{Venue, VenueFields};
use crate::Result;
use sqlx::types::Json;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
                       website, genres, seeking_talent, seeking_description";

/// All venues in id order
pub async fn list<'e, E>(executor: E) -> Result<Vec<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let venues = sqlx::query_as::<_, Venue>(&format!("SELECT {COLUMNS} FROM venues ORDER BY id"))
        .fetch_all(executor)
        .await?;
    Ok(venues)
}

/// Most recently listed venues, newest first
pub async fn recent<'e, E>(executor: E, limit: i64) -> Result<Vec<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {COLUMNS} FROM venues ORDER BY id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn get<'e, E>(executor: E, id: i64) -> Result<Option<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let venue = sqlx::query_as::<_, Venue>(&format!("SELECT {COLUMNS} FROM venues WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(venue)
}

/// Venues whose name contains `term`, ignoring case, in id order
///
/// SQLite `LIKE` only folds ASCII, so matching happens here.
pub async fn search<'e, E>(executor: E, term: &str) -> Result<Vec<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let venues: Vec<Venue> = list(executor)
        .await?
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect();
    Ok(venues)
}

pub async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

/// Insert a venue, returning its new id
pub async fn insert<'e, E>(executor: E, fields: &VenueFields) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                            website, genres, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every column of venue `id`; false when no such venue
pub async fn update<'e, E>(executor: E, id: i64, fields: &VenueFields) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, genres = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete venue `id`; false when no such venue
pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

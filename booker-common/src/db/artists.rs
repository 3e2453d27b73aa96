//! Artist queries

use super::name_matches;
use crate::db::models::{Artist, ArtistFields};
use crate::Result;
use sqlx::types::Json;
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
                       website, genres, seeking_venue, seeking_description";

/// All artists in id order
pub async fn list<'e, E>(executor: E) -> Result<Vec<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let artists = sqlx::query_as::<_, Artist>(&format!("SELECT {COLUMNS} FROM artists ORDER BY id"))
        .fetch_all(executor)
        .await?;
    Ok(artists)
}

/// Most recently listed artists, newest first
pub async fn recent<'e, E>(executor: E, limit: i64) -> Result<Vec<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {COLUMNS} FROM artists ORDER BY id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn get<'e, E>(executor: E, id: i64) -> Result<Option<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let artist = sqlx::query_as::<_, Artist>(&format!("SELECT {COLUMNS} FROM artists WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(artist)
}

/// Artists whose name contains `term`, ignoring case, in id order
///
/// SQLite `LIKE` only folds ASCII, so matching happens here.
pub async fn search<'e, E>(executor: E, term: &str) -> Result<Vec<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let artists: Vec<Artist> = list(executor)
        .await?
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect();
    Ok(artists)
}

pub async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

/// Insert a artist, returning its new id
pub async fn insert<'e, E>(executor: E, fields: &ArtistFields) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, image_link, facebook_link,
                             website, genres, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every column of artist `id`; false when no such artist
pub async fn update<'e, E>(executor: E, id: i64, fields: &ArtistFields) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, genres = ?, seeking_venue = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete artist `id`; false when no such artist
pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

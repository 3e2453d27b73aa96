//! Show queries
//!
//! Listings join both parents so callers get display names and images in
//! one round trip.

use crate::db::models::{NewShow, Show, ShowListing};
use crate::Result;
use sqlx::{Executor, Sqlite};

const LISTING_SELECT: &str = r#"
    SELECT s.id, s.start_time,
           v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
           a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Every show row without joins
pub async fn list<'e, E>(executor: E) -> Result<Vec<Show>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shows = sqlx::query_as::<_, Show>(
        "SELECT id, artist_id, venue_id, start_time FROM shows ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(shows)
}

/// Every show, newest start time first
pub async fn list_listings<'e, E>(executor: E) -> Result<Vec<ShowListing>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shows = sqlx::query_as::<_, ShowListing>(&format!(
        "{LISTING_SELECT} ORDER BY s.start_time DESC, s.id DESC"
    ))
    .fetch_all(executor)
    .await?;
    Ok(shows)
}

pub async fn for_venue<'e, E>(executor: E, venue_id: i64) -> Result<Vec<ShowListing>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shows = sqlx::query_as::<_, ShowListing>(&format!(
        "{LISTING_SELECT} WHERE s.venue_id = ? ORDER BY s.start_time, s.id"
    ))
    .bind(venue_id)
    .fetch_all(executor)
    .await?;
    Ok(shows)
}

pub async fn for_artist<'e, E>(executor: E, artist_id: i64) -> Result<Vec<ShowListing>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shows = sqlx::query_as::<_, ShowListing>(&format!(
        "{LISTING_SELECT} WHERE s.artist_id = ? ORDER BY s.start_time, s.id"
    ))
    .bind(artist_id)
    .fetch_all(executor)
    .await?;
    Ok(shows)
}

pub async fn count_for_venue<'e, E>(executor: E, venue_id: i64) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = ?")
        .bind(venue_id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}

pub async fn count_for_artist<'e, E>(executor: E, artist_id: i64) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = ?")
        .bind(artist_id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Insert a show, returning its new id
///
/// Foreign keys reject unknown artist/venue ids with a constraint error.
pub async fn insert<'e, E>(executor: E, show: &NewShow) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

//! Tests for database initialization and the store query modules
//!
//! Each test opens a fresh database file in its own temporary directory.

use booker_common::db::{artists, init::init_database, shows, venues};
use booker_common::db::{ArtistFields, NewShow, VenueFields};
use booker_common::Error;
use chrono::{Duration, NaiveDateTime};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("booker.db")).await.unwrap();
    (dir, pool)
}

fn musical_hop() -> VenueFields {
    VenueFields {
        name: "The Musical Hop".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
        website: Some("https://www.themusicalhop.com".to_string()),
        genres: vec!["Jazz".to_string(), "Reggae".to_string()],
        seeking_talent: true,
        seeking_description: Some("We are on the lookout for a local artist".to_string()),
    }
}

fn guns_n_petals() -> ArtistFields {
    ArtistFields {
        name: "Guns N Petals".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        genres: vec!["Rock n Roll".to_string()],
        ..Default::default()
    }
}

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("booker.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("booker.db");

    let pool1 = init_database(&db_path).await.unwrap();
    venues::insert(&pool1, &musical_hop()).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await.unwrap();
    let all = venues::list(&pool2).await.unwrap();
    assert_eq!(all.len(), 1, "existing rows should survive re-initialization");
}

#[tokio::test]
async fn test_venue_insert_and_get() {
    let (_dir, pool) = setup().await;

    let id = venues::insert(&pool, &musical_hop()).await.unwrap();
    let venue = venues::get(&pool, id).await.unwrap().expect("venue should exist");

    assert_eq!(venue.id, id);
    assert_eq!(venue.fields(), musical_hop());
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let (_dir, pool) = setup().await;

    assert!(venues::get(&pool, 999).await.unwrap().is_none());
    assert!(artists::get(&pool, 999).await.unwrap().is_none());
    assert!(!venues::exists(&pool, 999).await.unwrap());
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let (_dir, pool) = setup().await;
    venues::insert(&pool, &musical_hop()).await.unwrap();
    venues::insert(
        &pool,
        &VenueFields {
            name: "Park Square Live Music & Coffee".to_string(),
            ..musical_hop()
        },
    )
    .await
    .unwrap();
    venues::insert(
        &pool,
        &VenueFields {
            name: "The Dueling Pianos Bar".to_string(),
            ..musical_hop()
        },
    )
    .await
    .unwrap();

    let hop = venues::search(&pool, "hop").await.unwrap();
    assert_eq!(hop.len(), 1);
    assert_eq!(hop[0].name, "The Musical Hop");

    let music = venues::search(&pool, "Music").await.unwrap();
    assert_eq!(music.len(), 2);

    let all = venues::search(&pool, "").await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let (_dir, pool) = setup().await;
    artists::insert(&pool, &guns_n_petals()).await.unwrap();

    assert!(artists::search(&pool, "%").await.unwrap().is_empty());
    assert!(artists::search(&pool, "G_ns").await.unwrap().is_empty());
    assert_eq!(artists::search(&pool, "N PET").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let (_dir, pool) = setup().await;
    venues::insert(
        &pool,
        &VenueFields {
            name: "Café Über".to_string(),
            ..musical_hop()
        },
    )
    .await
    .unwrap();
    venues::insert(&pool, &musical_hop()).await.unwrap();

    let found = venues::search(&pool, "über").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Café Über");

    assert_eq!(venues::search(&pool, "CAFÉ").await.unwrap().len(), 1);
    assert_eq!(venues::search(&pool, "caf").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_venue_update_replaces_all_fields() {
    let (_dir, pool) = setup().await;
    let id = venues::insert(&pool, &musical_hop()).await.unwrap();

    let replacement = VenueFields {
        name: "The Musical Hop II".to_string(),
        city: "Oakland".to_string(),
        phone: None,
        facebook_link: None,
        genres: vec!["Folk".to_string()],
        seeking_talent: false,
        seeking_description: None,
        ..musical_hop()
    };

    assert!(venues::update(&pool, id, &replacement).await.unwrap());
    let stored = venues::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.fields(), replacement);

    assert!(!venues::update(&pool, id + 1, &replacement).await.unwrap());
}

#[tokio::test]
async fn test_artist_insert_keeps_state() {
    let (_dir, pool) = setup().await;
    let fields = ArtistFields {
        city: "New York".to_string(),
        state: "NY".to_string(),
        ..guns_n_petals()
    };

    let id = artists::insert(&pool, &fields).await.unwrap();
    let artist = artists::get(&pool, id).await.unwrap().unwrap();

    assert_eq!(artist.city, "New York");
    assert_eq!(artist.state, "NY");
}

#[tokio::test]
async fn test_show_listings_join_both_sides() {
    let (_dir, pool) = setup().await;
    let venue_id = venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist_id = artists::insert(&pool, &guns_n_petals()).await.unwrap();

    let early = at("2019-05-21 21:30:00");
    let late = early + Duration::days(3650);
    shows::insert(&pool, &NewShow { artist_id, venue_id, start_time: late }).await.unwrap();
    shows::insert(&pool, &NewShow { artist_id, venue_id, start_time: early }).await.unwrap();

    let all = shows::list_listings(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].start_time, late, "newest first");
    assert_eq!(all[0].venue_name, "The Musical Hop");
    assert_eq!(all[0].artist_name, "Guns N Petals");

    let at_venue = shows::for_venue(&pool, venue_id).await.unwrap();
    assert_eq!(at_venue.len(), 2);
    assert_eq!(at_venue[0].start_time, early, "venue listing is chronological");

    assert_eq!(shows::for_artist(&pool, artist_id).await.unwrap().len(), 2);
    assert_eq!(shows::count_for_venue(&pool, venue_id).await.unwrap(), 2);
    assert_eq!(shows::count_for_artist(&pool, artist_id).await.unwrap(), 2);
    assert_eq!(shows::list(&pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_show_with_unknown_parent_is_constraint() {
    let (_dir, pool) = setup().await;
    let venue_id = venues::insert(&pool, &musical_hop()).await.unwrap();

    let err = shows::insert(
        &pool,
        &NewShow {
            artist_id: 42,
            venue_id,
            start_time: at("2035-01-01 20:00:00"),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Constraint(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_delete_referenced_venue_is_constraint() {
    let (_dir, pool) = setup().await;
    let venue_id = venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist_id = artists::insert(&pool, &guns_n_petals()).await.unwrap();
    shows::insert(
        &pool,
        &NewShow {
            artist_id,
            venue_id,
            start_time: at("2035-01-01 20:00:00"),
        },
    )
    .await
    .unwrap();

    let err = venues::delete(&pool, venue_id).await.unwrap_err();
    assert!(err.is_constraint(), "got {:?}", err);
    assert!(venues::get(&pool, venue_id).await.unwrap().is_some());

    let err = artists::delete(&pool, artist_id).await.unwrap_err();
    assert!(err.is_constraint(), "got {:?}", err);
}

#[tokio::test]
async fn test_delete_unreferenced_venue() {
    let (_dir, pool) = setup().await;
    let id = venues::insert(&pool, &musical_hop()).await.unwrap();

    assert!(venues::delete(&pool, id).await.unwrap());
    assert!(!venues::delete(&pool, id).await.unwrap());
    assert!(venues::get(&pool, id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_dropped_transaction_rolls_back() {
    let (_dir, pool) = setup().await;

    {
        let mut tx = pool.begin().await.unwrap();
        venues::insert(&mut *tx, &musical_hop()).await.unwrap();
        // dropped without commit
    }

    assert!(venues::list(&pool).await.unwrap().is_empty());
}

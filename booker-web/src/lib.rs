//! booker-web library - venue, artist and show booking site
//!
//! Handlers render JSON view models. Each entity has a list page, a search
//! form, a detail page and create/edit/delete routes under its plural path;
//! shows are listed and booked under `/shows`.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod api;
pub mod error;
pub mod forms;
pub mod views;

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl AppConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    let venues = Router::new()
        .route("/venues", get(api::list_venues))
        .route("/venues/search", post(api::search_venues))
        .route(
            "/venues/create",
            get(api::create_venue_form).post(api::create_venue_submission),
        )
        .route("/venues/:id", get(api::show_venue).delete(api::delete_venue))
        .route(
            "/venues/:id/edit",
            get(api::edit_venue).post(api::edit_venue_submission),
        );

    let artists = Router::new()
        .route("/artists", get(api::list_artists))
        .route("/artists/search", post(api::search_artists))
        .route(
            "/artists/create",
            get(api::create_artist_form).post(api::create_artist_submission),
        )
        .route("/artists/:id", get(api::show_artist).delete(api::delete_artist))
        .route("/artist/:id", delete(api::delete_artist))
        .route(
            "/artists/:id/edit",
            get(api::edit_artist).post(api::edit_artist_submission),
        );

    let shows = Router::new()
        .route("/shows", get(api::list_shows))
        .route(
            "/shows/create",
            get(api::create_show_form).post(api::create_show_submission),
        );

    Router::new()
        .route("/", get(api::index))
        .merge(venues)
        .merge(artists)
        .merge(shows)
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(CatchPanicLayer::custom(api::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{FavoriteService, SeaOrmFavoriteService};

mod error;
mod favorites;
mod observability;
mod people;
mod planets;
mod system;
pub mod types;
mod users;
pub mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub favorites: Arc<dyn FavoriteService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

/// Builds the handler state around an already connected store.
#[must_use]
pub fn create_app_state(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let favorites = Arc::new(SeaOrmFavoriteService::new(store.clone())) as Arc<dyn FavoriteService>;

    Arc::new(AppState {
        config,
        store,
        favorites,
        prometheus_handle,
    })
}

/// Connects to the configured database, runs migrations and builds the state.
pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(create_app_state(config, store, prometheus_handle))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = if origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer.allow_methods(Any).allow_headers(Any)
}

/// The full HTTP application. Trailing slashes are trimmed before routing,
/// so `/people/` and `/people` reach the same handler.
pub fn router(state: Arc<AppState>) -> NormalizePath<Router> {
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    let app = Router::new()
        .route("/", get(system::index))
        .route("/people", get(people::list_people))
        .route("/people/{id}", get(people::get_person))
        .route("/planets", get(planets::list_planets))
        .route("/planets/{id}", get(planets::get_planet))
        .route("/users", get(users::list_users))
        .route("/users/favorites", get(users::get_user_favorites))
        .route(
            "/favorite/planet/{planet_id}",
            post(favorites::add_favorite_planet).delete(favorites::delete_favorite_planet),
        )
        .route(
            "/favorite/people/{people_id}",
            post(favorites::add_favorite_person).delete(favorites::delete_favorite_person),
        )
        .route("/metrics", get(observability::get_metrics))
        .fallback(system::not_found)
        .method_not_allowed_fallback(system::method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(app)
}

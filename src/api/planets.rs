use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use std::sync::Arc;

use super::validation::path_id;
use super::{ApiError, AppState, PlanetDto, PlanetResponse, PlanetsResponse};

/// `GET /planets`
pub async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlanetsResponse>, ApiError> {
    let planets = state.store().list_planets().await?;
    Ok(Json(PlanetsResponse {
        planets: planets.into_iter().map(PlanetDto::from).collect(),
    }))
}

/// `GET /planets/{id}`
pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let id = path_id(path)?;

    let planet = state
        .store()
        .get_planet(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planet not found"))?;

    Ok(Json(PlanetResponse {
        planet: PlanetDto::from(planet),
    }))
}

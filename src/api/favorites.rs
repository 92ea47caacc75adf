use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{UserQuery, path_id, require_user_id};
use super::{ApiError, AppState, FavoritePeopleDto, FavoritePlanetDto, MessageResponse};
use crate::services::FavoriteError;

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::PlanetAlreadyFavorite | FavoriteError::PersonAlreadyFavorite => {
                Self::conflict(err.to_string())
            }
            FavoriteError::PlanetFavoriteNotFound | FavoriteError::PersonFavoriteNotFound => {
                Self::not_found(err.to_string())
            }
            FavoriteError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// `POST /favorite/planet/{planet_id}?user_id=`
pub async fn add_favorite_planet(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    Query(query): Query<UserQuery>,
) -> Result<(StatusCode, Json<FavoritePlanetDto>), ApiError> {
    let planet_id = path_id(path)?;
    let user_id = require_user_id(query.user_id())?;

    let favorite = state.favorites.add_planet(user_id, planet_id).await?;

    Ok((StatusCode::CREATED, Json(FavoritePlanetDto::from(favorite))))
}

/// `POST /favorite/people/{people_id}?user_id=`
pub async fn add_favorite_person(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    Query(query): Query<UserQuery>,
) -> Result<(StatusCode, Json<FavoritePeopleDto>), ApiError> {
    let people_id = path_id(path)?;
    let user_id = require_user_id(query.user_id())?;

    let favorite = state.favorites.add_person(user_id, people_id).await?;

    Ok((StatusCode::CREATED, Json(FavoritePeopleDto::from(favorite))))
}

/// `DELETE /favorite/planet/{planet_id}?user_id=`
pub async fn delete_favorite_planet(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let planet_id = path_id(path)?;
    let user_id = require_user_id(query.user_id())?;

    state.favorites.remove_planet(user_id, planet_id).await?;

    Ok(Json(MessageResponse {
        message: "Favorite planet deleted!".to_string(),
    }))
}

/// `DELETE /favorite/people/{people_id}?user_id=`
pub async fn delete_favorite_person(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let people_id = path_id(path)?;
    let user_id = require_user_id(query.user_id())?;

    state.favorites.remove_person(user_id, people_id).await?;

    Ok(Json(MessageResponse {
        message: "Favorite person deleted!".to_string(),
    }))
}

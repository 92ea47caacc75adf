use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::{UserQuery, require_user_id};
use super::{
    ApiError, AppState, FavoritePeopleDto, FavoritePlanetDto, FavoritesResponse, UserDto,
    UsersResponse,
};

/// `GET /users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.store().list_users().await?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserDto::from).collect(),
    }))
}

/// `GET /users/favorites?user_id=`
///
/// The user is not required to exist; an unknown id yields empty lists.
pub async fn get_user_favorites(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let user_id = require_user_id(query.user_id())?;

    let favorites = state.favorites.list_for_user(user_id).await?;

    Ok(Json(FavoritesResponse {
        favorites_planets: favorites
            .planets
            .into_iter()
            .map(FavoritePlanetDto::from)
            .collect(),
        favorites_people: favorites
            .people
            .into_iter()
            .map(FavoritePeopleDto::from)
            .collect(),
    }))
}

//! Domain service for per-user favorites over planets and people.

use crate::db::{FavoritePeopleRow, FavoritePlanetRow};
use thiserror::Error;

/// Errors specific to favorite operations.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Planet already in favorites")]
    PlanetAlreadyFavorite,

    #[error("Person already in favorites")]
    PersonAlreadyFavorite,

    #[error("Favorite planet not found!")]
    PlanetFavoriteNotFound,

    #[error("Favorite person not found!")]
    PersonFavoriteNotFound,

    #[error("{0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(crate::db::error_text(&err))
    }
}

/// Both favorite lists of one user.
#[derive(Debug, Clone, Default)]
pub struct UserFavorites {
    pub planets: Vec<FavoritePlanetRow>,
    pub people: Vec<FavoritePeopleRow>,
}

#[async_trait::async_trait]
pub trait FavoriteService: Send + Sync {
    /// Lists the favorites of `user_id`. An unknown user has no favorites.
    async fn list_for_user(&self, user_id: i32) -> Result<UserFavorites, FavoriteError>;

    /// Marks a planet as favorite. Fails if the pair is already present.
    async fn add_planet(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<FavoritePlanetRow, FavoriteError>;

    /// Marks a person as favorite. Fails if the pair is already present.
    async fn add_person(
        &self,
        user_id: i32,
        people_id: i32,
    ) -> Result<FavoritePeopleRow, FavoriteError>;

    async fn remove_planet(&self, user_id: i32, planet_id: i32) -> Result<(), FavoriteError>;

    async fn remove_person(&self, user_id: i32, people_id: i32) -> Result<(), FavoriteError>;
}

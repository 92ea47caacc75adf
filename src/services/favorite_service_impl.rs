//! `SeaORM` implementation of the `FavoriteService` trait.

use crate::db::{FavoriteInsert, FavoritePeopleRow, FavoritePlanetRow, Store};
use crate::services::favorite_service::{FavoriteError, FavoriteService, UserFavorites};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmFavoriteService {
    store: Store,
}

impl SeaOrmFavoriteService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

// The duplicate check and the insert share a transaction but there is no
// unique index, so two concurrent requests for the same pair can both insert.
#[async_trait]
impl FavoriteService for SeaOrmFavoriteService {
    async fn list_for_user(&self, user_id: i32) -> Result<UserFavorites, FavoriteError> {
        let planets = self.store.favorite_planets_for_user(user_id).await?;
        let people = self.store.favorite_people_for_user(user_id).await?;
        Ok(UserFavorites { planets, people })
    }

    async fn add_planet(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<FavoritePlanetRow, FavoriteError> {
        match self.store.add_favorite_planet(user_id, planet_id).await? {
            FavoriteInsert::Created(row) => {
                info!(user_id, planet_id, "Planet added to favorites");
                Ok(row)
            }
            FavoriteInsert::AlreadyExists => Err(FavoriteError::PlanetAlreadyFavorite),
        }
    }

    async fn add_person(
        &self,
        user_id: i32,
        people_id: i32,
    ) -> Result<FavoritePeopleRow, FavoriteError> {
        match self.store.add_favorite_person(user_id, people_id).await? {
            FavoriteInsert::Created(row) => {
                info!(user_id, people_id, "Person added to favorites");
                Ok(row)
            }
            FavoriteInsert::AlreadyExists => Err(FavoriteError::PersonAlreadyFavorite),
        }
    }

    async fn remove_planet(&self, user_id: i32, planet_id: i32) -> Result<(), FavoriteError> {
        if self.store.remove_favorite_planet(user_id, planet_id).await? {
            info!(user_id, planet_id, "Planet removed from favorites");
            Ok(())
        } else {
            Err(FavoriteError::PlanetFavoriteNotFound)
        }
    }

    async fn remove_person(&self, user_id: i32, people_id: i32) -> Result<(), FavoriteError> {
        if self.store.remove_favorite_person(user_id, people_id).await? {
            info!(user_id, people_id, "Person removed from favorites");
            Ok(())
        } else {
            Err(FavoriteError::PersonFavoriteNotFound)
        }
    }
}

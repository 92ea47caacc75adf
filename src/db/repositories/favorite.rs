use crate::entities::{favorite_people, favorite_planet, people, planet, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

/// Repository for the user-to-planet and user-to-person favorite rows.
///
/// Inserts and deletes run their existence check and the write in one
/// transaction. The transaction is rolled back when dropped uncommitted, so
/// every early return leaves the tables untouched.
pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_planet_row(
        (favorite, planet): (favorite_planet::Model, Option<planet::Model>),
    ) -> FavoritePlanetRow {
        FavoritePlanetRow {
            id: favorite.id,
            user_id: favorite.user_id,
            planet_id: favorite.planet_id,
            planet_name: planet.map(|p| p.name),
        }
    }

    fn map_people_row(
        (favorite, person): (favorite_people::Model, Option<people::Model>),
    ) -> FavoritePeopleRow {
        FavoritePeopleRow {
            id: favorite.id,
            user_id: favorite.user_id,
            people_id: favorite.people_id,
            people_name: person.map(|p| p.name),
        }
    }

    // ========================================================================
    // Planets
    // ========================================================================

    pub async fn planets_for_user(&self, user_id: i32) -> Result<Vec<FavoritePlanetRow>> {
        let rows = FavoritePlanet::find()
            .find_also_related(Planet)
            .filter(favorite_planet::Column::UserId.eq(user_id))
            .order_by_asc(favorite_planet::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query favorite planets")?;

        Ok(rows.into_iter().map(Self::map_planet_row).collect())
    }

    pub async fn add_planet(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<FavoriteInsert<FavoritePlanetRow>> {
        let txn = self.conn.begin().await?;

        let existing = FavoritePlanet::find()
            .filter(favorite_planet::Column::UserId.eq(user_id))
            .filter(favorite_planet::Column::PlanetId.eq(planet_id))
            .one(&txn)
            .await
            .context("Failed to check for existing favorite planet")?;

        if existing.is_some() {
            return Ok(FavoriteInsert::AlreadyExists);
        }

        let favorite = favorite_planet::ActiveModel {
            user_id: Set(user_id),
            planet_id: Set(planet_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert favorite planet")?;

        let planet = Planet::find_by_id(planet_id).one(&txn).await?;

        txn.commit().await?;
        debug!(user_id, planet_id, "Added favorite planet");

        Ok(FavoriteInsert::Created(Self::map_planet_row((
            favorite, planet,
        ))))
    }

    /// Deletes the first favorite matching the pair. Returns `false` when none exists.
    pub async fn remove_planet(&self, user_id: i32, planet_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(favorite) = FavoritePlanet::find()
            .filter(favorite_planet::Column::UserId.eq(user_id))
            .filter(favorite_planet::Column::PlanetId.eq(planet_id))
            .order_by_asc(favorite_planet::Column::Id)
            .one(&txn)
            .await
            .context("Failed to query favorite planet")?
        else {
            return Ok(false);
        };

        FavoritePlanet::delete_by_id(favorite.id)
            .exec(&txn)
            .await
            .context("Failed to delete favorite planet")?;

        txn.commit().await?;
        debug!(user_id, planet_id, "Removed favorite planet");

        Ok(true)
    }

    // ========================================================================
    // People
    // ========================================================================

    pub async fn people_for_user(&self, user_id: i32) -> Result<Vec<FavoritePeopleRow>> {
        let rows = FavoritePeople::find()
            .find_also_related(People)
            .filter(favorite_people::Column::UserId.eq(user_id))
            .order_by_asc(favorite_people::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query favorite people")?;

        Ok(rows.into_iter().map(Self::map_people_row).collect())
    }

    pub async fn add_person(
        &self,
        user_id: i32,
        people_id: i32,
    ) -> Result<FavoriteInsert<FavoritePeopleRow>> {
        let txn = self.conn.begin().await?;

        let existing = FavoritePeople::find()
            .filter(favorite_people::Column::UserId.eq(user_id))
            .filter(favorite_people::Column::PeopleId.eq(people_id))
            .one(&txn)
            .await
            .context("Failed to check for existing favorite person")?;

        if existing.is_some() {
            return Ok(FavoriteInsert::AlreadyExists);
        }

        let favorite = favorite_people::ActiveModel {
            user_id: Set(user_id),
            people_id: Set(people_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert favorite person")?;

        let person = People::find_by_id(people_id).one(&txn).await?;

        txn.commit().await?;
        debug!(user_id, people_id, "Added favorite person");

        Ok(FavoriteInsert::Created(Self::map_people_row((
            favorite, person,
        ))))
    }

    pub async fn remove_person(&self, user_id: i32, people_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(favorite) = FavoritePeople::find()
            .filter(favorite_people::Column::UserId.eq(user_id))
            .filter(favorite_people::Column::PeopleId.eq(people_id))
            .order_by_asc(favorite_people::Column::Id)
            .one(&txn)
            .await
            .context("Failed to query favorite person")?
        else {
            return Ok(false);
        };

        FavoritePeople::delete_by_id(favorite.id)
            .exec(&txn)
            .await
            .context("Failed to delete favorite person")?;

        txn.commit().await?;
        debug!(user_id, people_id, "Removed favorite person");

        Ok(true)
    }
}

// ============================================================================
// Data Types
// ============================================================================

/// Outcome of inserting a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteInsert<T> {
    Created(T),
    /// A row for the same pair was already present; nothing was written.
    AlreadyExists,
}

/// Favorite planet joined with the referenced planet's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritePlanetRow {
    pub id: i32,
    pub user_id: i32,
    pub planet_id: i32,
    /// `None` when the planet row is missing.
    pub planet_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritePeopleRow {
    pub id: i32,
    pub user_id: i32,
    pub people_id: i32,
    pub people_name: Option<String>,
}

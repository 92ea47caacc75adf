use crate::entities::{people, planet, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use serde::Deserialize;

/// Read access to the reference datasets (people and planets).
///
/// The HTTP layer never writes here; `add_*` exists for seeding.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_people(&self) -> Result<Vec<people::Model>> {
        People::find()
            .order_by_asc(people::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list people")
    }

    pub async fn get_person(&self, id: i32) -> Result<Option<people::Model>> {
        People::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query person by ID")
    }

    pub async fn add_person(&self, person: NewPerson) -> Result<people::Model> {
        people::ActiveModel::from(person)
            .insert(&self.conn)
            .await
            .context("Failed to insert person")
    }

    pub async fn list_planets(&self) -> Result<Vec<planet::Model>> {
        Planet::find()
            .order_by_asc(planet::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list planets")
    }

    pub async fn get_planet(&self, id: i32) -> Result<Option<planet::Model>> {
        Planet::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query planet by ID")
    }

    pub async fn add_planet(&self, planet: NewPlanet) -> Result<planet::Model> {
        planet::ActiveModel::from(planet)
            .insert(&self.conn)
            .await
            .context("Failed to insert planet")
    }
}

/// Planet row to insert. `id` is assigned by the database when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlanet {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub diameter: Option<i32>,
    #[serde(default)]
    pub climate: Option<String>,
}

impl From<NewPlanet> for planet::ActiveModel {
    fn from(planet: NewPlanet) -> Self {
        Self {
            id: planet.id.map_or(NotSet, Set),
            name: Set(planet.name),
            diameter: Set(planet.diameter),
            climate: Set(planet.climate),
        }
    }
}

/// Person row to insert. `id` is assigned by the database when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub mass: Option<i32>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub skin_color: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
}

impl From<NewPerson> for people::ActiveModel {
    fn from(person: NewPerson) -> Self {
        Self {
            id: person.id.map_or(NotSet, Set),
            name: Set(person.name),
            height: Set(person.height),
            mass: Set(person.mass),
            hair_color: Set(person.hair_color),
            skin_color: Set(person.skin_color),
            eye_color: Set(person.eye_color),
            birth_year: Set(person.birth_year),
        }
    }
}

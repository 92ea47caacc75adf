use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement,
    TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{people, planet, user};

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::{NewPerson, NewPlanet};
pub use repositories::favorite::{FavoriteInsert, FavoritePeopleRow, FavoritePlanetRow};
pub use repositories::user::NewUser;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects and applies pending migrations.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = Self::connect(db_url, max_connections, min_connections).await?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Connects without touching the schema.
    pub async fn connect(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<DatabaseConnection> {
        if let Some(path_str) = sqlite_file_path(db_url) {
            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .context("Failed to connect to database")
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    pub async fn list_people(&self) -> Result<Vec<people::Model>> {
        self.catalog_repo().list_people().await
    }

    pub async fn get_person(&self, id: i32) -> Result<Option<people::Model>> {
        self.catalog_repo().get_person(id).await
    }

    pub async fn add_person(&self, person: NewPerson) -> Result<people::Model> {
        self.catalog_repo().add_person(person).await
    }

    pub async fn list_planets(&self) -> Result<Vec<planet::Model>> {
        self.catalog_repo().list_planets().await
    }

    pub async fn get_planet(&self, id: i32) -> Result<Option<planet::Model>> {
        self.catalog_repo().get_planet(id).await
    }

    pub async fn add_planet(&self, planet: NewPlanet) -> Result<planet::Model> {
        self.catalog_repo().add_planet(planet).await
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        self.user_repo().list().await
    }

    pub async fn add_user(&self, user: NewUser) -> Result<user::Model> {
        self.user_repo().add(user).await
    }

    /// Inserts users, then planets, then people in one transaction. Nothing
    /// is written unless every row inserts.
    pub async fn seed(
        &self,
        users: Vec<NewUser>,
        planets: Vec<NewPlanet>,
        people: Vec<NewPerson>,
    ) -> Result<()> {
        let txn = self.conn.begin().await?;

        for new_user in users {
            let email = new_user.email.clone();
            user::ActiveModel::from(new_user)
                .insert(&txn)
                .await
                .with_context(|| format!("Failed to insert user {email}"))?;
        }
        for new_planet in planets {
            let name = new_planet.name.clone();
            planet::ActiveModel::from(new_planet)
                .insert(&txn)
                .await
                .with_context(|| format!("Failed to insert planet {name}"))?;
        }
        for new_person in people {
            let name = new_person.name.clone();
            people::ActiveModel::from(new_person)
                .insert(&txn)
                .await
                .with_context(|| format!("Failed to insert person {name}"))?;
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn favorite_planets_for_user(&self, user_id: i32) -> Result<Vec<FavoritePlanetRow>> {
        self.favorite_repo().planets_for_user(user_id).await
    }

    pub async fn favorite_people_for_user(&self, user_id: i32) -> Result<Vec<FavoritePeopleRow>> {
        self.favorite_repo().people_for_user(user_id).await
    }

    pub async fn add_favorite_planet(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<FavoriteInsert<FavoritePlanetRow>> {
        self.favorite_repo().add_planet(user_id, planet_id).await
    }

    pub async fn add_favorite_person(
        &self,
        user_id: i32,
        people_id: i32,
    ) -> Result<FavoriteInsert<FavoritePeopleRow>> {
        self.favorite_repo().add_person(user_id, people_id).await
    }

    pub async fn remove_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool> {
        self.favorite_repo().remove_planet(user_id, planet_id).await
    }

    pub async fn remove_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool> {
        self.favorite_repo().remove_person(user_id, people_id).await
    }
}

/// Outermost context followed by the root cause. Database errors repeat
/// their source text in every layer, so the middle of the chain is skipped.
#[must_use]
pub fn error_text(err: &anyhow::Error) -> String {
    let root = err.root_cause();
    if err.chain().count() > 1 {
        format!("{err}: {root}")
    } else {
        err.to_string()
    }
}

/// Filesystem path of a file-backed `SQLite` URL. `None` for in-memory and
/// non-`SQLite` URLs.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    if rest.contains(":memory:") || rest.contains("mode=memory") {
        return None;
    }
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}

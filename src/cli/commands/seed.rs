use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::config::Config;
use crate::db::{NewPerson, NewPlanet, NewUser, Store};

/// Contents of a seed file:
///
/// ```toml
/// [[users]]
/// email = "luke@tatooine.net"
/// password = "secret"
///
/// [[planets]]
/// id = 1
/// name = "Tatooine"
/// diameter = 10465
/// climate = "arid"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub users: Vec<NewUser>,
    pub planets: Vec<NewPlanet>,
    pub people: Vec<NewPerson>,
}

impl SeedFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse seed file")
    }

    /// Inserts every row in one transaction; a failing row leaves the
    /// database unchanged.
    pub async fn apply(self, store: &Store) -> anyhow::Result<(usize, usize, usize)> {
        let counts = (self.users.len(), self.planets.len(), self.people.len());

        store.seed(self.users, self.planets, self.people).await?;

        Ok(counts)
    }
}

pub async fn cmd_seed(config: &Config, path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let seed = SeedFile::parse(&content)?;

    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let (users, planets, people) = seed.apply(&store).await?;
    println!("✓ Seeded {users} users, {planets} planets, {people} people");

    Ok(())
}

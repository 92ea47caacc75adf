use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use serde::Deserialize;

use crate::entities::{prelude::*, user};

/// User row to insert.
///
/// The password is stored as given; hashing is the caller's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<i32>,
    pub email: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl From<NewUser> for user::ActiveModel {
    fn from(new_user: NewUser) -> Self {
        Self {
            id: new_user.id.map_or(NotSet, Set),
            email: Set(new_user.email),
            password: Set(new_user.password),
            is_active: Set(new_user.is_active),
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<user::Model>> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn add(&self, new_user: NewUser) -> Result<user::Model> {
        user::ActiveModel::from(new_user)
            .insert(&self.conn)
            .await
            .context("Failed to insert user")
    }
}

pub mod catalog;
pub mod favorite;
pub mod user;

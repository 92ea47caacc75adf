pub mod favorite_service;
pub mod favorite_service_impl;

pub use favorite_service::{FavoriteError, FavoriteService, UserFavorites};
pub use favorite_service_impl::SeaOrmFavoriteService;

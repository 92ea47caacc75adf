mod migrate;
mod seed;

pub use migrate::cmd_migrate;
pub use seed::{SeedFile, cmd_seed};

use sea_orm_migration::MigratorTrait;

use crate::cli::MigrateCommands;
use crate::config::Config;
use crate::db::{Store, migrator::Migrator};

pub async fn cmd_migrate(config: &Config, command: MigrateCommands) -> anyhow::Result<()> {
    let conn = Store::connect(&config.general.database_url, 1, 1).await?;

    match command {
        MigrateCommands::Up => {
            Migrator::up(&conn, None).await?;
            println!("✓ Migrations applied");
        }
        MigrateCommands::Down => {
            Migrator::down(&conn, Some(1)).await?;
            println!("✓ Rolled back last migration");
        }
        MigrateCommands::Status => {
            for migration in Migrator::get_applied_migrations(&conn).await? {
                println!("  applied  {}", migration.name());
            }
            for migration in Migrator::get_pending_migrations(&conn).await? {
                println!("  pending  {}", migration.name());
            }
        }
    }

    Ok(())
}

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use zoneward_domain::config::DatabaseConfig;

pub async fn create_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&cfg.url())?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(options)
        .await?;

    if cfg.run_migrations {
        let migrator = Migrator::new(Path::new(&cfg.migrations_path)).await?;
        migrator.run(&pool).await?;
        info!(path = %cfg.migrations_path, "Database migrations applied");
    }

    Ok(pool)
}

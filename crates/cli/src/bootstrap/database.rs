use sqlx::SqlitePool;
use tracing::{error, info};
use zoneward_domain::config::DatabaseConfig;
use zoneward_infrastructure::database::create_pool;

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!(path = %cfg.path, "Initializing database");

    let pool = create_pool(cfg).await.map_err(|e| {
        error!(error = %e, "Failed to initialize database pool");
        anyhow::anyhow!(e)
    })?;

    info!(
        max_connections = cfg.max_connections,
        migrations = cfg.run_migrations,
        "Database initialized successfully"
    );

    Ok(pool)
}

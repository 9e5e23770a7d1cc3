use sqlx::SqlitePool;
use std::sync::Arc;
use zoneward_infrastructure::repositories::{SqliteQueryLogRepository, SqliteRecordStore};

pub struct Repositories {
    pub records: Arc<SqliteRecordStore>,
    pub query_log: Arc<SqliteQueryLogRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            records: Arc::new(SqliteRecordStore::new(pool.clone())),
            query_log: Arc::new(SqliteQueryLogRepository::new(pool)),
        }
    }
}

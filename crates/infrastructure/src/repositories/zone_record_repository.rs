use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};
use zoneward_application::ports::RecordStore;
use zoneward_domain::{DomainError, ZoneRecord};

type ZoneRecordRow = (
    String,
    String,
    String,
    String,
    String,
    i64,
    Option<i64>,
    Option<String>,
);

const LOOKUP_SQL: &str = "SELECT r.id, d.domain_name, r.name, r.type, r.value, r.ttl, r.priority, r.parent_record_id
     FROM records r
     JOIN domains d ON d.id = r.domain_id
     WHERE d.domain_name = ? COLLATE NOCASE
       AND r.name = ? COLLATE NOCASE
     ORDER BY r.created_at, r.rowid";

/// Read-only view over the `records` / `domains` tables maintained by the
/// management side.
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: ZoneRecordRow) -> ZoneRecord {
        let (id, zone, name, kind, value, ttl, priority, parent_record_id) = row;
        ZoneRecord {
            id: Some(Arc::from(id.as_str())),
            zone: Arc::from(zone.as_str()),
            name: Arc::from(name.as_str()),
            kind: Arc::from(kind.as_str()),
            value: Arc::from(value.as_str()),
            ttl: ttl.clamp(0, i32::MAX as i64) as u32,
            priority,
            parent_record_id: parent_record_id.map(|p| Arc::from(p.as_str())),
        }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self))]
    async fn lookup(
        &self,
        zone: &str,
        relative_name: &str,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        let rows = sqlx::query_as::<_, ZoneRecordRow>(LOOKUP_SQL)
            .bind(zone)
            .bind(relative_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, zone = %zone, name = %relative_name, "Failed to query records");
                DomainError::StoreUnavailable(e.to_string())
            })?;

        Ok(rows.into_iter().map(Self::row_to_record).collect())
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, instrument};
use zoneward_application::ports::QueryLogRepository;
use zoneward_domain::{DomainError, QueryLog};

pub struct SqliteQueryLogRepository {
    pool: SqlitePool,
}

impl SqliteQueryLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryLogRepository for SqliteQueryLogRepository {
    #[instrument(skip(self, query), fields(domain = %query.domain))]
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError> {
        let created_at = query
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d %H:%M:%S").to_string());

        sqlx::query(
            "INSERT INTO query_log (domain, query_type, client_ip, response_status, answer_count, response_time_us, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(query.domain.as_ref())
        .bind(query.query_type.as_ref())
        .bind(query.client_ip.to_string())
        .bind(query.response_status)
        .bind(query.answer_count as i64)
        .bind(query.response_time_us.map(|t| t as i64))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert query log");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}

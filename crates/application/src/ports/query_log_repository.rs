use async_trait::async_trait;
use zoneward_domain::{DomainError, QueryLog};

#[async_trait]
pub trait QueryLogRepository: Send + Sync {
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError>;
}

use async_trait::async_trait;
use zoneward_domain::{DomainError, ZoneRecord, APEX};

/// Read side of the record store populated by the management subsystem.
///
/// Implementations return `DomainError::StoreUnavailable` when the store
/// cannot be queried. An empty vector means the name has no records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn lookup(&self, zone: &str, relative_name: &str)
        -> Result<Vec<ZoneRecord>, DomainError>;

    async fn lookup_apex(&self, zone: &str) -> Result<Vec<ZoneRecord>, DomainError> {
        self.lookup(zone, APEX).await
    }
}

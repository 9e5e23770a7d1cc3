use crate::ports::RecordStore;
use std::sync::Arc;
use tracing::{debug, warn};
use zoneward_domain::{
    AuthorityResolution, DomainError, QueryType, RecordType, ResourceRecord, ResponseStatus,
    ZonePartition, ZoneRecord,
};

/// Decides the answer, authority section and result code for one question.
pub struct ResolveAuthorityUseCase {
    store: Arc<dyn RecordStore>,
    match_query_type: bool,
}

impl ResolveAuthorityUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            match_query_type: false,
        }
    }

    /// When enabled, only records of the requested type (or CNAME) are
    /// answered. Name existence is still decided on every record.
    pub fn with_query_type_matching(mut self, enabled: bool) -> Self {
        self.match_query_type = enabled;
        self
    }

    pub async fn execute(
        &self,
        query_name: &str,
        query_type: QueryType,
        partition: &ZonePartition,
    ) -> AuthorityResolution {
        let zone = partition.zone.as_ref();

        let apex = match self.store.lookup_apex(zone).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, zone = %zone, "Apex lookup failed");
                return AuthorityResolution::server_failure();
            }
        };

        let soa = match Self::zone_soa(zone, &apex) {
            Ok(soa) => soa,
            Err(e) => {
                warn!(error = %e, zone = %zone, "Zone SOA could not be synthesized");
                return AuthorityResolution::server_failure();
            }
        };

        let records = if partition.is_apex() {
            apex.clone()
        } else {
            match self
                .store
                .lookup(zone, partition.relative_name.as_ref())
                .await
            {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, name = %query_name, "Record lookup failed");
                    return AuthorityResolution::server_failure();
                }
            }
        };

        let mut resolution = AuthorityResolution::default();

        if records.is_empty() {
            debug!(name = %query_name, zone = %zone, "Name not found in zone");
            resolution.status = ResponseStatus::NxDomain;
            resolution.authority.extend(soa.iter().cloned());
        } else {
            resolution.answers = records
                .iter()
                .filter(|r| self.is_candidate(r, query_type))
                .filter_map(|r| Self::synthesize_or_skip(query_name, r))
                .collect();
        }

        resolution.authority.extend(
            apex.iter()
                .filter(|r| r.is_type(RecordType::NS))
                .filter_map(|r| Self::synthesize_or_skip(zone, r)),
        );

        if resolution.status == ResponseStatus::NoError && resolution.answers.is_empty() {
            if let Some(soa) = soa {
                resolution.authority.push(soa);
            }
        }

        resolution
    }

    fn zone_soa(zone: &str, apex: &[ZoneRecord]) -> Result<Option<ResourceRecord>, DomainError> {
        let mut soa_records = apex.iter().filter(|r| r.is_type(RecordType::SOA));

        let Some(first) = soa_records.next() else {
            debug!(zone = %zone, "No SOA at zone apex");
            return Ok(None);
        };

        let extra = soa_records.count();
        if extra > 0 {
            warn!(zone = %zone, extra, "Multiple SOA records at zone apex, using the first");
        }

        ResourceRecord::synthesize(zone, first).map(Some)
    }

    fn is_candidate(&self, record: &ZoneRecord, query_type: QueryType) -> bool {
        if !self.match_query_type {
            return true;
        }
        // Unknown kinds stay in so that they are reported when skipped.
        match record.record_type() {
            Some(rt) => query_type.matches(rt),
            None => true,
        }
    }

    fn synthesize_or_skip(owner: &str, record: &ZoneRecord) -> Option<ResourceRecord> {
        match ResourceRecord::synthesize(owner, record) {
            Ok(rr) => Some(rr),
            Err(DomainError::UnsupportedRecordType(kind)) => {
                warn!(record_type = %kind, name = %owner, "Unsupported type");
                None
            }
            Err(e) => {
                warn!(error = %e, name = %owner, "Skipping malformed record");
                None
            }
        }
    }
}

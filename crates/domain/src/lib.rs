//! Zoneward Domain Layer
pub mod config;
pub mod dns_record;
pub mod dns_request;
pub mod dns_response;
pub mod errors;
pub mod query_log;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{
    RecordType, ResourceData, ResourceRecord, SoaData, ZoneRecord, DEFAULT_MX_PRIORITY,
    DEFAULT_SRV_PRIORITY,
};
pub use dns_request::{DnsQuestion, DnsRequest, QueryType};
pub use dns_response::{AuthorityResolution, QueryOutcome, ResponseStatus};
pub use errors::DomainError;
pub use query_log::QueryLog;
pub use zone::{ZonePartition, APEX};

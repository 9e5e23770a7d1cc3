pub mod query_log_repository;
pub mod zone_record_repository;

pub use query_log_repository::SqliteQueryLogRepository;
pub use zone_record_repository::SqliteRecordStore;

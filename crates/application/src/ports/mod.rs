mod query_log_repository;
mod record_store;

pub use query_log_repository::QueryLogRepository;
pub use record_store::RecordStore;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid {kind} record value '{value}': {reason}")]
    InvalidRecordValue {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to bind {transport} listener on {addr}: {reason}")]
    ListenerBind {
        transport: &'static str,
        addr: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    pub fn invalid_value(kind: &'static str, value: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidRecordValue {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

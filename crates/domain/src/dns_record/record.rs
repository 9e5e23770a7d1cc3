use super::RecordType;
use std::sync::Arc;

/// A record row as stored by the management subsystem.
///
/// `kind` keeps the raw stored string: the store accepts any value there,
/// and unknown kinds are only rejected when the record is synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub id: Option<Arc<str>>,

    pub zone: Arc<str>,

    pub name: Arc<str>,

    pub kind: Arc<str>,

    pub value: Arc<str>,

    pub ttl: u32,

    /// Only meaningful for MX and SRV.
    pub priority: Option<i64>,

    pub parent_record_id: Option<Arc<str>>,
}

impl ZoneRecord {
    pub fn new(
        zone: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        kind: impl Into<Arc<str>>,
        value: impl Into<Arc<str>>,
        ttl: u32,
    ) -> Self {
        Self {
            id: None,
            zone: zone.into(),
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            ttl,
            priority: None,
            parent_record_id: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn record_type(&self) -> Option<RecordType> {
        self.kind.parse().ok()
    }

    pub fn is_type(&self, record_type: RecordType) -> bool {
        self.record_type() == Some(record_type)
    }
}

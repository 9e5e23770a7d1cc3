#![allow(dead_code)]
use zoneward_domain::{ZoneRecord, APEX};

pub struct ZoneRecordBuilder {
    zone: String,
    name: String,
    kind: String,
    value: String,
    ttl: u32,
    priority: Option<i64>,
}

impl ZoneRecordBuilder {
    pub fn new() -> Self {
        Self {
            zone: "example.com".to_string(),
            name: APEX.to_string(),
            kind: "A".to_string(),
            value: "192.0.2.1".to_string(),
            ttl: 300,
            priority: None,
        }
    }

    pub fn zone(mut self, zone: &str) -> Self {
        self.zone = zone.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn build(self) -> ZoneRecord {
        let mut record = ZoneRecord::new(self.zone, self.name, self.kind, self.value, self.ttl);
        record.priority = self.priority;
        record
    }
}

impl Default for ZoneRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use zoneward_application::ports::{QueryLogRepository, RecordStore};
use zoneward_domain::{DomainError, QueryLog, ZoneRecord, APEX};

fn key(zone: &str, name: &str) -> (String, String) {
    (zone.to_lowercase(), name.to_lowercase())
}

#[derive(Clone, Default)]
pub struct MockRecordStore {
    records: Arc<RwLock<HashMap<(String, String), Vec<ZoneRecord>>>>,
    unavailable_zones: Arc<RwLock<HashSet<String>>>,
    failing_names: Arc<RwLock<HashSet<(String, String)>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, zone: &str, name: &str, kind: &str, value: &str, ttl: u32) {
        self.add_record(ZoneRecord::new(zone, name, kind, value, ttl));
    }

    pub fn add_with_priority(
        &self,
        zone: &str,
        name: &str,
        kind: &str,
        value: &str,
        ttl: u32,
        priority: i64,
    ) {
        self.add_record(ZoneRecord::new(zone, name, kind, value, ttl).with_priority(priority));
    }

    pub fn add_record(&self, record: ZoneRecord) {
        self.records
            .write()
            .unwrap()
            .entry(key(&record.zone, &record.name))
            .or_default()
            .push(record);
    }

    pub fn add_soa(&self, zone: &str) {
        self.add(
            zone,
            APEX,
            "SOA",
            &format!("ns1.{zone}. hostmaster.{zone}. 1 3600 900 604800 300"),
            3600,
        );
    }

    /// Every lookup in `zone` fails.
    pub fn set_unavailable(&self, zone: &str) {
        self.unavailable_zones
            .write()
            .unwrap()
            .insert(zone.to_lowercase());
    }

    /// Only lookups of `name` in `zone` fail; the apex stays readable.
    pub fn fail_lookup(&self, zone: &str, name: &str) {
        self.failing_names.write().unwrap().insert(key(zone, name));
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn lookup(
        &self,
        zone: &str,
        relative_name: &str,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        if self
            .unavailable_zones
            .read()
            .unwrap()
            .contains(&zone.to_lowercase())
        {
            return Err(DomainError::StoreUnavailable(format!(
                "mock store down for {}",
                zone
            )));
        }

        let k = key(zone, relative_name);
        if self.failing_names.read().unwrap().contains(&k) {
            return Err(DomainError::StoreUnavailable(format!(
                "mock lookup failed for {} in {}",
                relative_name, zone
            )));
        }

        Ok(self
            .records
            .read()
            .unwrap()
            .get(&k)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone, Default)]
pub struct MockQueryLogRepository {
    logs: Arc<RwLock<Vec<QueryLog>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockQueryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().unwrap() = should_fail;
    }

    pub fn get_sync_logs(&self) -> Vec<QueryLog> {
        self.logs.read().unwrap().clone()
    }

    /// Waits for detached log tasks to land.
    pub async fn wait_for_logs(&self, expected: usize) -> Vec<QueryLog> {
        for _ in 0..100 {
            if self.logs.read().unwrap().len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.get_sync_logs()
    }
}

#[async_trait]
impl QueryLogRepository for MockQueryLogRepository {
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError> {
        if *self.should_fail.read().unwrap() {
            return Err(DomainError::DatabaseError("mock log failure".to_string()));
        }
        self.logs.write().unwrap().push(query.clone());
        Ok(())
    }
}

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use zoneward_application::use_cases::{HandleDnsQueryUseCase, ResolveAuthorityUseCase};
use zoneward_infrastructure::dns::DnsServerHandler;
use zoneward_infrastructure::repositories::SqliteRecordStore;

const SCHEMA: &str = include_str!("../../../../migrations/20250101000000_zone_records.sql");

pub const CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7));

/// Single-connection in-memory database with the full schema.
pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    pool
}

pub async fn insert_domain(pool: &SqlitePool, domain_name: &str) -> String {
    let (id,): (String,) = sqlx::query_as(
        "INSERT INTO domains (user_id, domain_name, verified) VALUES ('test-user', ?, 1) RETURNING id",
    )
    .bind(domain_name)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

pub async fn insert_record(
    pool: &SqlitePool,
    domain_id: &str,
    name: &str,
    kind: &str,
    value: &str,
    ttl: i64,
) -> String {
    insert_record_full(pool, domain_id, name, kind, value, ttl, None, None).await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_record_full(
    pool: &SqlitePool,
    domain_id: &str,
    name: &str,
    kind: &str,
    value: &str,
    ttl: i64,
    priority: Option<i64>,
    created_at: Option<&str>,
) -> String {
    let (id,): (String,) = sqlx::query_as(
        "INSERT INTO records (domain_id, type, name, value, ttl, priority, created_at)
         VALUES (?, ?, ?, ?, ?, ?, COALESCE(?, datetime('now')))
         RETURNING id",
    )
    .bind(domain_id)
    .bind(kind)
    .bind(name)
    .bind(value)
    .bind(ttl)
    .bind(priority)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

/// Zone with a SOA, two name servers, an apex address and a `www` host.
pub async fn seed_example_zone(pool: &SqlitePool, zone: &str, address: &str) -> String {
    let domain_id = insert_domain(pool, zone).await;
    insert_record(
        pool,
        &domain_id,
        "@",
        "SOA",
        &format!("ns1.{zone}. hostmaster.{zone}. 2024010101 3600 900 604800 300"),
        3600,
    )
    .await;
    insert_record(pool, &domain_id, "@", "NS", &format!("ns1.{zone}"), 86400).await;
    insert_record(pool, &domain_id, "@", "NS", &format!("ns2.{zone}"), 86400).await;
    insert_record(pool, &domain_id, "@", "A", address, 300).await;
    insert_record(pool, &domain_id, "www", "A", address, 60).await;
    domain_id
}

pub fn build_handler(pool: SqlitePool) -> DnsServerHandler {
    let store = Arc::new(SqliteRecordStore::new(pool));
    let resolver = Arc::new(ResolveAuthorityUseCase::new(store));
    DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(resolver)))
}

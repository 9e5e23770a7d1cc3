use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct QueryLog {
    pub domain: Arc<str>,
    pub query_type: Arc<str>,
    pub client_ip: IpAddr,
    pub response_status: &'static str,
    pub answer_count: u32,
    pub response_time_us: Option<u64>,
    pub timestamp: Option<String>,
}

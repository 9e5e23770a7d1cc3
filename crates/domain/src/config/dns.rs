use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Only answer with records whose kind matches the question (CNAME
    /// always matches). Off by default: every record at the name is returned.
    #[serde(default)]
    pub match_query_type: bool,

    #[serde(default = "default_tcp_idle_timeout_secs")]
    pub tcp_idle_timeout_secs: u64,

    /// Replies above this size are sent truncated over UDP.
    #[serde(default = "default_max_udp_payload")]
    pub max_udp_payload: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            match_query_type: false,
            tcp_idle_timeout_secs: default_tcp_idle_timeout_secs(),
            max_udp_payload: default_max_udp_payload(),
        }
    }
}

fn default_tcp_idle_timeout_secs() -> u64 {
    10
}

fn default_max_udp_payload() -> usize {
    512
}

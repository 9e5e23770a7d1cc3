use super::RecordType;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Type requested by a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Record(RecordType),
    Any,
    Other(u16),
}

impl QueryType {
    pub const ANY_CODE: u16 = 255;

    pub fn from_u16(code: u16) -> Self {
        if code == Self::ANY_CODE {
            return QueryType::Any;
        }
        match RecordType::from_u16(code) {
            Some(rt) => QueryType::Record(rt),
            None => QueryType::Other(code),
        }
    }

    /// Whether a stored record of `record_type` answers this question.
    ///
    /// CNAME records answer every type, as the client follows the alias.
    pub fn matches(&self, record_type: RecordType) -> bool {
        match self {
            QueryType::Any => true,
            QueryType::Record(rt) => *rt == record_type || record_type == RecordType::CNAME,
            QueryType::Other(_) => record_type == RecordType::CNAME,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Record(rt) => write!(f, "{}", rt),
            QueryType::Any => write!(f, "ANY"),
            QueryType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub query_type: QueryType,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, query_type: QueryType) -> Self {
        Self {
            name: name.into(),
            query_type,
        }
    }

    /// Queried name without the trailing root separator.
    pub fn normalized_name(&self) -> &str {
        self.name.strip_suffix('.').unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub questions: Vec<DnsQuestion>,
    pub client_ip: IpAddr,
}

impl DnsRequest {
    pub fn new(questions: Vec<DnsQuestion>, client_ip: IpAddr) -> Self {
        Self {
            questions,
            client_ip,
        }
    }

    pub fn single(question: DnsQuestion, client_ip: IpAddr) -> Self {
        Self::new(vec![question], client_ip)
    }
}

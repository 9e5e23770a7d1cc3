use super::ResourceRecord;
use std::fmt;

/// Result code produced by authority resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    #[default]
    NoError,
    NxDomain,
    ServFail,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::NoError => "NOERROR",
            ResponseStatus::NxDomain => "NXDOMAIN",
            ResponseStatus::ServFail => "SERVFAIL",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contribution of a single question to a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityResolution {
    pub status: ResponseStatus,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
}

impl AuthorityResolution {
    pub fn server_failure() -> Self {
        Self {
            status: ResponseStatus::ServFail,
            ..Self::default()
        }
    }
}

/// Accumulated response for a whole query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub status: ResponseStatus,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
}

impl QueryOutcome {
    /// Appends a question's records. The status of the most recently merged
    /// question replaces any earlier one.
    pub fn merge(&mut self, resolution: AuthorityResolution) {
        self.status = resolution.status;
        self.answers.extend(resolution.answers);
        self.authority.extend(resolution.authority);
    }
}

//! Splitting a queried name into the zone it belongs to and the name
//! relative to that zone.

use std::fmt;
use std::sync::Arc;

/// Relative name of a zone's apex.
pub const APEX: &str = "@";

/// Result of partitioning a fully-qualified name.
///
/// The zone is always the last two labels of the name. This is a fixed
/// heuristic: it does not consult the set of zones actually present in the
/// record store, so any name with two or more labels yields some zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonePartition {
    pub zone: Arc<str>,
    pub relative_name: Arc<str>,
}

impl ZonePartition {
    pub fn new(zone: impl Into<Arc<str>>, relative_name: impl Into<Arc<str>>) -> Self {
        Self {
            zone: zone.into(),
            relative_name: relative_name.into(),
        }
    }

    pub fn from_query_name(name: &str) -> Self {
        let name = name.strip_suffix('.').unwrap_or(name);
        let labels: Vec<&str> = name.split('.').collect();

        if labels.len() < 2 {
            return Self::new(name, APEX);
        }

        let split_at = labels.len() - 2;
        let zone = labels[split_at..].join(".");
        let relative = labels[..split_at].join(".");

        if relative.is_empty() {
            Self::new(zone, APEX)
        } else {
            Self::new(zone, relative)
        }
    }

    pub fn is_apex(&self) -> bool {
        self.relative_name.as_ref() == APEX
    }
}

impl fmt::Display for ZonePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.relative_name, self.zone)
    }
}

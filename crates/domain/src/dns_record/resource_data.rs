use super::{RecordType, ZoneRecord};
use crate::errors::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

pub const DEFAULT_MX_PRIORITY: u16 = 10;
pub const DEFAULT_SRV_PRIORITY: u16 = 0;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MAX_CHARACTER_STRING_LEN: usize = 255;
const CAA_ISSUE_TAG: &str = "issue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: Arc<str>,
    pub rname: Arc<str>,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

impl SoaData {
    /// Parses `mname rname serial refresh retry expire minimum`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        if parts.len() != 7 {
            return Err(DomainError::invalid_value(
                "SOA",
                value,
                format!("expected 7 fields, got {}", parts.len()),
            ));
        }

        let mname = parse_host("SOA", parts[0])?;
        let rname = parse_host("SOA", parts[1])?;
        let serial = parse_number::<u32>(value, "serial", parts[2])?;
        let refresh = parse_interval(value, "refresh", parts[3])?;
        let retry = parse_interval(value, "retry", parts[4])?;
        let expire = parse_interval(value, "expire", parts[5])?;
        let minimum = parse_number::<u32>(value, "minimum", parts[6])?;

        Ok(Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        })
    }
}

/// Typed record data, fully validated and ready for the wire codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(Arc<str>),
    NS(Arc<str>),
    MX {
        preference: u16,
        exchange: Arc<str>,
    },
    TXT(Arc<str>),
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: Arc<str>,
    },
    /// `issuer` is empty when the value names no CA. `parameters` keep
    /// their stored order.
    CAA {
        flags: u8,
        tag: &'static str,
        issuer: Arc<str>,
        parameters: Vec<(Arc<str>, Arc<str>)>,
    },
    SOA(SoaData),
}

impl ResourceData {
    pub fn record_type(&self) -> RecordType {
        match self {
            ResourceData::A(_) => RecordType::A,
            ResourceData::AAAA(_) => RecordType::AAAA,
            ResourceData::CNAME(_) => RecordType::CNAME,
            ResourceData::NS(_) => RecordType::NS,
            ResourceData::MX { .. } => RecordType::MX,
            ResourceData::TXT(_) => RecordType::TXT,
            ResourceData::SRV { .. } => RecordType::SRV,
            ResourceData::CAA { .. } => RecordType::CAA,
            ResourceData::SOA(_) => RecordType::SOA,
        }
    }
}

/// A record ready to be placed in a response section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Owner name, without the trailing root separator.
    pub name: Arc<str>,
    pub ttl: u32,
    pub data: ResourceData,
}

impl ResourceRecord {
    /// Converts a stored record into a typed record owned by `owner`.
    ///
    /// Fails with `UnsupportedRecordType` for kinds outside the served set
    /// and with `InvalidRecordValue` when the stored value cannot form a
    /// valid record. Both are per-record failures.
    pub fn synthesize(owner: &str, record: &ZoneRecord) -> Result<Self, DomainError> {
        let record_type = record
            .record_type()
            .ok_or_else(|| DomainError::UnsupportedRecordType(record.kind.to_string()))?;
        let value = record.value.trim();

        let data = match record_type {
            RecordType::A => ResourceData::A(
                value
                    .parse()
                    .map_err(|_| DomainError::invalid_value("A", value, "not an IPv4 address"))?,
            ),
            RecordType::AAAA => ResourceData::AAAA(
                value
                    .parse()
                    .map_err(|_| DomainError::invalid_value("AAAA", value, "not an IPv6 address"))?,
            ),
            RecordType::CNAME => ResourceData::CNAME(parse_host("CNAME", value)?),
            RecordType::NS => ResourceData::NS(parse_host("NS", value)?),
            RecordType::MX => ResourceData::MX {
                preference: priority_or("MX", record.priority, DEFAULT_MX_PRIORITY)?,
                exchange: parse_host("MX", value)?,
            },
            RecordType::TXT => {
                if value.len() > MAX_CHARACTER_STRING_LEN {
                    return Err(DomainError::invalid_value(
                        "TXT",
                        value,
                        format!("longer than {} bytes", MAX_CHARACTER_STRING_LEN),
                    ));
                }
                ResourceData::TXT(Arc::from(value))
            }
            // Weight and port are not part of the stored schema.
            RecordType::SRV => ResourceData::SRV {
                priority: priority_or("SRV", record.priority, DEFAULT_SRV_PRIORITY)?,
                weight: 0,
                port: 0,
                target: parse_host("SRV", value)?,
            },
            RecordType::CAA => {
                let (issuer, parameters) = parse_caa_issue(value)?;
                ResourceData::CAA {
                    flags: 0,
                    tag: CAA_ISSUE_TAG,
                    issuer,
                    parameters,
                }
            }
            RecordType::SOA => ResourceData::SOA(SoaData::parse(value)?),
        };

        Ok(Self {
            name: Arc::from(owner.strip_suffix('.').unwrap_or(owner)),
            ttl: record.ttl,
            data,
        })
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}

fn priority_or(kind: &'static str, priority: Option<i64>, default: u16) -> Result<u16, DomainError> {
    match priority {
        None => Ok(default),
        Some(p) => u16::try_from(p).map_err(|_| {
            DomainError::invalid_value(kind, &p.to_string(), "priority out of range 0-65535")
        }),
    }
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    field: &str,
    raw: &str,
) -> Result<T, DomainError> {
    raw.parse::<T>()
        .map_err(|_| DomainError::invalid_value("SOA", value, format!("invalid {}: {}", field, raw)))
}

fn parse_interval(value: &str, field: &str, raw: &str) -> Result<i32, DomainError> {
    let interval = parse_number::<i32>(value, field, raw)?;
    if interval < 0 {
        return Err(DomainError::invalid_value(
            "SOA",
            value,
            format!("negative {}: {}", field, raw),
        ));
    }
    Ok(interval)
}

type CaaParameters = Vec<(Arc<str>, Arc<str>)>;

/// Parses `[issuer] [; key=value]*` as carried by an `issue` property.
fn parse_caa_issue(value: &str) -> Result<(Arc<str>, CaaParameters), DomainError> {
    let (issuer, rest) = match value.split_once(';') {
        Some((issuer, rest)) => (issuer.trim(), Some(rest)),
        None => (value.trim(), None),
    };

    let issuer = if issuer.is_empty() {
        Arc::from("")
    } else {
        parse_host("CAA", issuer)?
    };

    let mut parameters = Vec::new();
    for param in rest.into_iter().flat_map(|r| r.split(';')) {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let Some((key, val)) = param.split_once('=') else {
            return Err(DomainError::invalid_value(
                "CAA",
                value,
                format!("parameter '{}' is not key=value", param),
            ));
        };
        let (key, val) = (key.trim(), val.trim());
        let key_ok = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric());
        let val_ok = !val.is_empty() && val.chars().all(|c| c.is_ascii_graphic() && c != ';');
        if !key_ok || !val_ok {
            return Err(DomainError::invalid_value(
                "CAA",
                value,
                format!("invalid parameter '{}'", param),
            ));
        }
        parameters.push((Arc::from(key), Arc::from(val)));
    }

    Ok((issuer, parameters))
}

fn parse_host(kind: &'static str, value: &str) -> Result<Arc<str>, DomainError> {
    let host = value.strip_suffix('.').unwrap_or(value);

    if host.is_empty() {
        return Err(DomainError::invalid_value(kind, value, "empty host name"));
    }
    if host.len() > MAX_NAME_LEN {
        return Err(DomainError::invalid_value(
            kind,
            value,
            format!("host name exceeds {} characters", MAX_NAME_LEN),
        ));
    }

    for label in host.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DomainError::invalid_value(kind, value, "invalid label length"));
        }
        let valid = label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::invalid_value(
                kind,
                value,
                "host name contains invalid characters",
            ));
        }
    }

    Ok(Arc::from(host))
}

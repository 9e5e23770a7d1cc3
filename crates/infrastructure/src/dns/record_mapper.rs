//! Mapping between the domain's synthesized records and `hickory_proto` types.

use hickory_proto::rr::rdata::caa::KeyValue;
use hickory_proto::rr::rdata::{A, AAAA, CAA, CNAME, MX, NS, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use std::str::FromStr;
use zoneward_domain::{DomainError, QueryType, ResourceData, ResourceRecord, SoaData};

pub struct RecordDataMapper;

impl RecordDataMapper {
    /// Builds the wire record for a synthesized resource record.
    ///
    /// Fails with `DomainError::InvalidDomainName` when the codec rejects the
    /// owner or a target name.
    pub fn to_hickory(record: &ResourceRecord) -> Result<Record, DomainError> {
        let owner = Self::fqdn(&record.name)?;

        let rdata = match &record.data {
            ResourceData::A(ip) => RData::A(A(*ip)),
            ResourceData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
            ResourceData::CNAME(target) => RData::CNAME(CNAME(Self::fqdn(target)?)),
            ResourceData::NS(host) => RData::NS(NS(Self::fqdn(host)?)),
            ResourceData::MX {
                preference,
                exchange,
            } => RData::MX(MX::new(*preference, Self::fqdn(exchange)?)),
            ResourceData::TXT(text) => RData::TXT(TXT::new(vec![text.to_string()])),
            ResourceData::SRV {
                priority,
                weight,
                port,
                target,
            } => RData::SRV(SRV::new(*priority, *weight, *port, Self::fqdn(target)?)),
            ResourceData::CAA {
                flags,
                issuer,
                parameters,
                ..
            } => {
                let name = if issuer.is_empty() {
                    None
                } else {
                    Some(Self::fqdn(issuer)?)
                };
                let options = parameters
                    .iter()
                    .map(|(key, value)| KeyValue::new(key.as_ref(), value.as_ref()))
                    .collect();
                RData::CAA(CAA::new_issue(flags & 0x80 != 0, name, options))
            }
            ResourceData::SOA(soa) => RData::SOA(Self::soa(soa)?),
        };

        Ok(Record::from_rdata(owner, record.ttl, rdata))
    }

    pub fn query_type_from_hickory(record_type: HickoryRecordType) -> QueryType {
        QueryType::from_u16(u16::from(record_type))
    }

    fn soa(soa: &SoaData) -> Result<SOA, DomainError> {
        Ok(SOA::new(
            Self::fqdn(&soa.mname)?,
            Self::fqdn(&soa.rname)?,
            soa.serial,
            soa.refresh,
            soa.retry,
            soa.expire,
            soa.minimum,
        ))
    }

    fn fqdn(name: &str) -> Result<Name, DomainError> {
        let absolute = format!("{}.", name.trim_end_matches('.'));
        Name::from_str(&absolute).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })
    }
}

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use zoneward_domain::{
    DomainError, RecordType, ResourceData, ResourceRecord, SoaData, DEFAULT_MX_PRIORITY,
    DEFAULT_SRV_PRIORITY,
};

mod helpers;
use helpers::ZoneRecordBuilder;

const OWNER: &str = "www.example.com";

#[test]
fn test_a_record_uses_stored_ttl() {
    let record = ZoneRecordBuilder::new().value("192.0.2.10").ttl(120).build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(rr.name.as_ref(), OWNER);
    assert_eq!(rr.ttl, 120);
    assert_eq!(rr.data, ResourceData::A(Ipv4Addr::new(192, 0, 2, 10)));
}

#[test]
fn test_aaaa_record() {
    let record = ZoneRecordBuilder::new()
        .kind("AAAA")
        .value("2001:db8::1")
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(
        rr.data,
        ResourceData::AAAA("2001:db8::1".parse::<Ipv6Addr>().unwrap())
    );
}

#[test]
fn test_a_record_with_ipv6_value_is_malformed() {
    let record = ZoneRecordBuilder::new().value("2001:db8::1").build();

    let err = ResourceRecord::synthesize(OWNER, &record).unwrap_err();

    assert!(matches!(err, DomainError::InvalidRecordValue { kind: "A", .. }));
}

#[test]
fn test_mx_without_priority_defaults_to_ten() {
    let record = ZoneRecordBuilder::new()
        .kind("MX")
        .value("mail.example.com")
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(DEFAULT_MX_PRIORITY, 10);
    assert_eq!(
        rr.data,
        ResourceData::MX {
            preference: 10,
            exchange: Arc::from("mail.example.com"),
        }
    );
}

#[test]
fn test_mx_keeps_stored_priority() {
    let record = ZoneRecordBuilder::new()
        .kind("MX")
        .value("mx2.example.com.")
        .priority(20)
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(
        rr.data,
        ResourceData::MX {
            preference: 20,
            exchange: Arc::from("mx2.example.com"),
        }
    );
}

#[test]
fn test_srv_without_priority_defaults_to_zero_with_fixed_weight_and_port() {
    let record = ZoneRecordBuilder::new()
        .name("_sip._tcp")
        .kind("SRV")
        .value("sip.example.com")
        .build();

    let rr = ResourceRecord::synthesize("_sip._tcp.example.com", &record).unwrap();

    assert_eq!(DEFAULT_SRV_PRIORITY, 0);
    assert_eq!(
        rr.data,
        ResourceData::SRV {
            priority: 0,
            weight: 0,
            port: 0,
            target: Arc::from("sip.example.com"),
        }
    );
}

#[test]
fn test_txt_is_a_single_character_string() {
    let record = ZoneRecordBuilder::new()
        .kind("TXT")
        .value("v=spf1 include:_spf.example.net ~all")
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(
        rr.data,
        ResourceData::TXT(Arc::from("v=spf1 include:_spf.example.net ~all"))
    );
}

#[test]
fn test_txt_longer_than_255_bytes_is_malformed() {
    let long = "x".repeat(256);
    let record = ZoneRecordBuilder::new().kind("TXT").value(&long).build();

    assert!(ResourceRecord::synthesize(OWNER, &record).is_err());
}

#[test]
fn test_caa_uses_issue_tag_and_zero_flags() {
    let record = ZoneRecordBuilder::new()
        .kind("CAA")
        .value("letsencrypt.org")
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(
        rr.data,
        ResourceData::CAA {
            flags: 0,
            tag: "issue",
            issuer: Arc::from("letsencrypt.org"),
            parameters: vec![],
        }
    );
}

#[test]
fn test_caa_keeps_issuer_parameters() {
    let record = ZoneRecordBuilder::new()
        .kind("CAA")
        .value("letsencrypt.org; validationmethods=dns-01")
        .build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(
        rr.data,
        ResourceData::CAA {
            flags: 0,
            tag: "issue",
            issuer: Arc::from("letsencrypt.org"),
            parameters: vec![(Arc::from("validationmethods"), Arc::from("dns-01"))],
        }
    );
}

#[test]
fn test_soa_fields_are_parsed_in_zone_file_order() {
    let record = ZoneRecordBuilder::new()
        .kind("SOA")
        .value("ns1.example.com. hostmaster.example.com. 2024010101 7200 3600 1209600 300")
        .ttl(3600)
        .build();

    let rr = ResourceRecord::synthesize("example.com", &record).unwrap();

    assert_eq!(rr.record_type(), RecordType::SOA);
    assert_eq!(
        rr.data,
        ResourceData::SOA(SoaData {
            mname: Arc::from("ns1.example.com"),
            rname: Arc::from("hostmaster.example.com"),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 300,
        })
    );
}

#[test]
fn test_kind_is_case_insensitive() {
    let record = ZoneRecordBuilder::new().kind("cname").value("alias.example.net").build();

    let rr = ResourceRecord::synthesize(OWNER, &record).unwrap();

    assert_eq!(rr.record_type(), RecordType::CNAME);
}

#[test]
fn test_unknown_kind_is_unsupported() {
    let record = ZoneRecordBuilder::new().kind("PTR").value("host.example.com").build();

    let err = ResourceRecord::synthesize(OWNER, &record).unwrap_err();

    assert!(matches!(err, DomainError::UnsupportedRecordType(ref k) if k == "PTR"));
}

#[test]
fn test_ns_with_invalid_host_is_malformed() {
    let record = ZoneRecordBuilder::new().kind("NS").value("ns1 example.com").build();

    assert!(matches!(
        ResourceRecord::synthesize(OWNER, &record),
        Err(DomainError::InvalidRecordValue { kind: "NS", .. })
    ));
}

#[test]
fn test_owner_trailing_separator_is_removed() {
    let record = ZoneRecordBuilder::new().build();

    let rr = ResourceRecord::synthesize("www.example.com.", &record).unwrap();

    assert_eq!(rr.name.as_ref(), "www.example.com");
}

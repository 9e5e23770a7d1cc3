pub mod framing;
pub mod listener;
pub mod record_mapper;
pub mod server;

pub use listener::{BoundDnsListener, DnsListener, ListenerOptions, ListenerState};
pub use record_mapper::RecordDataMapper;
pub use server::{DnsServerHandler, Transport, DEFAULT_MAX_UDP_PAYLOAD};

use super::record_mapper::RecordDataMapper;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};
use zoneward_application::use_cases::HandleDnsQueryUseCase;
use zoneward_domain::{DnsQuestion, DnsRequest, DomainError, QueryOutcome, ResponseStatus};

pub const DEFAULT_MAX_UDP_PAYLOAD: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Udp,
    Tcp,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "udp",
            Transport::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes raw DNS messages, runs them through the query use case and
/// encodes the reply. Shared by both transports.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    max_udp_payload: usize,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self {
            use_case,
            max_udp_payload: DEFAULT_MAX_UDP_PAYLOAD,
        }
    }

    pub fn with_max_udp_payload(mut self, max_udp_payload: usize) -> Self {
        self.max_udp_payload = max_udp_payload;
        self
    }

    /// Returns the encoded reply, or `None` when the message must be dropped
    /// without answering.
    pub async fn handle_raw(
        &self,
        query_buf: &[u8],
        client_ip: IpAddr,
        transport: Transport,
    ) -> Option<Vec<u8>> {
        if query_buf.len() < 2 {
            debug!(client = %client_ip, len = query_buf.len(), "Dropping message without an id");
            return None;
        }

        let request = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Malformed DNS message");
                // QR bit set: never answer a response, even a broken one.
                if query_buf.get(2).is_some_and(|flags| flags & 0x80 != 0) {
                    return None;
                }
                let id = u16::from_be_bytes([query_buf[0], query_buf[1]]);
                return Self::form_error(id);
            }
        };

        if request.message_type() == MessageType::Response {
            debug!(client = %client_ip, id = request.id(), "Ignoring DNS response message");
            return None;
        }

        if request.op_code() != OpCode::Query {
            debug!(client = %client_ip, op_code = ?request.op_code(), "Unsupported opcode");
            return Self::error_response(&request, ResponseCode::NotImp);
        }

        let dns_request = Self::to_domain_request(&request, client_ip);
        let outcome = self.use_case.execute(&dns_request).await;

        debug!(
            client = %client_ip,
            transport = %transport,
            status = %outcome.status,
            answers = outcome.answers.len(),
            authority = outcome.authority.len(),
            "Sending response"
        );

        let response = Self::build_response(&request, &outcome);
        let wire = match Self::serialize(&response) {
            Ok(wire) => wire,
            Err(e) => {
                error!(error = %e, "Failed to encode response, answering SERVFAIL");
                return Self::error_response(&request, ResponseCode::ServFail);
            }
        };

        if transport == Transport::Udp && wire.len() > self.max_udp_payload {
            debug!(
                size = wire.len(),
                limit = self.max_udp_payload,
                "Response exceeds UDP payload, setting TC"
            );
            return Self::truncated(&request, outcome.status);
        }

        Some(wire)
    }

    fn to_domain_request(request: &Message, client_ip: IpAddr) -> DnsRequest {
        let questions = request
            .queries()
            .iter()
            .map(|q| {
                // Punycode labels stay in their stored ASCII form.
                DnsQuestion::new(
                    q.name().to_ascii(),
                    RecordDataMapper::query_type_from_hickory(q.query_type()),
                )
            })
            .collect();

        DnsRequest::new(questions, client_ip)
    }

    fn response_to(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_authoritative(true);
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(false);
        response.set_response_code(code);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response
    }

    fn build_response(request: &Message, outcome: &QueryOutcome) -> Message {
        let mut response = Self::response_to(request, Self::response_code(outcome.status));

        for rr in &outcome.answers {
            match RecordDataMapper::to_hickory(rr) {
                Ok(record) => {
                    response.add_answer(record);
                }
                Err(e) => warn!(error = %e, name = %rr.name, "Skipping answer record"),
            }
        }

        for rr in &outcome.authority {
            match RecordDataMapper::to_hickory(rr) {
                Ok(record) => {
                    response.add_name_server(record);
                }
                Err(e) => warn!(error = %e, name = %rr.name, "Skipping authority record"),
            }
        }

        response
    }

    fn truncated(request: &Message, status: ResponseStatus) -> Option<Vec<u8>> {
        let mut response = Self::response_to(request, Self::response_code(status));
        response.set_truncated(true);
        Self::encode_or_log(&response)
    }

    fn error_response(request: &Message, code: ResponseCode) -> Option<Vec<u8>> {
        Self::encode_or_log(&Self::response_to(request, code))
    }

    fn form_error(id: u16) -> Option<Vec<u8>> {
        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_response_code(ResponseCode::FormErr);
        Self::encode_or_log(&response)
    }

    fn response_code(status: ResponseStatus) -> ResponseCode {
        match status {
            ResponseStatus::NoError => ResponseCode::NoError,
            ResponseStatus::NxDomain => ResponseCode::NXDomain,
            ResponseStatus::ServFail => ResponseCode::ServFail,
        }
    }

    fn encode_or_log(message: &Message) -> Option<Vec<u8>> {
        match Self::serialize(message) {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(error = %e, id = message.id(), "Failed to encode error response");
                None
            }
        }
    }

    fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::IoError(format!("Failed to serialize DNS message: {}", e)))?;

        Ok(buf)
    }
}

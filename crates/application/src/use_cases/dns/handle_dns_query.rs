use super::ResolveAuthorityUseCase;
use crate::ports::QueryLogRepository;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use zoneward_domain::{
    AuthorityResolution, DnsQuestion, DnsRequest, QueryLog, QueryOutcome, ZonePartition,
};

pub struct HandleDnsQueryUseCase {
    resolver: Arc<ResolveAuthorityUseCase>,
    query_log: Option<Arc<dyn QueryLogRepository>>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<ResolveAuthorityUseCase>) -> Self {
        Self {
            resolver,
            query_log: None,
        }
    }

    pub fn with_query_log(mut self, query_log: Arc<dyn QueryLogRepository>) -> Self {
        self.query_log = Some(query_log);
        self
    }

    /// Answers every question of the request in order.
    ///
    /// Records from all questions accumulate into one outcome; the result
    /// code is the one of the last question processed.
    pub async fn execute(&self, request: &DnsRequest) -> QueryOutcome {
        let mut outcome = QueryOutcome::default();

        for question in &request.questions {
            let start = Instant::now();
            let resolution = self.resolve_question(question).await;

            self.log_question(question, request.client_ip, &resolution, start);
            outcome.merge(resolution);
        }

        outcome
    }

    async fn resolve_question(&self, question: &DnsQuestion) -> AuthorityResolution {
        let name = question.normalized_name();
        let partition = ZonePartition::from_query_name(name);

        debug!(
            name = %name,
            query_type = %question.query_type,
            zone = %partition.zone,
            relative_name = %partition.relative_name,
            "Resolving question"
        );

        self.resolver
            .execute(name, question.query_type, &partition)
            .await
    }

    // Fire-and-forget, never delays the response.
    fn log_question(
        &self,
        question: &DnsQuestion,
        client_ip: IpAddr,
        resolution: &AuthorityResolution,
        start: Instant,
    ) {
        let Some(query_log) = &self.query_log else {
            return;
        };

        let entry = QueryLog {
            domain: Arc::from(question.normalized_name()),
            query_type: Arc::from(question.query_type.to_string()),
            client_ip,
            response_status: resolution.status.as_str(),
            answer_count: resolution.answers.len() as u32,
            response_time_us: Some(start.elapsed().as_micros() as u64),
            timestamp: None,
        };

        let logger = Arc::clone(query_log);
        tokio::spawn(async move {
            if let Err(e) = logger.log_query(&entry).await {
                warn!(error = %e, domain = %entry.domain, "Failed to log query");
            }
        });
    }
}

use super::Repositories;
use std::sync::Arc;
use tracing::info;
use zoneward_application::use_cases::{HandleDnsQueryUseCase, ResolveAuthorityUseCase};
use zoneward_domain::Config;

pub struct UseCases {
    pub handle_query: Arc<HandleDnsQueryUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories) -> Self {
        let resolver = Arc::new(
            ResolveAuthorityUseCase::new(repos.records.clone())
                .with_query_type_matching(config.dns.match_query_type),
        );

        let mut handle_query = HandleDnsQueryUseCase::new(resolver);
        if config.database.log_queries {
            info!("Query logging enabled");
            handle_query = handle_query.with_query_log(repos.query_log.clone());
        }

        Self {
            handle_query: Arc::new(handle_query),
        }
    }
}

mod handle_dns_query;
mod resolve_authority;

pub use handle_dns_query::HandleDnsQueryUseCase;
pub use resolve_authority::ResolveAuthorityUseCase;

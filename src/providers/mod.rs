pub mod chain;
pub mod fixture;
pub mod graph;
pub mod graphql;
pub mod metrics;
pub mod oembed;

use thiserror::Error;

use crate::models::PostRecord;

pub use chain::FallbackChain;
pub use fixture::StaticProvider;
pub use graph::GraphProvider;
pub use graphql::GraphQlScrapeProvider;
pub use oembed::OEmbedProvider;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    Unconfigured(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Bad post URL: {0}")]
    BadUrl(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        ProviderError::Upstream(error.to_string())
    }
}

/// Outcome of a single provider attempt. The fallback chain treats `Empty`
/// and `Failure` identically; only a non-empty `Success` stops the chain.
#[derive(Debug)]
pub enum ProviderOutcome {
    Success(Vec<PostRecord>),
    Empty,
    Failure(ProviderError),
}

/// One retrieval strategy against one upstream contract.
///
/// Implementations are stateless beyond configuration injected at
/// construction, and must map every failure (network, non-2xx, decode) into
/// `ProviderOutcome::Failure` rather than letting it escape.
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, targets: &[String]) -> ProviderOutcome;
}

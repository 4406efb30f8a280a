use log::{info, warn};

use crate::models::PostRecord;
use crate::providers::fixture::StaticProvider;
use crate::providers::{ProviderOutcome, SourceProvider};

/// Ordered provider cascade with an infallible static terminal.
///
/// Providers run strictly in configured order; the first non-empty
/// `Success` wins and later providers are not invoked. `Empty` and
/// `Failure` both advance the chain. Exhaustion degrades to the static
/// payload, so `fetch` never errors and never returns an empty batch.
pub struct FallbackChain {
    providers: Vec<Box<dyn SourceProvider>>,
    terminal: StaticProvider,
}

impl FallbackChain {
    pub fn new(providers: Vec<Box<dyn SourceProvider>>, terminal: StaticProvider) -> Self {
        Self {
            providers,
            terminal,
        }
    }

    pub async fn fetch(&self, targets: &[String]) -> Vec<PostRecord> {
        for provider in &self.providers {
            match provider.fetch(targets).await {
                ProviderOutcome::Success(posts) if !posts.is_empty() => {
                    info!("Provider '{}' returned {} posts", provider.name(), posts.len());
                    return posts;
                }
                ProviderOutcome::Success(_) | ProviderOutcome::Empty => {
                    warn!("Provider '{}' returned no usable data", provider.name());
                }
                ProviderOutcome::Failure(err) => {
                    warn!("Provider '{}' failed: {}", provider.name(), err);
                }
            }
        }

        warn!("All providers exhausted, serving static fallback posts");
        self.terminal.posts()
    }
}

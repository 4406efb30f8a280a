#[macro_use]
extern crate rocket;

pub mod api;
pub mod cache;
pub mod config;
pub mod cors;
pub mod models;
pub mod providers;
pub mod service;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use cache::PostCache;
use config::AppConfig;
use providers::{
    FallbackChain, GraphProvider, GraphQlScrapeProvider, OEmbedProvider, SourceProvider,
    StaticProvider,
};
use service::InstagramService;

/// Assemble the provider chain and service from configuration.
///
/// Order: credentialed media listing first (real engagement data), then the
/// query-endpoint scrape, then oEmbed (thumbnail only, simulated counts),
/// with the static payload as the terminal stage.
pub fn build_service(config: &AppConfig) -> InstagramService {
    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(GraphProvider::new(config)),
        Box::new(GraphQlScrapeProvider::new(config)),
        Box::new(OEmbedProvider::new(config)),
    ];

    let chain = FallbackChain::new(providers, StaticProvider::new(config));
    let cache = PostCache::new(config.cache_ttl_minutes);

    InstagramService::new(chain, cache, config.post_ids.clone())
}

/// Build the Rocket instance around an already-assembled service.
pub fn rocket_with(
    figment: Figment,
    config: AppConfig,
    service: InstagramService,
) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(cors::Cors)
        .manage(service)
        .manage(config)
        .mount(
            "/instagram",
            routes![api::instagram::get_posts, api::instagram::track_post],
        )
}

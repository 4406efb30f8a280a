#[macro_use]
extern crate rocket;

use std::env;

use dotenv::dotenv;
use env_logger::Env;
use gramcache::config::AppConfig;
use log::info;
use rocket::{
    figment::{
        providers::{Format, Toml},
        Figment, Profile,
    },
    Config,
};

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    // Load config
    let mut figment = Figment::from(Config::default()).merge(Toml::file("App.toml").nested());

    // Merge access token if available
    if let Ok(token) = env::var("ACCESS_TOKEN") {
        figment = figment.merge(("access_token", token));
    }

    // Merge cache TTL override
    if let Ok(minutes) = env::var("CACHE_TTL_MINUTES") {
        if let Ok(minutes) = minutes.parse::<u64>() {
            figment = figment.merge(("cache_ttl_minutes", minutes));
        }
    }

    // Merge feature gate
    if let Ok(enabled) = env::var("FEATURE_ENABLED") {
        let enabled = matches!(enabled.to_lowercase().as_str(), "1" | "true" | "yes");
        figment = figment.merge(("enabled", enabled));
    }

    // Merge tracked post ids
    if let Ok(post_ids) = env::var("INSTAGRAM_POST_IDS") {
        figment = figment.merge((
            "post_ids",
            post_ids
                .split(',')
                .map(|s| s.trim().to_string())
                .collect::<Vec<String>>(),
        ));
    }

    figment = figment.select(Profile::from_env_or("APP_PROFILE", "default"));

    // App config
    let config = figment.extract::<AppConfig>().unwrap();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    info!("Configuration loaded successfully");

    if config.access_token.is_some() {
        info!("Media listing provider enabled (access token configured)");
    } else {
        info!("Media listing provider disabled - no access token");
    }

    info!(
        "Post cache TTL: {} minutes, tracking {} post(s)",
        config.cache_ttl_minutes,
        config.post_ids.len()
    );

    if !config.enabled {
        info!("Instagram feed endpoint is disabled by configuration");
    }

    let service = gramcache::build_service(&config);

    gramcache::rocket_with(figment, config, service)
}

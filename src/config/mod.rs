use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub post_ids: Vec<String>,
    pub access_token: Option<String>,
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    #[serde(default = "default_graph_media_endpoint")]
    pub graph_media_endpoint: String,
    #[serde(default = "default_graphql_endpoint")]
    pub graphql_endpoint: String,
    #[serde(default = "default_graphql_doc_id")]
    pub graphql_doc_id: String,
    pub fallback_posts: Option<Vec<FallbackPost>>,
}

// Static post entry supplied through configuration, consumed by the
// terminal fallback provider.
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackPost {
    pub id: String,
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_cache_ttl_minutes() -> u64 {
    30
}

fn default_timeout() -> u64 {
    8
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_oembed_endpoint() -> String {
    "https://graph.facebook.com/v18.0/instagram_oembed".to_string()
}

fn default_graph_media_endpoint() -> String {
    "https://graph.instagram.com/me/media".to_string()
}

fn default_graphql_endpoint() -> String {
    "https://www.instagram.com/graphql/query".to_string()
}

fn default_graphql_doc_id() -> String {
    "8845758582119845".to_string()
}

use chrono::Utc;
use rocket::http::{ContentType, Header};
use rocket::serde::json::Json;
use rocket::{
    request::Request,
    response::{self, Responder, Response},
    State,
};
use serde::Deserialize;
use std::io::Cursor;

use crate::api::ApiError;
use crate::config::AppConfig;
use crate::models::{ClearCacheResponse, PostsResponse};
use crate::service::InstagramService;

#[get("/?<clear_cache>")]
pub async fn get_posts(
    clear_cache: Option<bool>,
    service: &State<InstagramService>,
    config: &State<AppConfig>,
) -> Result<JsonWithCache<PostsResponse>, ApiError> {
    if !config.enabled {
        return Err(ApiError::FeatureDisabled);
    }

    let force_refresh = clear_cache.unwrap_or(false);
    if force_refresh {
        service.clear_cache();
    }

    let (posts, cached, cache_age) = service.get_posts(force_refresh).await;

    Ok(JsonWithCache {
        inner: PostsResponse {
            success: true,
            data: posts,
            cached,
            cache_age,
            timestamp: Utc::now(),
        },
        from_cache: cached,
        cache_age,
        cache_duration: service.cache_ttl_secs(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPostRequest {
    pub post_id: Option<String>,
}

#[post("/", data = "<body>")]
pub async fn track_post(
    body: Json<TrackPostRequest>,
    service: &State<InstagramService>,
    config: &State<AppConfig>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    if !config.enabled {
        return Err(ApiError::FeatureDisabled);
    }

    let post_id = match body.post_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => return Err(ApiError::InvalidRequest("Post ID is required".to_string())),
    };

    let added = service.track_post(&post_id);
    service.clear_cache();

    let message = if added {
        format!("Post {} added, cache cleared", post_id)
    } else {
        format!("Post {} already tracked, cache cleared", post_id)
    };

    Ok(Json(ClearCacheResponse {
        success: true,
        message,
    }))
}

pub struct JsonWithCache<T> {
    pub inner: T,
    pub from_cache: bool,
    pub cache_age: Option<u64>,
    pub cache_duration: u64,
}

impl<'r, T: serde::Serialize> Responder<'r, 'static> for JsonWithCache<T> {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut response = Response::build();
        response.header(ContentType::JSON);
        // Cache headers: a cached payload advertises only its remaining
        // lifetime, a fresh one the full duration.
        if self.from_cache {
            let max_age = self
                .cache_age
                .map(|age| self.cache_duration.saturating_sub(age))
                .unwrap_or(self.cache_duration);
            response.header(Header::new(
                "Cache-Control",
                format!("public, max-age={}", max_age),
            ));
        } else {
            response.header(Header::new(
                "Cache-Control",
                format!("public, max-age={}", self.cache_duration),
            ));
        }
        response.sized_body(
            None,
            Cursor::new(serde_json::to_vec(&self.inner).unwrap()),
        );
        response.ok()
    }
}

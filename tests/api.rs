use gramcache::cache::PostCache;
use gramcache::config::AppConfig;
use gramcache::providers::{FallbackChain, StaticProvider};
use gramcache::service::InstagramService;
use rocket::figment::Figment;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

// Routes wired with an empty provider list: every fetch falls through to
// the static terminal, so no network is touched.
fn client(enabled: bool) -> Client {
    let mut config: AppConfig = Figment::new().extract().expect("valid config");
    config.enabled = enabled;
    config.post_ids = vec!["DNDtwCXIcoF".to_string()];

    let chain = FallbackChain::new(Vec::new(), StaticProvider::new(&config));
    let service = InstagramService::new(chain, PostCache::new(30), config.post_ids.clone());

    let rocket = gramcache::rocket_with(
        Figment::from(rocket::Config::default()),
        config,
        service,
    );
    Client::tracked(rocket).expect("valid rocket instance")
}

fn body_json(response: rocket::local::blocking::LocalResponse<'_>) -> Value {
    serde_json::from_str(&response.into_string().expect("response body")).expect("valid JSON")
}

#[test]
fn disabled_feature_returns_503() {
    let client = client(false);

    let response = client.get("/instagram").dispatch();
    assert_eq!(response.status(), Status::ServiceUnavailable);
    let body = body_json(response);
    assert_eq!(body["error"], "Feature disabled");

    let response = client
        .post("/instagram")
        .header(ContentType::JSON)
        .body(r#"{"postId":"abc"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::ServiceUnavailable);
}

#[test]
fn first_read_is_fresh_then_cached() {
    let client = client(true);

    let response = client.get("/instagram").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let cache_control = response
        .headers()
        .get_one("Cache-Control")
        .map(str::to_string);
    let body = body_json(response);
    assert_eq!(body["success"], true);
    assert_eq!(body["cached"], false);
    assert!(!body["data"].as_array().unwrap().is_empty());
    assert_eq!(cache_control.as_deref(), Some("public, max-age=1800"));

    let response = client.get("/instagram").dispatch();
    let body = body_json(response);
    assert_eq!(body["cached"], true);
}

#[test]
fn records_always_carry_an_image_url() {
    let client = client(true);

    let body = body_json(client.get("/instagram").dispatch());
    for post in body["data"].as_array().unwrap() {
        assert!(!post["imageUrl"].as_str().unwrap().is_empty());
        assert!(post["simulated"].is_boolean());
    }
}

#[test]
fn clear_cache_param_forces_a_refresh() {
    let client = client(true);

    client.get("/instagram").dispatch();
    let body = body_json(client.get("/instagram?clear_cache=true").dispatch());
    assert_eq!(body["cached"], false);
}

#[test]
fn post_without_id_is_rejected_and_cache_is_untouched() {
    let client = client(true);

    // Populate the cache.
    client.get("/instagram").dispatch();

    let response = client
        .post("/instagram")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    let body = body_json(response);
    assert_eq!(body["error"], "Invalid request");

    // The failed request must not have cleared the cache.
    let body = body_json(client.get("/instagram").dispatch());
    assert_eq!(body["cached"], true);
}

#[test]
fn post_with_id_clears_the_cache() {
    let client = client(true);

    client.get("/instagram").dispatch();

    let response = client
        .post("/instagram")
        .header(ContentType::JSON)
        .body(r#"{"postId":"XyZ123"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = body_json(response);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("XyZ123"));

    let body = body_json(client.get("/instagram").dispatch());
    assert_eq!(body["cached"], false);
}

#[test]
fn cors_headers_are_present() {
    let client = client(true);

    let response = client.get("/instagram").dispatch();
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
}

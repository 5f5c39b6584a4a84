use api_rest::{router, AppState, Views};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use http_body_util::BodyExt;
use orchard_core::memory::MemoryContentStore;
use orchard_core::{ContentItem, CoreConfig, DbSettings, DeploymentLabels};
use std::sync::Arc;
use tower::ServiceExt;

const REFUSED: &str = "Unable to connect to any of the specified MySQL hosts.";

fn items(n: i32) -> Vec<ContentItem> {
    let base = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    (1..=n)
        .map(|id| ContentItem {
            id,
            title: format!("Post {id}"),
            summary: format!("Summary of post {id}"),
            body: String::new(),
            content_type: "BlogPost".into(),
            author_id: 1,
            published_date: base + Duration::hours(id.into()),
            view_count: id,
            is_published: true,
            created_date: base,
        })
        .collect()
}

fn app_with(store: MemoryContentStore, cfg: CoreConfig) -> Router {
    let views = Views::new().unwrap();
    router(AppState::new(Arc::new(cfg), store, views))
}

fn app(store: MemoryContentStore) -> Router {
    app_with(store, CoreConfig::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn listed(html: &str) -> usize {
    html.matches(r#"class="content-item""#).count()
}

#[tokio::test]
async fn home_lists_twenty_newest_with_total() {
    let (status, html) = get(app(MemoryContentStore::with_items(&items(25))), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed(&html), 20);
    assert!(html.contains("Total records: 25"));
    assert!(html.contains(">Post 25<"));
    assert!(html.contains(">Post 6<"));
    assert!(!html.contains(">Post 5<"));
    assert!(html.find(">Post 25<").unwrap() < html.find(">Post 24<").unwrap());
}

#[tokio::test]
async fn home_aliases_render_the_same_listing() {
    for uri in ["/Home", "/Home/Index"] {
        let (status, html) = get(app(MemoryContentStore::with_items(&items(5))), uri).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(listed(&html), 5, "{uri}");
        assert!(html.contains("Total records: 5"), "{uri}");
    }
}

#[tokio::test]
async fn routes_match_any_case() {
    for uri in ["/home", "/HOME/index/", "/home/allcontent"] {
        let (status, html) = get(app(MemoryContentStore::with_items(&items(5))), uri).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(listed(&html), 5, "{uri}");
    }

    let (status, body) = get(app(MemoryContentStore::default()), "/home/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "OK");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, _) = get(app(MemoryContentStore::default()), "/home/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_on_empty_table() {
    let (status, html) = get(app(MemoryContentStore::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed(&html), 0);
    assert!(html.contains("Total records: 0"));
    assert!(html.contains("No content yet."));
}

#[tokio::test]
async fn home_footer_shows_configured_target() {
    let cfg = CoreConfig::new(
        DbSettings::new("db.example.com", 3307, "OrchardLiteDB", "root", "password"),
        DeploymentLabels::default(),
    );

    let (_, html) = get(app_with(MemoryContentStore::default(), cfg), "/").await;

    assert!(html.contains("db.example.com:3307"));
    assert!(html.contains("Rust 1.75"));
    assert!(html.contains("RDS MySQL 8.0"));
}

#[tokio::test]
async fn all_content_lists_everything() {
    let (status, html) = get(
        app(MemoryContentStore::with_items(&items(25))),
        "/Home/AllContent",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed(&html), 25);
    assert!(html.contains("Total records: 25"));
}

#[tokio::test]
async fn home_failure_renders_error_with_host() {
    let (status, html) = get(app(MemoryContentStore::unreachable(REFUSED)), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(REFUSED));
    assert!(html.contains("Database host: localhost"));
    assert_eq!(listed(&html), 0);
}

#[tokio::test]
async fn all_content_failure_renders_error_without_host() {
    let (status, html) = get(
        app(MemoryContentStore::failing_queries("Table 'ContentItems' doesn't exist")),
        "/Home/AllContent",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Table &#x27;ContentItems&#x27; doesn&#x27;t exist"));
    assert!(!html.contains("Database host:"));
}

#[tokio::test]
async fn health_is_ok_with_unreachable_database() {
    let cfg = CoreConfig::new(
        DbSettings::new("db.example.com", 3306, "OrchardLiteDB", "root", "password"),
        DeploymentLabels::default(),
    );

    let (status, body) = get(
        app_with(MemoryContentStore::unreachable(REFUSED), cfg),
        "/Home/Health",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["databaseHost"], "db.example.com");
    assert_eq!(json["phase"], "Phase 1 - Current State");
    assert_eq!(json["dotnetVersion"], "Rust 1.75");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn openapi_document_describes_health() {
    let (status, body) = get(app(MemoryContentStore::default()), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/Home/Health"));
    assert!(body.contains("HealthRes"));
}

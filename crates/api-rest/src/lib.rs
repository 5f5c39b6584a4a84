//! # API REST
//!
//! HTTP front end for Orchard Lite.
//!
//! Handles:
//! - HTML pages for the recent and full content listings
//! - The JSON health endpoint and its OpenAPI/Swagger documentation
//! - HTTP concerns (tracing, CORS)
//!
//! Uses `orchard-core` for content reads and `api-shared` for health reporting.

#![warn(rust_2018_idioms)]

pub mod views;

use api_shared::{HealthRes, HealthService};
use axum::{
    extract::{FromRef, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use orchard_core::{ContentReadService, ContentStore, CoreConfig};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use views::Views;

/// Application state shared across handlers
///
/// Holds the resolved configuration, the content service over store `S`, and the compiled views.
pub struct AppState<S> {
    cfg: Arc<CoreConfig>,
    content: ContentReadService<S>,
    views: Arc<Views>,
}

impl<S: Clone> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            cfg: self.cfg.clone(),
            content: self.content.clone(),
            views: self.views.clone(),
        }
    }
}

impl<S: ContentStore> AppState<S> {
    pub fn new(cfg: Arc<CoreConfig>, store: S, views: Views) -> Self {
        Self {
            cfg,
            content: ContentReadService::new(store),
            views: Arc::new(views),
        }
    }
}

impl<S> FromRef<AppState<S>> for Arc<CoreConfig> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.cfg.clone()
    }
}

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthRes)))]
struct ApiDoc;

/// Build the application router over `state`.
///
/// Routes mirror the conventional `Home` controller paths:
/// - `/`, `/Home`, `/Home/Index` - recent content
/// - `/Home/AllContent` - every item
/// - `/Home/Health` - JSON health payload
///
/// Any other casing of these paths, with or without a trailing slash, reaches the same handler.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: ContentStore + Clone + 'static,
{
    Router::new()
        .route("/", get(index::<S>))
        .route("/Home", get(index::<S>))
        .route("/Home/Index", get(index::<S>))
        .route("/Home/AllContent", get(all_content::<S>))
        .route("/Home/Health", get(health))
        .fallback(any_case::<S>)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Recent content page
///
/// Renders the 20 newest items with the total record count. A failed read renders the error
/// page with the failure message and the database host.
///
/// # Errors
/// Returns `500 Internal Server Error` if a page template fails to render.
async fn index<S>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, (StatusCode, &'static str)>
where
    S: ContentStore + Clone + 'static,
{
    let page = match state.content.recent_content().await {
        Ok(listing) => state.views.index(&listing, &state.cfg),
        Err(e) => {
            tracing::error!(kind = e.kind(), "Recent content error: {}", e);
            state
                .views
                .error(&e.to_string(), Some(state.cfg.db().host()))
        }
    };
    page.map(Html).map_err(render_failed)
}

/// Full content page
///
/// A failed read renders the error page with the failure message only.
///
/// # Errors
/// Returns `500 Internal Server Error` if a page template fails to render.
async fn all_content<S>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, (StatusCode, &'static str)>
where
    S: ContentStore + Clone + 'static,
{
    let page = match state.content.all_content().await {
        Ok(listing) => state.views.all_content(&listing),
        Err(e) => {
            tracing::error!(kind = e.kind(), "All content error: {}", e);
            state.views.error(&e.to_string(), None)
        }
    };
    page.map(Html).map_err(render_failed)
}

/// Case-insensitive dispatch for `Home` paths the exact-case routes missed.
async fn any_case<S>(State(state): State<AppState<S>>, method: Method, uri: Uri) -> Response
where
    S: ContentStore + Clone + 'static,
{
    if method != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }
    let path = uri.path().trim_end_matches('/').to_ascii_lowercase();
    match path.as_str() {
        "" | "/home" | "/home/index" => index(State(state)).await.into_response(),
        "/home/allcontent" => all_content(State(state)).await.into_response(),
        "/home/health" => health(State(state.cfg.clone())).await.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/Home/Health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Reports static deployment metadata and the current UTC time. Never touches the database.
#[axum::debug_handler]
async fn health(State(cfg): State<Arc<CoreConfig>>) -> Json<HealthRes> {
    Json(HealthService::check_health(&cfg))
}

fn render_failed(e: tera::Error) -> (StatusCode, &'static str) {
    tracing::error!("Template render error: {:?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

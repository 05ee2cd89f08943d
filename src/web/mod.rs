// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web UI and JSON API for the gallery
//!
//! Pages take `theme_clicks` / `lang_clicks` query parameters; the theme and
//! language are derived from their parity.

pub mod render;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::catalog::CatalogEntry;
use crate::classifier::{classify_stem, file_stem, normalize_name};
use crate::config::AppConfig;
use crate::events::{UiEvent, UiState};
use crate::gallery::Gallery;
use crate::i18n::Language;
use crate::route::{interpret_route, PageDescriptor, Route};
use crate::theme::Theme;
use crate::GalleryError;

use self::render::Renderer;

/// Shared application state
pub struct AppState {
    pub gallery: Gallery,
    pub config: AppConfig,
    renderer: Renderer,
}

impl AppState {
    pub fn new(gallery: Gallery, config: AppConfig) -> crate::Result<Self> {
        Ok(Self {
            gallery,
            config,
            renderer: Renderer::new()?,
        })
    }
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let images_dir = state.config.gallery.images_dir.clone();
    let images_prefix = state
        .config
        .gallery
        .images_url_prefix
        .trim_end_matches('/')
        .to_string();

    Router::new()
        // Pages
        .route("/", get(home_page))
        .route("/home", get(home_page))
        .route("/category/:key", get(category_page))
        .route("/chart/:key/:index", get(chart_page))
        // API endpoints
        .route("/health", get(health_check))
        .route("/api/categories", get(api_get_categories))
        .route("/api/images", get(api_get_images))
        .route("/api/page", get(api_get_page))
        .route("/api/events", post(api_post_event))
        .route("/api/classify", get(api_classify))
        // Image assets
        .nest_service(&images_prefix, ServeDir::new(images_dir))
        .fallback(fallback_page)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Page Handlers ===

/// Toggle click counters carried in the query string
#[derive(Debug, Default, Deserialize)]
pub struct Toggles {
    #[serde(default)]
    pub theme_clicks: u64,
    #[serde(default)]
    pub lang_clicks: u64,
}

impl Toggles {
    /// Malformed counters fall back to the initial state.
    fn or_default(query: Result<Query<Self>, QueryRejection>) -> Self {
        match query {
            Ok(Query(toggles)) => toggles,
            Err(rejection) => {
                debug!("Ignoring toggle query: {}", rejection);
                Self::default()
            }
        }
    }
}

async fn home_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    toggles: Result<Query<Toggles>, QueryRejection>,
) -> Result<Response, GalleryError> {
    render_route(&state, &uri, &Route::Home, Toggles::or_default(toggles))
}

async fn category_page(
    State(state): State<Arc<AppState>>,
    key: Result<Path<String>, PathRejection>,
    uri: Uri,
    toggles: Result<Query<Toggles>, QueryRejection>,
) -> Result<Response, GalleryError> {
    let route = match key {
        Ok(Path(key)) => Route::from_segments(&["category", &key]),
        Err(_) => Route::Unmatched,
    };
    render_route(&state, &uri, &route, Toggles::or_default(toggles))
}

async fn chart_page(
    State(state): State<Arc<AppState>>,
    params: Result<Path<(String, String)>, PathRejection>,
    uri: Uri,
    toggles: Result<Query<Toggles>, QueryRejection>,
) -> Result<Response, GalleryError> {
    let route = match params {
        Ok(Path((key, index))) => Route::from_segments(&["chart", &key, &index]),
        Err(_) => Route::Unmatched,
    };
    render_route(&state, &uri, &route, Toggles::or_default(toggles))
}

async fn fallback_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    toggles: Result<Query<Toggles>, QueryRejection>,
) -> Result<Response, GalleryError> {
    let route = Route::parse(uri.path());
    render_route(&state, &uri, &route, Toggles::or_default(toggles))
}

fn render_route(
    state: &AppState,
    uri: &Uri,
    route: &Route,
    toggles: Toggles,
) -> Result<Response, GalleryError> {
    let ui = UiState::new(uri.path(), toggles.theme_clicks, toggles.lang_clicks);
    let page = interpret_route(&state.gallery, route, ui.language())?;
    let html = state
        .renderer
        .render(&state.gallery, &page, &ui, &state.config.web.title)?;

    let status = if page.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    Ok((status, Html(html)).into_response())
}

// === API Handlers ===

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Deserialize)]
struct LangQuery {
    #[serde(default)]
    lang: Language,
}

#[derive(Serialize)]
pub struct CategorySummary {
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub keywords: Vec<String>,
    pub count: usize,
    pub link: String,
}

async fn api_get_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Json<Vec<CategorySummary>> {
    let catalog = state.gallery.catalog();
    let categories = state
        .gallery
        .categories()
        .iter()
        .map(|c| CategorySummary {
            key: c.key.clone(),
            title: c.title(query.lang).to_string(),
            description: c.description(query.lang).to_string(),
            icon: c.icon.clone(),
            keywords: c.keywords.clone(),
            count: catalog.images_in(&c.key).len(),
            link: Route::category_path(&c.key),
        })
        .collect();
    Json(categories)
}

async fn api_get_images(State(state): State<Arc<AppState>>) -> Json<Vec<CatalogEntry>> {
    Json(state.gallery.catalog().entries().to_vec())
}

#[derive(Serialize)]
pub struct PageResponse {
    pub state: UiState,
    pub language: Language,
    pub theme: Theme,
    pub page: PageDescriptor,
}

impl PageResponse {
    fn new(state: UiState, page: PageDescriptor) -> Self {
        Self {
            language: state.language(),
            theme: state.theme(),
            state,
            page,
        }
    }
}

async fn api_get_page(
    State(state): State<Arc<AppState>>,
    Query(ui): Query<UiState>,
) -> Result<Json<PageResponse>, GalleryError> {
    let page = ui.page(&state.gallery)?;
    Ok(Json(PageResponse::new(ui, page)))
}

#[derive(Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub state: UiState,
    pub event: UiEvent,
}

async fn api_post_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EventRequest>,
) -> Result<Json<PageResponse>, GalleryError> {
    let (next, page) = request.state.handle(&state.gallery, request.event)?;
    Ok(Json(PageResponse::new(next, page)))
}

#[derive(Deserialize)]
struct ClassifyQuery {
    name: String,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub name: String,
    pub stem: String,
    pub normalized: String,
    pub category: String,
}

async fn api_classify(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClassifyQuery>,
) -> Json<ClassifyResponse> {
    let stem = file_stem(std::path::Path::new(&query.name));
    let category = classify_stem(state.gallery.categories(), &stem).key.clone();
    Json(ClassifyResponse {
        normalized: normalize_name(&stem),
        name: query.name,
        stem,
        category,
    })
}

/// Start the web server for an already loaded gallery
pub async fn start_server(config: AppConfig, gallery: Gallery) -> crate::Result<()> {
    config.validate()?;
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState::new(gallery, config)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gallery available at http://{}", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .await
        .map_err(|e| GalleryError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

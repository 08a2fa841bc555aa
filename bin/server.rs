// Beach Directory - Web Server
// Sibling page variants (/ for zh, /index-jp.html for ja) plus a JSON API

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use beach_directory::{
    apply_criteria, logging, render_page, render_table, BeachRecord, CriteriaError, Directory,
    FileSource, FilterCriteria, Language,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "beach-server", version, about = "Serve the beach directory over HTTP")]
struct Cli {
    /// Directory holding beaches.json and beaches_ja.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: String,

    /// Static files served under /assets
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,
}

/// Shared application state: one loaded directory per language
#[derive(Clone)]
struct AppState {
    directories: Arc<HashMap<Language, Directory>>,
}

impl AppState {
    fn records(&self, language: Language) -> &[BeachRecord] {
        self.directories
            .get(&language)
            .map(|d| d.records())
            .unwrap_or_default()
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

#[derive(Serialize)]
struct BeachesResponse {
    language: &'static str,
    count: usize,
    beaches: Vec<BeachRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct FilterQuery {
    lang: Option<String>,
    search: Option<String>,
    lifeguard: Option<String>,
    shower: Option<String>,
    fee: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterQuery {
    fn criteria(&self) -> Result<FilterCriteria, CriteriaError> {
        FilterCriteria::from_controls(
            self.search.as_deref(),
            non_empty(&self.lifeguard),
            non_empty(&self.shower),
            non_empty(&self.fee),
        )
    }
}

fn bad_request(message: String) -> Response {
    warn!(%message, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /, /index.html, /index-jp.html - Directory page for the path's language
async fn serve_page(State(state): State<AppState>, uri: Uri, Query(query): Query<FilterQuery>) -> Response {
    let language = Language::from_page_path(uri.path());

    let criteria = match query.criteria() {
        Ok(c) => c,
        Err(e) => return bad_request(e.to_string()),
    };

    let subset = apply_criteria(state.records(language), &criteria);
    let view = render_table(&subset, language);
    Html(render_page(language, &criteria, &view)).into_response()
}

/// GET /api/beaches - Filtered records as JSON
async fn get_beaches(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Response {
    let language = match non_empty(&query.lang).map(str::parse::<Language>).transpose() {
        Ok(lang) => lang.unwrap_or_default(),
        Err(e) => return bad_request(e.to_string()),
    };
    let criteria = match query.criteria() {
        Ok(c) => c,
        Err(e) => return bad_request(e.to_string()),
    };

    let beaches = apply_criteria(state.records(language), &criteria);
    let response = BeachesResponse {
        language: language.tag(),
        count: beaches.len(),
        beaches,
    };
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

fn build_router(state: AppState, assets_dir: PathBuf) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/beaches", get(get_beaches))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_page))
        .route("/index.html", get(serve_page))
        .route("/index-jp.html", get(serve_page))
        .with_state(state)
        .nest("/api", api_routes)
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(CorsLayer::permissive())
}

/// Load both languages; a failed load leaves that language empty
fn load_directories(source: &FileSource) -> HashMap<Language, Directory> {
    [Language::Zh, Language::Ja]
        .into_iter()
        .map(|language| {
            let mut directory = Directory::new(language);
            let outcome = directory.load_from(source);
            info!(%language, ?outcome, "directory ready");
            (language, directory)
        })
        .collect()
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_stderr();

    let source = FileSource::new(&cli.data_dir);
    let directories = tokio::task::spawn_blocking(move || load_directories(&source))
        .await
        .context("Data loading task panicked")?;

    let state = AppState {
        directories: Arc::new(directories),
    };
    let app = build_router(state, cli.assets_dir.clone());

    let listener = tokio::net::TcpListener::bind(&cli.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", cli.addr))?;

    info!(addr = %cli.addr, "🚀 server running");
    println!("   中文:   http://{}/", cli.addr);
    println!("   日本語: http://{}/index-jp.html", cli.addr);
    println!("   API:    http://{}/api/beaches", cli.addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vsm_core::{DocId, IrSystem, LoadOptions, SearchError};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Deserialize)]
pub struct BooleanParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub title: String,
}

#[derive(Serialize)]
pub struct BooleanResponse {
    pub query: String,
    pub doc_ids: Vec<DocId>,
    pub titles: Vec<String>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: DocId,
    pub title: String,
    pub num_terms: u32,
}

/// The index is immutable after startup, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub system: Arc<IrSystem>,
}

/// Load and index the corpus under `data_dir`, then build the router.
pub fn build_app(data_dir: &FsPath, opts: &LoadOptions) -> Result<Router> {
    let system = IrSystem::load(data_dir, opts)?;
    tracing::info!(num_docs = system.num_docs(), num_terms = system.vocabulary().len(), "index ready");
    Ok(build_router(Arc::new(system)))
}

pub fn build_router(system: Arc<IrSystem>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/boolean", get(boolean_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { system })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let ranked = state.system.ranked_search(&params.q);
    let total_hits = ranked.len();
    let k = params.k.clamp(1, 100);

    let results = ranked
        .into_iter()
        .take(k)
        .map(|hit| SearchHit {
            doc_id: hit.doc_id,
            score: hit.score,
            title: state.system.title_of(hit.doc_id).unwrap_or_default().to_string(),
        })
        .collect();

    Json(SearchResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), total_hits, results })
}

pub async fn boolean_handler(State(state): State<AppState>, Query(params): Query<BooleanParams>) -> Result<Json<BooleanResponse>, (StatusCode, String)> {
    let doc_ids = state
        .system
        .boolean_search(&params.q)
        .map_err(|e: SearchError| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let titles = doc_ids
        .iter()
        .map(|&d| state.system.title_of(d).unwrap_or_default().to_string())
        .collect();
    Ok(Json(BooleanResponse { query: params.q, doc_ids, titles }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<DocResponse>, StatusCode> {
    let title = state.system.title_of(doc_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(DocResponse {
        doc_id,
        title: title.to_string(),
        num_terms: state.system.document_length(doc_id),
    }))
}

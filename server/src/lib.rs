use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use searchlite_core::tokenizer::tokenize;
use searchlite_core::{DocId, InvertedIndex, PrefixTrie, SearchHit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Index and autocompleter behind one lock. Neither structure synchronizes
/// itself, so every mutation must hold the write half.
#[derive(Default)]
struct Engine {
    index: InvertedIndex,
    autocomplete: PrefixTrie,
}

#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<Engine>>,
    admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct IndexRequest {
    pub documents: Vec<Document>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_search_k")]
    pub k: usize,
}
fn default_search_k() -> usize {
    10
}

#[derive(Deserialize)]
pub struct SuggestParams {
    pub prefix: String,
    #[serde(default = "default_suggest_k")]
    pub k: usize,
}
fn default_suggest_k() -> usize {
    5
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub terms: usize,
}

pub fn build_app() -> Router {
    let state = AppState {
        engine: Arc::new(RwLock::new(Engine::default())),
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
    };

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
        .route("/index", post(index_documents))
        .route("/search", get(search_handler))
        .route("/suggest", get(suggest_handler))
        .route("/documents/:doc_id", delete(delete_document))
        .route("/stats", get(stats_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Ingest a batch: each document is upserted into the index and its distinct
/// tokens are fed to the autocompleter.
pub async fn index_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<IndexRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    let mut count = 0usize;
    for doc in &req.documents {
        engine.index.upsert(doc.id, &doc.title, &doc.text);
        let vocab: HashSet<String> = tokenize(&doc.text).into_iter().collect();
        for token in &vocab {
            engine.autocomplete.insert(token);
        }
        count += 1;
    }
    tracing::info!(indexed = count, num_docs = engine.index.doc_count(), "batch indexed");
    Ok(Json(serde_json::json!({ "indexed": count })))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let results = state.engine.read().index.search(&params.q, params.k);
    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        results,
    })
}

pub async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    let suggestions = state.engine.read().autocomplete.suggest(&params.prefix, params.k);
    Json(SuggestResponse { suggestions })
}

/// The one user-visible failure in the API: deleting an id that is not
/// indexed is 404, unlike searches and suggestions which just come back
/// empty.
pub async fn delete_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    if state.engine.write().index.remove(doc_id) {
        Ok(Json(serde_json::json!({ "removed": doc_id })))
    } else {
        Err((StatusCode::NOT_FOUND, "document not found".into()))
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read();
    Json(StatsResponse {
        documents: engine.index.doc_count(),
        terms: engine.index.term_count(),
    })
}

/// Mutating routes are open unless ADMIN_TOKEN is configured, in which case
/// the caller must present it in X-ADMIN-TOKEN.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(required) = &state.admin_token else {
        return Ok(());
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

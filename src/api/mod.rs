use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::orchestrator::QueryOrchestrator;

const INDEX_HTML: &str = include_str!("../../frontend/index.html");

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: QueryOrchestrator,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/query", get(query))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// Always answers 200; a bad query string counts as an empty question
async fn query(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Json<QueryResponse> {
    let text = match params {
        Ok(Query(params)) => params.text,
        Err(rejection) => {
            warn!("Unreadable query string: {rejection}");
            String::new()
        }
    };

    let response = state.orchestrator.handle_query(&text).await;
    Json(QueryResponse { response })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

use super::AppState;
use crate::handlers::{
    SearchPartsRequest, SearchPartsResponse, SendQuoteEmailRequest, SendQuoteEmailResponse,
};
use crate::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

pub async fn search_parts(
    State(state): State<AppState>,
    payload: Result<Json<SearchPartsRequest>, JsonRejection>,
) -> Result<Json<SearchPartsResponse>, ApiError> {
    let Json(request) = payload?;
    state.search.handle(request).await.map(Json)
}

pub async fn send_quote_email(
    State(state): State<AppState>,
    payload: Result<Json<SendQuoteEmailRequest>, JsonRejection>,
) -> Result<Json<SendQuoteEmailResponse>, ApiError> {
    let Json(request) = payload?;
    state.quote.handle(request).await.map(Json)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

use actix_web::{get, web, HttpResponse};
use reviewrag_vector::SearchOptions;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{SearchParams, SearchResponse};

#[get("/api/search")]
pub async fn search(
    params: web::Query<SearchParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    if params.q.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Query cannot be empty",
        })));
    }

    let options = SearchOptions::new(
        params.top_k.unwrap_or(state.search_options.top_k),
        params
            .threshold
            .unwrap_or(state.search_options.distance_threshold),
    );

    let results = state.engine.search(&params.q, &options).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: params.q.clone(),
        count: results.len(),
        results,
    }))
}

#[get("/api/stats")]
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.stats().await)
}

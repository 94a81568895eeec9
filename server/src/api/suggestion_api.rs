//! Suggestion endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;

use crate::domain::{Suggestion, SuggestionQuery};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub success: bool,
    pub deleted: usize,
}

/// `?q=<prefix>&limit=<n>`; both optional
pub async fn list_suggestions(
    State(state): State<AppState>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Suggestion>>> {
    let Query(query) = query?;
    Ok(Json(state.suggestions.aggregate(&query).await?))
}

/// Permanently forget a content value, active rows included
pub async fn delete_suggestion(
    State(state): State<AppState>,
    content: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<PurgeResponse>> {
    let Path(content) = content?;
    let deleted = state.suggestions.purge_content(&content).await?;
    Ok(Json(PurgeResponse { success: true, deleted }))
}

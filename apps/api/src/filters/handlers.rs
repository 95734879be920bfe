use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::filters::builder::{
    build_query, compose_prompt, preview_clause, FilterQuery, FilterRow, JoinOp,
};

#[derive(Debug, Deserialize)]
pub struct BuildFiltersRequest {
    #[serde(default)]
    pub op: JoinOp,
    pub rows: Vec<FilterRow>,
}

#[derive(Debug, Serialize)]
pub struct BuildFiltersResponse {
    pub query: FilterQuery,
    pub previews: Vec<String>,
    pub prompt: String,
    /// False when no row produced a clause.
    pub runnable: bool,
}

/// POST /api/v1/filters/build
pub async fn handle_build_filters(
    Json(req): Json<BuildFiltersRequest>,
) -> Result<Json<BuildFiltersResponse>, AppError> {
    let query = build_query(req.op, &req.rows)?;
    let previews: Vec<String> = query.filters.iter().map(preview_clause).collect();
    let prompt = compose_prompt(query.op, &previews);

    info!(
        op = ?query.op,
        clauses = query.filters.len(),
        "Built structured filter"
    );

    Ok(Json(BuildFiltersResponse {
        runnable: !query.filters.is_empty(),
        query,
        previews,
        prompt,
    }))
}

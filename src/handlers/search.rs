use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{json, limit, ApiErr, ApiResp, Ctx, Result};
use crate::engine::{SearchOptions, SearchResults};

/// Search query params.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub typo: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResp {
    #[serde(flatten)]
    pub results: SearchResults,
    pub timestamp: DateTime<Utc>,
}

/// Autocomplete a query prefix, optionally with typo corrections.
pub async fn search(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<SearchQuery>,
) -> Result<ApiResp<SearchResp>> {
    if query.q.trim().is_empty() {
        return Err(ApiErr::new("query is required", StatusCode::BAD_REQUEST));
    }

    let opts = SearchOptions {
        limit: limit(query.limit, &ctx.consts),
        typo_tolerance: query.typo,
    };
    let results = ctx.engine.read().search(&query.q, opts);

    Ok(json(SearchResp {
        results,
        timestamp: Utc::now(),
    }))
}

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{engine_err, json, ApiResp, Ctx, Result};
use crate::{trie::TrieStats, typo::TypoConfig};

/// Typo config update request. Signed so that negative distances are
/// reported as config errors rather than body parse errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoConfigReq {
    pub max_edit_distance: i64,
    pub similarity_threshold: f64,
}

/// Get index stats.
pub async fn get_stats(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<TrieStats>> {
    Ok(json(ctx.engine.read().get_stats()))
}

/// Get the current typo tolerance config.
pub async fn get_typo_config(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<TypoConfig>> {
    Ok(json(ctx.engine.read().typo_config()))
}

/// Update the typo tolerance config. Takes effect on the next search.
pub async fn update_typo_config(
    State(ctx): State<Arc<Ctx>>,
    Json(req): Json<TypoConfigReq>,
) -> Result<ApiResp<TypoConfig>> {
    let cfg = TypoConfig::new(req.max_edit_distance, req.similarity_threshold)
        .map_err(engine_err)?;
    ctx.engine.write().set_typo_config(cfg).map_err(engine_err)?;

    log::info!(
        "typo config updated: max edit distance {}, similarity threshold {}",
        cfg.max_edit_distance,
        cfg.similarity_threshold
    );

    Ok(json(cfg))
}

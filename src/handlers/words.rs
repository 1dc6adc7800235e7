use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{engine_err, json, ApiResp, Ctx, Result};
use crate::trie::normalize;

/// Word insertion request.
#[derive(Debug, Deserialize)]
pub struct WordReq {
    pub word: String,
    #[serde(default)]
    pub frequency: u64,
}

/// Selection event params.
#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    #[serde(default = "default_delta")]
    pub delta: u64,
}

fn default_delta() -> u64 {
    1
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WordResp {
    pub word: String,
    pub frequency: u64,
}

/// Insert a word, or overwrite the frequency of an existing one.
pub async fn insert_word(
    State(ctx): State<Arc<Ctx>>,
    Json(req): Json<WordReq>,
) -> Result<ApiResp<WordResp>> {
    ctx.engine
        .write()
        .insert(&req.word, req.frequency)
        .map_err(engine_err)?;

    Ok(json(WordResp {
        word: normalize(&req.word),
        frequency: req.frequency,
    }))
}

/// Get the frequency of a word (0 if it isn't indexed).
pub async fn get_word(
    State(ctx): State<Arc<Ctx>>,
    Path(word): Path<String>,
) -> Result<ApiResp<WordResp>> {
    let frequency = ctx.engine.read().get_frequency(&word);
    Ok(json(WordResp {
        word: normalize(&word),
        frequency,
    }))
}

/// Record that a user picked a suggestion.
pub async fn select_word(
    State(ctx): State<Arc<Ctx>>,
    Path(word): Path<String>,
    Query(query): Query<SelectQuery>,
) -> Result<ApiResp<WordResp>> {
    let frequency = ctx
        .engine
        .write()
        .increment_frequency(&word, query.delta)
        .map_err(engine_err)?;

    Ok(json(WordResp {
        word: normalize(&word),
        frequency,
    }))
}

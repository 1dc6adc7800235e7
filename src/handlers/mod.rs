pub mod admin;
pub mod search;
pub mod words;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::RwLock;
use serde::Serialize;

use crate::{engine::Engine, error::Error, models::Config};

/// The engine shared across request handlers. Searches take the read lock;
/// mutations take the write lock for one synchronous call and never across
/// an `.await`.
pub type SharedEngine = Arc<RwLock<Engine>>;

/// Application context passed to all handlers.
pub struct Ctx {
    pub engine: SharedEngine,
    pub consts: Consts,
}

/// Application constants.
#[derive(Clone, Debug)]
pub struct Consts {
    pub admin_username: String,
    pub admin_password: String,

    // Suggestion limits.
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Consts {
    fn default() -> Self {
        Self {
            admin_username: String::new(),
            admin_password: String::new(),
            default_limit: crate::engine::DEFAULT_LIMIT,
            max_limit: 50,
        }
    }
}

impl From<&Config> for Consts {
    fn from(cfg: &Config) -> Self {
        Self {
            admin_username: cfg.app.admin_username.clone(),
            admin_password: cfg.app.admin_password.clone(),
            default_limit: cfg.app.default_limit,
            max_limit: cfg.app.max_limit,
        }
    }
}

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl<E: std::fmt::Display> From<E> for ApiErr {
    fn from(err: E) -> Self {
        Self::new(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Map engine errors to their HTTP status.
pub fn engine_err(err: Error) -> ApiErr {
    let status = match err {
        Error::InvalidInput(_) | Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
    };
    ApiErr::new(err.to_string(), status)
}

/// Resolve a requested suggestion limit: 0 means default, and anything above
/// the max is capped.
pub fn limit(requested: usize, consts: &Consts) -> usize {
    if requested == 0 {
        consts.default_limit
    } else {
        requested.min(consts.max_limit)
    }
}

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::handlers::{admin, search, words, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    // Public API routes.
    let pub_routes = Router::new()
        .route("/api/search", get(search::search))
        .route("/api/words", post(words::insert_word))
        .route("/api/words/{word}", get(words::get_word))
        .route("/api/words/{word}/select", post(words::select_word));

    let mut router = Router::new().merge(pub_routes);

    // Admin (requires auth). Disabled if no password is configured.
    if ctx.consts.admin_password.is_empty() {
        log::warn!("admin APIs disabled (no app.admin_password set)");
    } else {
        let admin_routes = Router::new()
            .route("/api/stats", get(admin::get_stats))
            .route(
                "/api/config/typo",
                get(admin::get_typo_config).put(admin::update_typo_config),
            )
            .route_layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

        router = router.merge(admin_routes);
        log::info!("admin APIs enabled");
    }

    router.with_state(ctx)
}

/// BasicAuth middleware checks for admin username & password defined in ctx constants.
async fn auth_middleware(
    State(ctx): State<Arc<Ctx>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if validate_basic_auth(
        request.headers(),
        &ctx.consts.admin_username,
        &ctx.consts.admin_password,
    ) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"typeahead\"")],
        "unauthorized",
    )
        .into_response()
}

/// Validate BasicAuth credentials from request headers.
fn validate_basic_auth(headers: &header::HeaderMap, username: &str, password: &str) -> bool {
    let check = || {
        let hdr = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let decoded = base64_decode(hdr.strip_prefix("Basic ")?).ok()?;
        let (user, pass) = decoded.split_once(':')?;
        Some(user == username && pass == password)
    };
    check().unwrap_or(false)
}

fn base64_decode(s: &str) -> Result<String, ()> {
    let bytes = STANDARD.decode(s).map_err(|_| ())?;
    String::from_utf8(bytes).map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(auth: &str) -> header::HeaderMap {
        let mut h = header::HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    #[test]
    fn test_basic_auth() {
        let ok = format!("Basic {}", STANDARD.encode("admin:secret"));
        assert!(validate_basic_auth(&headers(&ok), "admin", "secret"));

        let wrong = format!("Basic {}", STANDARD.encode("admin:nope"));
        assert!(!validate_basic_auth(&headers(&wrong), "admin", "secret"));

        assert!(!validate_basic_auth(&headers("Bearer abc"), "admin", "secret"));
        assert!(!validate_basic_auth(&headers("Basic !!!"), "admin", "secret"));
        assert!(!validate_basic_auth(&header::HeaderMap::new(), "admin", "secret"));
    }
}

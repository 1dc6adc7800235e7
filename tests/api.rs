// HTTP handler tests. Handlers are plain async functions, so they are called
// directly with their extractors.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use parking_lot::RwLock;
use typeahead::{
    engine::Engine,
    handlers::{
        admin::{self, TypoConfigReq},
        search::{self, SearchQuery},
        words::{self, SelectQuery, WordReq},
        Consts, Ctx,
    },
    http,
};

fn ctx(pairs: &[(&str, u64)]) -> Arc<Ctx> {
    let mut engine = Engine::new();
    for (w, f) in pairs {
        engine.insert(w, *f).unwrap();
    }

    Arc::new(Ctx {
        engine: Arc::new(RwLock::new(engine)),
        consts: Consts {
            default_limit: 2,
            max_limit: 3,
            ..Default::default()
        },
    })
}

fn query(q: &str, limit: usize, typo: bool) -> Query<SearchQuery> {
    Query(SearchQuery {
        q: q.to_string(),
        limit,
        typo,
    })
}

#[tokio::test]
async fn test_search() {
    let c = ctx(&[("apple", 10), ("application", 8), ("apply", 6), ("apt", 1)]);

    let resp = search::search(State(c.clone()), query("App", 0, false))
        .await
        .unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.results.query, "app");
    assert_eq!(data.results.suggestions.len(), 2);

    // Capped at max_limit.
    let resp = search::search(State(c), query("ap", 100, false))
        .await
        .unwrap();
    assert_eq!(resp.data.unwrap().results.suggestions.len(), 3);
}

#[tokio::test]
async fn test_search_response_shape() {
    let c = ctx(&[("hello", 100)]);
    let resp = search::search(State(c), query("helo", 5, true))
        .await
        .unwrap();

    let v = serde_json::to_value(&resp).unwrap();
    let data = &v["data"];
    assert_eq!(data["query"], "helo");
    assert_eq!(data["typoToleranceUsed"], true);
    assert_eq!(data["exactMatches"], 0);
    assert_eq!(data["typoCorrections"], 1);
    assert_eq!(data["suggestions"][0]["word"], "hello");
    assert_eq!(data["suggestions"][0]["type"], "typo_correction");
    assert!(data["timestamp"].is_string());
    assert!(v.get("message").is_none());
}

#[tokio::test]
async fn test_search_requires_query() {
    let c = ctx(&[("apple", 10)]);
    let err = search::search(State(c), query("   ", 5, false))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insert_and_select() {
    let c = ctx(&[]);

    let resp = words::insert_word(
        State(c.clone()),
        Json(WordReq {
            word: " Apple ".to_string(),
            frequency: 10,
        }),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().word, "apple");

    let resp = words::select_word(
        State(c.clone()),
        Path("apple".to_string()),
        Query(SelectQuery { delta: 5 }),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().frequency, 15);

    let resp = words::get_word(State(c), Path("APPLE".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.data.unwrap().frequency, 15);
}

#[tokio::test]
async fn test_insert_empty_word() {
    let c = ctx(&[]);
    let err = words::insert_word(
        State(c),
        Json(WordReq {
            word: "".to_string(),
            frequency: 1,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_missing_word() {
    let c = ctx(&[("apple", 10)]);
    let err = words::select_word(
        State(c),
        Path("pear".to_string()),
        Query(SelectQuery { delta: 1 }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_word() {
    let c = ctx(&[]);
    let resp = words::get_word(State(c), Path("pear".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.data.unwrap().frequency, 0);
}

#[tokio::test]
async fn test_typo_config() {
    let c = ctx(&[("help", 40)]);

    let resp = admin::update_typo_config(
        State(c.clone()),
        Json(TypoConfigReq {
            max_edit_distance: 1,
            similarity_threshold: 0.8,
        }),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().max_edit_distance, 1);

    let resp = admin::get_typo_config(State(c.clone())).await.unwrap();
    assert_eq!(resp.data.unwrap().similarity_threshold, 0.8);

    // The new config applies to the next search.
    let resp = search::search(State(c), query("helo", 5, true))
        .await
        .unwrap();
    assert!(resp.data.unwrap().results.suggestions.is_empty());
}

#[tokio::test]
async fn test_typo_config_invalid() {
    let c = ctx(&[]);

    for (d, t) in [(-1, 0.5), (2, 1.5), (2, -0.2)] {
        let err = admin::update_typo_config(
            State(c.clone()),
            Json(TypoConfigReq {
                max_edit_distance: d,
                similarity_threshold: t,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    // Unchanged.
    let resp = admin::get_typo_config(State(c)).await.unwrap();
    assert_eq!(resp.data.unwrap().max_edit_distance, 2);
}

#[tokio::test]
async fn test_stats() {
    let c = ctx(&[("ab", 1), ("abc", 1)]);
    let resp = admin::get_stats(State(c)).await.unwrap();
    let stats = resp.data.unwrap();
    assert_eq!(stats.word_count, 2);
    assert_eq!(stats.node_count, 4);
}

#[test]
fn test_router_builds() {
    // Without an admin password the admin routes are skipped.
    let _ = http::init_handlers(ctx(&[]));

    let mut engine = Engine::new();
    engine.insert("apple", 1).unwrap();
    let with_admin = Arc::new(Ctx {
        engine: Arc::new(RwLock::new(engine)),
        consts: Consts {
            admin_username: "admin".to_string(),
            admin_password: "secret".to_string(),
            ..Default::default()
        },
    });
    let _ = http::init_handlers(with_admin);
}

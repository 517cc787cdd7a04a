mod etfs;
mod health;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    response::Html,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;
use crate::models::ServiceInfo;

/// Assembles the full application router: CORS, request tracing, the
/// root/docs/health routes, and the `/api` resource nest.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new().merge(etfs::router());

    Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .merge(health::router())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "ETF Helper API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
    })
}

/// Static endpoint index the root discovery payload points to.
async fn docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

const DOCS_HTML: &str = r#"<!doctype html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <title>ETF Helper API</title>
  <style>
    body { font-family: sans-serif; margin: 2rem auto; max-width: 48rem; }
    code { background: #f4f4f4; padding: 0.1rem 0.3rem; }
    td, th { text-align: left; padding: 0.3rem 0.8rem 0.3rem 0; }
  </style>
</head>
<body>
  <h1>ETF Helper API</h1>
  <p>국내 ETF 정보 조회 API. 모든 응답은 <code>{success, data|error, meta?}</code> 형식입니다.</p>
  <table>
    <tr><th>Endpoint</th><th>Description</th></tr>
    <tr><td><code>GET /health</code></td><td>서버 상태 확인</td></tr>
    <tr><td><code>GET /api/etfs?category=&amp;manager=&amp;search=&amp;sort=&amp;page=&amp;limit=</code></td><td>ETF 목록 조회</td></tr>
    <tr><td><code>GET /api/etfs/{code}</code></td><td>ETF 상세 정보 조회</td></tr>
    <tr><td><code>GET /api/etfs/{code}/prices?period=</code></td><td>ETF 가격 히스토리 조회 (1m, 3m, 6m, 1y)</td></tr>
    <tr><td><code>GET /api/etfs/{code}/holdings</code></td><td>ETF 구성 종목 조회</td></tr>
  </table>
</body>
</html>
"#;

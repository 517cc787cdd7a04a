use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use etf_helper_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> axum::Router {
    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn list_returns_the_sample_page() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs?page=1&limit=20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 20);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["total_pages"], 1);
    // default sort is -return_1y
    assert_eq!(items[0]["code"], "091160");
    assert_eq!(items[1]["code"], "069500");
}

#[tokio::test]
async fn list_rejects_out_of_range_limit() {
    for uri in ["/api/etfs?limit=0", "/api/etfs?limit=101"] {
        let app = build_test_router().await;
        let (status, body) = get_json(app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"]["limit"].is_string());
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn list_rejects_non_numeric_paging() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs?page=abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"]["page"], "must be an integer");
}

#[tokio::test]
async fn list_filters_by_category() {
    let app = build_test_router().await;
    // category=섹터
    let (status, body) = get_json(app, "/api/etfs?category=%EC%84%B9%ED%84%B0").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "091160");
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn list_searches_across_name_and_code() {
    let app = build_test_router().await;
    let (_, body) = get_json(app, "/api/etfs?search=kodex").await;
    assert_eq!(body["meta"]["total"], 2);

    let app = build_test_router().await;
    let (_, body) = get_json(app, "/api/etfs?search=069").await;
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn list_sorts_by_requested_field() {
    let app = build_test_router().await;
    let (_, body) = get_json(app, "/api/etfs?sort=price").await;
    assert_eq!(body["data"][0]["code"], "091160");

    let app = build_test_router().await;
    let (_, body) = get_json(app, "/api/etfs?sort=-price").await;
    assert_eq!(body["data"][0]["code"], "069500");

    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs?sort=bogus").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["details"]["sort"].is_string());
}

#[tokio::test]
async fn list_paginates() {
    let app = build_test_router().await;
    let (_, body) = get_json(app, "/api/etfs?page=2&limit=1").await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "069500");
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn detail_returns_market_stats() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/091160").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["code"], "091160");
    assert_eq!(data["name"], "KODEX 반도체");
    assert_eq!(data["category"], "섹터");
    assert_eq!(data["manager"], "삼성자산운용");
    assert_eq!(data["listed_at"], "2020-01-15");
    assert_eq!(data["fee"], 0.45);
    assert_eq!(data["nav"], 1_200_000_000_000i64);
    assert_eq!(data["price"], 12_500);
    assert_eq!(data["volume"], 1_234_567);
    assert!(data["return_1y"].is_number());
}

#[tokio::test]
async fn detail_for_unknown_code_is_404() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn prices_default_to_one_year() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/091160/prices").await;

    assert_eq!(status, StatusCode::OK);
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 26);
    let dates: Vec<&str> = points
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted, "series must be ordered by date");
    assert_eq!(points[0]["price"], 11_000);
}

#[tokio::test]
async fn prices_honor_the_period_parameter() {
    let app = build_test_router().await;
    let (_, one_month) = get_json(app, "/api/etfs/091160/prices?period=1m").await;

    let app = build_test_router().await;
    let (_, one_year) = get_json(app, "/api/etfs/091160/prices?period=1y").await;

    let short = one_month["data"].as_array().unwrap().len();
    let long = one_year["data"].as_array().unwrap().len();
    assert!(short < long, "{short} vs {long}");

    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/091160/prices?period=2y").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["details"]["period"].is_string());
}

#[tokio::test]
async fn prices_for_unknown_code_are_404() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/999999/prices").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn holdings_are_ordered_by_weight() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/091160/holdings").await;

    assert_eq!(status, StatusCode::OK);
    let holdings = body["data"].as_array().unwrap();
    assert_eq!(holdings[0]["name"], "삼성전자");
    assert_eq!(holdings[0]["weight"], 25.3);
    let weights: Vec<f64> = holdings
        .iter()
        .map(|h| h["weight"].as_f64().unwrap())
        .collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn holdings_for_unknown_code_are_404() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/api/etfs/999999/holdings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn health_reports_liveness() {
    let app = build_test_router().await;
    let (status, first) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["data"]["status"], "healthy");
    assert_eq!(first["data"]["version"], env!("CARGO_PKG_VERSION"));
    let timestamp = first["data"]["timestamp"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp must be RFC 3339");

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let app = build_test_router().await;
    let (_, second) = get_json(app, "/health").await;
    assert_ne!(
        first["data"]["timestamp"], second["data"]["timestamp"],
        "timestamps must advance between calls"
    );
}

#[tokio::test]
async fn root_returns_discovery_payload() {
    let app = build_test_router().await;
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ETF Helper API");
    assert_eq!(body["docs"], "/docs");

    let app = build_test_router().await;
    let response = app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("ETF Helper API"));
}

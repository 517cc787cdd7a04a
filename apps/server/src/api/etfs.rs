use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use etf_helper_core::{
    etfs::{EtfDetail, EtfListQuery, EtfSummary, HoldingWeight, Period, PricePoint},
    response::ApiResponse,
    Error,
};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, serde::Deserialize)]
pub struct ListEtfsParams {
    category: Option<String>,
    manager: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    // kept as strings so malformed numbers surface as the standard
    // validation envelope instead of the framework's rejection
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct PriceHistoryParams {
    period: Option<String>,
}

impl ListEtfsParams {
    fn into_query(self) -> Result<EtfListQuery, Error> {
        let page = parse_integer("page", self.page.as_deref())?;
        let limit = parse_integer("limit", self.limit.as_deref())?;
        EtfListQuery::new(
            self.category,
            self.manager,
            self.search,
            self.sort.as_deref(),
            page,
            limit,
        )
    }
}

fn parse_integer(field: &str, value: Option<&str>) -> Result<Option<i64>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            let mut details = serde_json::Map::new();
            details.insert(field.to_string(), "must be an integer".into());
            Error::validation_with(serde_json::Value::Object(details))
        }),
    }
}

/// List ETFs with filtering, sorting, and pagination.
async fn list_etfs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEtfsParams>,
) -> ApiResult<Json<ApiResponse<Vec<EtfSummary>>>> {
    let query = params.into_query()?;
    let page = state.etf_service.list_etfs(&query).await?;
    Ok(Json(ApiResponse::paginated(
        page.items, page.page, page.limit, page.total,
    )))
}

/// Single ETF detail, 404 for unknown codes.
async fn get_etf(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<ApiResponse<EtfDetail>>> {
    let detail = state.etf_service.get_etf(&code).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Price history over the requested period (default 1y).
async fn get_etf_prices(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<PriceHistoryParams>,
) -> ApiResult<Json<ApiResponse<Vec<PricePoint>>>> {
    let period = match params.period.as_deref() {
        Some(value) => value.parse::<Period>()?,
        None => Period::default(),
    };
    let points = state.etf_service.get_price_history(&code, period).await?;
    Ok(Json(ApiResponse::success(points)))
}

/// Constituent stocks ordered by weight.
async fn get_etf_holdings(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<HoldingWeight>>>> {
    let holdings = state.etf_service.get_holdings(&code).await?;
    Ok(Json(ApiResponse::success(holdings)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/etfs", get(list_etfs))
        .route("/etfs/{code}", get(get_etf))
        .route("/etfs/{code}/prices", get(get_etf_prices))
        .route("/etfs/{code}/holdings", get(get_etf_holdings))
}

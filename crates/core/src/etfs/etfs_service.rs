use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::etfs::etfs_model::{
    Etf, EtfDetail, EtfListQuery, EtfPage, EtfPrice, EtfSummary, HoldingWeight, Period,
    PricePoint, SortField, SortSpec,
};
use crate::etfs::etfs_traits::{EtfRepositoryTrait, EtfServiceTrait};

/// Read-side ETF service: filtering, sorting, pagination, and market
/// stats derived from the price series.
pub struct EtfService {
    repository: Arc<dyn EtfRepositoryTrait>,
}

impl EtfService {
    pub fn new(repository: Arc<dyn EtfRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn summarize(&self, etf: &Etf) -> Result<EtfSummary> {
        let prices = self.sorted_prices(&etf.code)?;
        Ok(EtfSummary {
            code: etf.code.clone(),
            name: etf.name.clone(),
            category: etf.category.clone(),
            manager: etf.manager.clone(),
            price: prices.last().map(|p| p.close_price),
            return_1y: trailing_return(&prices, Period::OneYear),
        })
    }

    fn sorted_prices(&self, code: &str) -> Result<Vec<EtfPrice>> {
        let mut prices = self.repository.load_prices(code)?;
        prices.sort_by_key(|p| p.date);
        Ok(prices)
    }

    fn require_etf(&self, code: &str) -> Result<Etf> {
        self.repository
            .get_etf(code)?
            .ok_or_else(Error::not_found)
    }
}

#[async_trait]
impl EtfServiceTrait for EtfService {
    async fn list_etfs(&self, query: &EtfListQuery) -> Result<EtfPage> {
        let etfs = self.repository.list_etfs()?;
        let mut summaries = Vec::new();
        for etf in etfs.iter().filter(|etf| matches_filters(etf, query)) {
            summaries.push(self.summarize(etf)?);
        }
        sort_summaries(&mut summaries, query.sort);

        let total = summaries.len() as u64;
        let offset = (query.page as u64 - 1).saturating_mul(query.limit as u64);
        let items: Vec<EtfSummary> = summaries
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(query.limit as usize)
            .collect();

        Ok(EtfPage {
            items,
            page: query.page,
            limit: query.limit,
            total,
        })
    }

    async fn get_etf(&self, code: &str) -> Result<EtfDetail> {
        let etf = self.require_etf(code)?;
        let prices = self.sorted_prices(code)?;
        Ok(EtfDetail {
            code: etf.code,
            name: etf.name,
            category: etf.category,
            manager: etf.manager,
            listed_at: etf.listed_at,
            fee: etf.fee,
            nav: etf.nav,
            price: prices.last().map(|p| p.close_price),
            return_1m: trailing_return(&prices, Period::OneMonth),
            return_3m: trailing_return(&prices, Period::ThreeMonths),
            return_6m: trailing_return(&prices, Period::SixMonths),
            return_1y: trailing_return(&prices, Period::OneYear),
            volume: prices.last().map(|p| p.volume),
        })
    }

    async fn get_price_history(&self, code: &str, period: Period) -> Result<Vec<PricePoint>> {
        self.require_etf(code)?;
        let prices = self.sorted_prices(code)?;
        let Some(latest) = prices.last() else {
            return Ok(Vec::new());
        };
        let start = period.window_start(latest.date);
        Ok(prices
            .iter()
            .filter(|p| p.date >= start)
            .map(|p| PricePoint {
                date: p.date,
                price: p.close_price,
            })
            .collect())
    }

    async fn get_holdings(&self, code: &str) -> Result<Vec<HoldingWeight>> {
        self.require_etf(code)?;
        let mut holdings = self.repository.load_holdings(code)?;
        holdings.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.stock_name.cmp(&b.stock_name))
        });
        Ok(holdings
            .into_iter()
            .map(|h| HoldingWeight {
                name: h.stock_name,
                weight: h.weight,
            })
            .collect())
    }
}

fn matches_filters(etf: &Etf, query: &EtfListQuery) -> bool {
    if let Some(category) = &query.category {
        if &etf.category != category {
            return false;
        }
    }
    if let Some(manager) = &query.manager {
        if &etf.manager != manager {
            return false;
        }
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let name = etf.name.to_lowercase();
        let code = etf.code.to_lowercase();
        if !name.contains(&needle) && !code.contains(&needle) {
            return false;
        }
    }
    true
}

/// Trailing return over `period`, percent, rounded to two decimals.
///
/// The base point is the last row at or before the window start; for a
/// series younger than the window it falls back to the earliest row.
/// `prices` must be sorted ascending by date.
fn trailing_return(prices: &[EtfPrice], period: Period) -> Option<f64> {
    let latest = prices.last()?;
    let start = period.window_start(latest.date);
    let base = prices
        .iter()
        .rev()
        .find(|p| p.date <= start)
        .or_else(|| prices.first())?;
    if base.date == latest.date || base.close_price == 0 {
        return None;
    }
    let change =
        (latest.close_price - base.close_price) as f64 / base.close_price as f64 * 100.0;
    Some((change * 100.0).round() / 100.0)
}

fn sort_summaries(summaries: &mut [EtfSummary], spec: SortSpec) {
    summaries.sort_by(|a, b| {
        let ordering = match spec.field {
            SortField::Code => direct(a.code.cmp(&b.code), spec.descending),
            SortField::Name => direct(a.name.cmp(&b.name), spec.descending),
            SortField::Price => optional(a.price, b.price, spec.descending),
            SortField::Return1y => optional(a.return_1y, b.return_1y, spec.descending),
        };
        // stable tiebreak so pagination never reshuffles
        ordering.then_with(|| a.code.cmp(&b.code))
    });
}

fn direct(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Orders optional values; rows without a value always sort last.
fn optional<T: PartialOrd>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => direct(x.partial_cmp(&y).unwrap_or(Ordering::Equal), descending),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

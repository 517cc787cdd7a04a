use async_trait::async_trait;

use crate::errors::Result;
use crate::etfs::etfs_model::{
    Etf, EtfDetail, EtfHolding, EtfListQuery, EtfPage, EtfPrice, HoldingWeight, Period,
    PricePoint,
};

/// Trait for ETF read operations against the backing store.
///
/// Implemented by [`SampleEtfRepository`] today; a SQL-backed repository
/// slots in here once the ingestion pipeline exists.
///
/// [`SampleEtfRepository`]: super::SampleEtfRepository
pub trait EtfRepositoryTrait: Send + Sync {
    fn list_etfs(&self) -> Result<Vec<Etf>>;
    fn get_etf(&self, code: &str) -> Result<Option<Etf>>;
    /// Price rows for one ETF, no ordering guarantee.
    fn load_prices(&self, code: &str) -> Result<Vec<EtfPrice>>;
    fn load_holdings(&self, code: &str) -> Result<Vec<EtfHolding>>;
}

/// Trait for ETF service operations.
#[async_trait]
pub trait EtfServiceTrait: Send + Sync {
    async fn list_etfs(&self, query: &EtfListQuery) -> Result<EtfPage>;
    async fn get_etf(&self, code: &str) -> Result<EtfDetail>;
    async fn get_price_history(&self, code: &str, period: Period) -> Result<Vec<PricePoint>>;
    async fn get_holdings(&self, code: &str) -> Result<Vec<HoldingWeight>>;
}

//! ETF module - domain models, services, and traits.

mod etfs_model;
mod etfs_service;
mod etfs_traits;
mod sample_data;

pub use etfs_model::{
    Etf, EtfDetail, EtfHolding, EtfListQuery, EtfPage, EtfPrice, EtfSummary, HoldingWeight,
    Period, PricePoint, SortField, SortSpec, DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT,
    MAX_LIMIT,
};
pub use etfs_service::EtfService;
pub use etfs_traits::{EtfRepositoryTrait, EtfServiceTrait};
pub use sample_data::SampleEtfRepository;

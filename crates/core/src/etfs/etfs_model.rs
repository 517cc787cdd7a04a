//! ETF domain models and query types.
//!
//! The entity structs mirror the relational schema (`etfs`, `etf_prices`,
//! `etf_holdings`) that a future storage layer will map. They are plain
//! data-transfer structs; persistence stays behind [`EtfRepositoryTrait`].
//!
//! [`EtfRepositoryTrait`]: super::EtfRepositoryTrait

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// ETF master record (`etfs` table). `code` is the primary key referenced
/// by all dependent entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etf {
    pub code: String,
    pub name: String,
    pub category: String,
    pub manager: String,
    pub listed_at: NaiveDate,
    /// Management fee as a percentage fraction, e.g. 0.45.
    pub fee: f64,
    /// Net asset value in KRW.
    pub nav: i64,
    pub updated_at: NaiveDateTime,
}

/// Daily closing price row (`etf_prices` table). `(etf_code, date)` is
/// unique in a correct dataset; not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfPrice {
    pub id: i64,
    pub etf_code: String,
    pub date: NaiveDate,
    /// Closing price in KRW.
    pub close_price: i64,
    pub volume: i64,
}

/// Constituent stock row (`etf_holdings` table). Weights for one ETF sum
/// to at most 100 in a correct dataset; not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfHolding {
    pub id: i64,
    pub etf_code: String,
    pub stock_name: String,
    /// Weight within the ETF, percent.
    pub weight: f64,
    pub updated_at: NaiveDateTime,
}

/// List item returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfSummary {
    pub code: String,
    pub name: String,
    pub category: String,
    pub manager: String,
    /// Latest closing price, absent when no price rows exist yet.
    pub price: Option<i64>,
    /// Trailing one-year return, percent.
    pub return_1y: Option<f64>,
}

/// Full detail payload for a single ETF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfDetail {
    pub code: String,
    pub name: String,
    pub category: String,
    pub manager: String,
    pub listed_at: NaiveDate,
    pub fee: f64,
    pub nav: i64,
    pub price: Option<i64>,
    pub return_1m: Option<f64>,
    pub return_3m: Option<f64>,
    pub return_6m: Option<f64>,
    pub return_1y: Option<f64>,
    /// Latest daily trading volume.
    pub volume: Option<i64>,
}

/// One point of a price history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: i64,
}

/// One constituent of the holdings listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingWeight {
    pub name: String,
    pub weight: f64,
}

/// One page of ETF summaries plus the counters the envelope needs.
#[derive(Debug, Clone, PartialEq)]
pub struct EtfPage {
    pub items: Vec<EtfSummary>,
    pub page: u32,
    pub limit: u32,
    /// Number of ETFs matching the filters, before slicing.
    pub total: u64,
}

/// Price history window. Windows are anchored to the latest date present
/// in the series, keeping results deterministic for a static dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1m",
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
        }
    }

    fn months(&self) -> u32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
        }
    }

    /// First date inside the window that ends at `end`.
    pub fn window_start(&self, end: NaiveDate) -> NaiveDate {
        end.checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "1m" => Ok(Period::OneMonth),
            "3m" => Ok(Period::ThreeMonths),
            "6m" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            _ => Err(format!(
                "invalid period '{value}', expected one of 1m, 3m, 6m, 1y"
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Period::parse(value)
            .map_err(|message| Error::validation_with(serde_json::json!({ "period": message })))
    }
}

/// Sortable fields of the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Code,
    Name,
    Price,
    Return1y,
}

/// Parsed `sort` parameter: a field name, optionally prefixed with `-`
/// for descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

/// Default sort of the listing endpoint.
pub const DEFAULT_SORT: &str = "-return_1y";

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Return1y,
            descending: true,
        }
    }
}

impl SortSpec {
    fn parse(value: &str) -> Result<Self, String> {
        let (name, descending) = match value.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (value, false),
        };
        let field = match name {
            "code" => SortField::Code,
            "name" => SortField::Name,
            "price" => SortField::Price,
            "return_1y" => SortField::Return1y,
            _ => {
                return Err(format!(
                    "unknown sort field '{name}', expected one of code, name, price, return_1y"
                ))
            }
        };
        Ok(Self { field, descending })
    }
}

impl FromStr for SortSpec {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortSpec::parse(value)
            .map_err(|message| Error::validation_with(serde_json::json!({ "sort": message })))
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Validated query of the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EtfListQuery {
    pub category: Option<String>,
    pub manager: Option<String>,
    pub search: Option<String>,
    pub sort: SortSpec,
    pub page: u32,
    pub limit: u32,
}

impl Default for EtfListQuery {
    fn default() -> Self {
        Self {
            category: None,
            manager: None,
            search: None,
            sort: SortSpec::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl EtfListQuery {
    /// Builds a query from raw parameter values, applying defaults and
    /// rejecting out-of-range values with field-level details. All field
    /// violations are collected into a single validation error.
    pub fn new(
        category: Option<String>,
        manager: Option<String>,
        search: Option<String>,
        sort: Option<&str>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> crate::errors::Result<Self> {
        let mut details = serde_json::Map::new();

        let sort = match sort {
            Some(value) => match SortSpec::parse(value) {
                Ok(spec) => spec,
                Err(message) => {
                    details.insert("sort".to_string(), message.into());
                    SortSpec::default()
                }
            },
            None => SortSpec::default(),
        };

        let page = match page {
            None => DEFAULT_PAGE,
            Some(p) if p >= 1 && p <= u32::MAX as i64 => p as u32,
            Some(_) => {
                details.insert(
                    "page".to_string(),
                    "must be greater than or equal to 1".into(),
                );
                DEFAULT_PAGE
            }
        };

        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) if l >= 1 && l <= MAX_LIMIT as i64 => l as u32,
            Some(_) => {
                details.insert(
                    "limit".to_string(),
                    format!("must be between 1 and {MAX_LIMIT}").into(),
                );
                DEFAULT_LIMIT
            }
        };

        if !details.is_empty() {
            return Err(Error::validation_with(serde_json::Value::Object(details)));
        }

        Ok(Self {
            category,
            manager,
            search,
            sort,
            page,
            limit,
        })
    }
}

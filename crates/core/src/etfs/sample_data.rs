//! In-memory ETF repository seeded with the sample dataset.
//!
//! Stands in for the SQL-backed repository until the ingestion pipeline
//! exists. The dataset is the original mock payload promoted to seed
//! rows: two ETFs, a year of biweekly closes each, and holdings tables.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::Result;
use crate::etfs::etfs_model::{Etf, EtfHolding, EtfPrice};
use crate::etfs::etfs_traits::EtfRepositoryTrait;

/// Read-only in-memory repository. Immutable after construction, so it
/// is freely shareable across request tasks.
pub struct SampleEtfRepository {
    etfs: Vec<Etf>,
    prices: HashMap<String, Vec<EtfPrice>>,
    holdings: HashMap<String, Vec<EtfHolding>>,
}

impl SampleEtfRepository {
    pub fn new(
        etfs: Vec<Etf>,
        prices: HashMap<String, Vec<EtfPrice>>,
        holdings: HashMap<String, Vec<EtfHolding>>,
    ) -> Self {
        Self {
            etfs,
            prices,
            holdings,
        }
    }

    /// Repository seeded with the built-in sample dataset.
    pub fn with_sample_data() -> Self {
        let etfs = vec![
            Etf {
                code: "069500".to_string(),
                name: "KODEX 200".to_string(),
                category: "시장".to_string(),
                manager: "삼성자산운용".to_string(),
                listed_at: date(2002, 10, 14),
                fee: 0.15,
                nav: 5_800_000_000_000,
                updated_at: timestamp(2024, 12, 17),
            },
            Etf {
                code: "091160".to_string(),
                name: "KODEX 반도체".to_string(),
                category: "섹터".to_string(),
                manager: "삼성자산운용".to_string(),
                listed_at: date(2020, 1, 15),
                fee: 0.45,
                nav: 1_200_000_000_000,
                updated_at: timestamp(2024, 12, 16),
            },
        ];

        let mut next_id = 1;
        let mut prices = HashMap::new();
        prices.insert(
            "069500".to_string(),
            price_rows(
                "069500",
                &mut next_id,
                &[
                    (1, 2, 33_490, 5_120_000),
                    (1, 16, 33_120, 4_870_000),
                    (1, 30, 32_980, 5_430_000),
                    (2, 13, 33_560, 4_690_000),
                    (2, 27, 34_010, 5_260_000),
                    (3, 12, 34_280, 5_910_000),
                    (3, 26, 33_950, 4_520_000),
                    (4, 9, 34_120, 4_980_000),
                    (4, 23, 33_780, 5_340_000),
                    (5, 7, 34_350, 5_720_000),
                    (5, 21, 34_620, 6_080_000),
                    (6, 4, 34_510, 4_760_000),
                    (6, 18, 34_890, 5_190_000),
                    (7, 2, 35_240, 6_340_000),
                    (7, 16, 35_110, 5_570_000),
                    (7, 30, 34_760, 4_830_000),
                    (8, 13, 34_420, 5_060_000),
                    (8, 27, 34_950, 5_480_000),
                    (9, 10, 35_180, 5_840_000),
                    (9, 24, 34_870, 4_950_000),
                    (10, 8, 35_020, 5_210_000),
                    (10, 22, 35_310, 5_660_000),
                    (11, 5, 35_150, 4_890_000),
                    (11, 19, 34_980, 5_030_000),
                    (12, 3, 35_060, 5_370_000),
                    (12, 17, 35_200, 5_620_000),
                ],
            ),
        );
        prices.insert(
            "091160".to_string(),
            price_rows(
                "091160",
                &mut next_id,
                &[
                    (1, 1, 11_000, 980_000),
                    (1, 15, 11_500, 1_120_000),
                    (2, 1, 12_000, 1_340_000),
                    (2, 15, 12_500, 1_510_000),
                    (2, 29, 12_380, 1_270_000),
                    (3, 14, 12_150, 1_090_000),
                    (3, 28, 11_980, 940_000),
                    (4, 11, 12_240, 1_180_000),
                    (4, 25, 12_620, 1_420_000),
                    (5, 9, 12_940, 1_650_000),
                    (5, 23, 13_180, 1_780_000),
                    (6, 6, 13_420, 1_860_000),
                    (6, 20, 13_100, 1_390_000),
                    (7, 4, 12_850, 1_230_000),
                    (7, 18, 12_490, 1_060_000),
                    (8, 1, 12_210, 970_000),
                    (8, 15, 11_890, 890_000),
                    (8, 29, 12_080, 1_010_000),
                    (9, 12, 12_350, 1_150_000),
                    (9, 26, 12_610, 1_290_000),
                    (10, 10, 12_440, 1_080_000),
                    (10, 24, 12_290, 990_000),
                    (11, 7, 12_520, 1_170_000),
                    (11, 21, 12_660, 1_310_000),
                    (12, 2, 12_580, 1_140_000),
                    (12, 16, 12_500, 1_234_567),
                ],
            ),
        );

        let mut next_id = 1;
        let mut holdings = HashMap::new();
        holdings.insert(
            "069500".to_string(),
            holding_rows(
                "069500",
                &mut next_id,
                timestamp(2024, 12, 17),
                &[
                    ("삼성전자", 28.9),
                    ("SK하이닉스", 9.8),
                    ("NAVER", 3.1),
                    ("현대차", 2.8),
                    ("셀트리온", 2.2),
                    ("기아", 2.0),
                    ("POSCO홀딩스", 1.9),
                    ("LG화학", 1.7),
                ],
            ),
        );
        holdings.insert(
            "091160".to_string(),
            holding_rows(
                "091160",
                &mut next_id,
                timestamp(2024, 12, 16),
                &[
                    ("삼성전자", 25.3),
                    ("SK하이닉스", 18.2),
                    ("삼성전자우", 8.5),
                    ("DB하이텍", 5.2),
                    ("리노공업", 4.1),
                ],
            ),
        );

        Self::new(etfs, prices, holdings)
    }
}

impl EtfRepositoryTrait for SampleEtfRepository {
    fn list_etfs(&self) -> Result<Vec<Etf>> {
        Ok(self.etfs.clone())
    }

    fn get_etf(&self, code: &str) -> Result<Option<Etf>> {
        Ok(self.etfs.iter().find(|etf| etf.code == code).cloned())
    }

    fn load_prices(&self, code: &str) -> Result<Vec<EtfPrice>> {
        Ok(self.prices.get(code).cloned().unwrap_or_default())
    }

    fn load_holdings(&self, code: &str) -> Result<Vec<EtfHolding>> {
        Ok(self.holdings.get(code).cloned().unwrap_or_default())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static seed date")
}

fn timestamp(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(18, 0, 0)
        .expect("static seed timestamp")
}

fn price_rows(code: &str, next_id: &mut i64, rows: &[(u32, u32, i64, i64)]) -> Vec<EtfPrice> {
    rows.iter()
        .map(|&(month, day, close_price, volume)| {
            let id = *next_id;
            *next_id += 1;
            EtfPrice {
                id,
                etf_code: code.to_string(),
                date: date(2024, month, day),
                close_price,
                volume,
            }
        })
        .collect()
}

fn holding_rows(
    code: &str,
    next_id: &mut i64,
    updated_at: NaiveDateTime,
    rows: &[(&str, f64)],
) -> Vec<EtfHolding> {
    rows.iter()
        .map(|&(stock_name, weight)| {
            let id = *next_id;
            *next_id += 1;
            EtfHolding {
                id,
                etf_code: code.to_string(),
                stock_name: stock_name.to_string(),
                weight,
                updated_at,
            }
        })
        .collect()
}

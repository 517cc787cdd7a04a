use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use etf_helper_core::etfs::{EtfService, EtfServiceTrait, SampleEtfRepository};

use crate::config::Config;

pub struct AppState {
    pub etf_service: Arc<dyn EtfServiceTrait + Send + Sync>,
}

pub fn init_tracing(config: &Config) {
    let log_format = std::env::var("ETF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if config.debug {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    tracing::debug!(
        "Database URL configured (unused until the persistence layer lands): {}",
        config.database_url
    );

    // TODO: replace the sample repository with the SQL-backed
    // implementation once the ingestion pipeline exists.
    let repository = Arc::new(SampleEtfRepository::with_sample_data());
    let etf_service: Arc<dyn EtfServiceTrait + Send + Sync> =
        Arc::new(EtfService::new(repository));

    Ok(Arc::new(AppState { etf_service }))
}

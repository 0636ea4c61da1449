use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::QuoteFetcher;
use crate::market::MarketStatus;
use crate::render::{menu_for_quotes, menu_for_status, Menu};

pub mod bootstrap;

/// Evaluate the trading windows at `now` and build the menu for this run.
pub async fn run(config: Arc<Config>, now: DateTime<Tz>) -> Result<Menu> {
    let status = MarketStatus::evaluate(&now, &config.windows);
    if let Some(menu) = menu_for_status(&status) {
        info!("no active assets at {}", now.format("%a %H:%M"));
        return Ok(menu);
    }

    let fetcher = QuoteFetcher::new(Arc::clone(&config))?;
    let requests = fetcher.requests_for(status.active_indices());
    let quotes = fetcher.fetch_all(requests).await;

    let succeeded = quotes.iter().filter(|quote| quote.is_ok()).count();
    info!("fetched {succeeded} of {} quotes", quotes.len());

    Ok(menu_for_quotes(quotes))
}

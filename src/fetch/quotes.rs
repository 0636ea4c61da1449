use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use tokio::sync::{mpsc, Semaphore, SemaphorePermit};

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::utils::format_quote_time;

use super::decode::{decode_quote, RawQuote};
use super::request::{build_headers, web_url, AssetQuoteRequest};
use super::retry::retry_once_on_timeout;
use super::user_agents::random_user_agent;
use super::{ensure_connection_limit, FetchResult};

/// Normalised quote ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    /// Quote time as `HH:MM:SS` in the configured zone.
    pub time: String,
    pub bid: f64,
    pub percent_change: String,
    pub change: f64,
    pub high: f64,
    pub low: f64,
    pub web_url: String,
}

impl QuoteSnapshot {
    pub fn from_raw(raw: &RawQuote, symbol: &str, zone: &Tz, web_base: &str) -> Self {
        Self {
            time: format_quote_time(raw.quote_tm, zone),
            bid: raw.bid_price,
            percent_change: raw.bid_day_change_pcnt.clone(),
            change: raw.bid_day_change,
            high: raw.high_bid_price,
            low: raw.low_bid_price,
            web_url: web_url(web_base, symbol),
        }
    }
}

/// Outcome of one asset's lookup: either a snapshot or the reason there is none.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayQuote {
    pub index: usize,
    pub symbol: String,
    pub outcome: FetchResult<QuoteSnapshot>,
}

impl DisplayQuote {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Issues every quote request of a run in parallel over one shared HTTP client.
#[derive(Clone)]
pub struct QuoteFetcher {
    client: Client,
    config: Arc<Config>,
    connections: Arc<Semaphore>,
    timeout: Duration,
}

impl QuoteFetcher {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let timeout = config.http.timeout;
        let max_connections = ensure_connection_limit(config.http.max_connections);

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_connections)
            .build()?;

        Ok(Self {
            client,
            config,
            connections: Arc::new(Semaphore::new(max_connections)),
            timeout,
        })
    }

    /// Requests for the given asset positions; unknown positions are skipped.
    pub fn requests_for(&self, indices: &[usize]) -> Vec<AssetQuoteRequest> {
        indices
            .iter()
            .filter_map(|&index| {
                self.config
                    .asset(index)
                    .map(|symbol| AssetQuoteRequest::new(index, symbol, &self.config.api_url))
            })
            .collect()
    }

    /// Fetch all requests concurrently and return exactly one result per request,
    /// in the order they completed.
    pub async fn fetch_all(&self, requests: Vec<AssetQuoteRequest>) -> Vec<DisplayQuote> {
        let expected = requests.len();
        let mut pending: Vec<(usize, String)> = Vec::with_capacity(expected);
        let (tx, mut rx) = mpsc::unbounded_channel();

        for request in requests {
            pending.push((request.index, request.symbol.clone()));
            let fetcher = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let quote = fetcher.fetch_quote(&request).await;
                let _ = tx.send(quote);
            });
        }
        // Only the spawned tasks hold senders now, so `recv` ends once they are all gone.
        drop(tx);

        collect_results(&mut rx, pending).await
    }

    /// Fetch one quote, retrying once on a timeout-class failure.
    pub async fn fetch_quote(&self, request: &AssetQuoteRequest) -> DisplayQuote {
        let outcome = retry_once_on_timeout(&request.symbol, move || self.get_body(&request.url))
            .await
            .and_then(|body| decode_quote(&body))
            .map(|raw| {
                QuoteSnapshot::from_raw(
                    &raw,
                    &request.symbol,
                    &self.config.timezone,
                    &self.config.web_url,
                )
            });

        if let Err(err) = &outcome {
            warn!(
                "{}: {} {} {}",
                request.symbol,
                err.kind().as_str(),
                err,
                err.detail()
            );
        }

        DisplayQuote {
            index: request.index,
            symbol: request.symbol.clone(),
            outcome,
        }
    }

    async fn get_body(&self, url: &str) -> FetchResult<Vec<u8>> {
        let _permit = acquire_connection(&self.connections, self.timeout).await?;
        let headers = build_headers(random_user_agent())?;

        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|err| FetchError::from_transport(&err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::from_transport(&err))?;
        Ok(body.to_vec())
    }
}

/// Drain one result per pending request. Requests whose task vanished without
/// reporting get an `Other` failure, so the output always matches `pending`.
async fn collect_results(
    rx: &mut mpsc::UnboundedReceiver<DisplayQuote>,
    pending: Vec<(usize, String)>,
) -> Vec<DisplayQuote> {
    let expected = pending.len();
    let mut results = Vec::with_capacity(expected);
    while results.len() < expected {
        match rx.recv().await {
            Some(quote) => results.push(quote),
            None => break,
        }
    }

    if results.len() < expected {
        let reported: HashSet<usize> = results.iter().map(|quote| quote.index).collect();
        for (index, symbol) in pending {
            if reported.contains(&index) {
                continue;
            }
            warn!("{symbol}: fetch task ended without reporting a result");
            results.push(DisplayQuote {
                index,
                symbol,
                outcome: Err(FetchError::Other("fetch task aborted".to_string())),
            });
        }
    }

    results
}

/// Wait for a free connection slot, giving up after `wait`.
async fn acquire_connection(
    connections: &Semaphore,
    wait: Duration,
) -> FetchResult<SemaphorePermit<'_>> {
    match tokio::time::timeout(wait, connections.acquire()).await {
        Ok(Ok(permit)) => Ok(permit),
        Ok(Err(_)) => Err(FetchError::Other("connection pool closed".to_string())),
        Err(_) => Err(FetchError::ConnectionLimit),
    }
}

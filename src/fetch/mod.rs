use crate::error::FetchError;

pub mod decode;
pub mod quotes;
pub mod request;
pub mod retry;
pub mod user_agents;

pub use decode::{decode_quote, RawQuote};
pub use quotes::{DisplayQuote, QuoteFetcher, QuoteSnapshot};
pub use request::{api_url, web_url, AssetQuoteRequest};
pub use retry::retry_once_on_timeout;
pub use user_agents::random_user_agent;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[inline]
pub fn ensure_connection_limit(limit: usize) -> usize {
    limit.max(1)
}

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};

use crate::error::FetchError;

use super::FetchResult;

/// Trailing separator the quote API expects after the symbol.
pub const API_SYMBOL_TERMINATOR: &str = ".";

/// One quote lookup for an active asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuoteRequest {
    /// Position of the asset in the configured list.
    pub index: usize,
    pub symbol: String,
    pub url: String,
}

impl AssetQuoteRequest {
    pub fn new(index: usize, symbol: &str, api_base: &str) -> Self {
        Self {
            index,
            symbol: symbol.to_string(),
            url: api_url(api_base, symbol),
        }
    }
}

pub fn api_url(base: &str, symbol: &str) -> String {
    format!("{base}{symbol}{API_SYMBOL_TERMINATOR}")
}

pub fn web_url(base: &str, symbol: &str) -> String {
    format!("{base}?a={symbol}")
}

pub fn build_headers(user_agent: &str) -> FetchResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(user_agent)
        .map_err(|err| FetchError::Other(format!("invalid User-Agent header: {err}")))?;
    headers.insert(USER_AGENT, agent);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_api_url_with_terminator() {
        assert_eq!(api_url("https://x/", "EURUSD"), "https://x/EURUSD.");

        let request = AssetQuoteRequest::new(3, "USDJPY", "https://x/");
        assert_eq!(request.index, 3);
        assert_eq!(request.url, "https://x/USDJPY.");
    }

    #[test]
    fn builds_web_url_with_query() {
        assert_eq!(web_url("https://y", "EURUSD"), "https://y?a=EURUSD");
    }

    #[test]
    fn headers_carry_agent_and_content_type() {
        let headers = build_headers("Mozilla/5.0 test").expect("headers");
        assert_eq!(headers[USER_AGENT], "Mozilla/5.0 test");
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        assert!(build_headers("bad\nagent").is_err());
    }
}

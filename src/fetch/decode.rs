use serde::Deserialize;

use crate::error::FetchError;

use super::FetchResult;

/// Quote record as returned by the upstream API. Absent fields decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawQuote {
    #[serde(rename = "_symbol")]
    pub symbol: String,
    #[serde(rename = "_ask_price")]
    pub ask_price: f64,
    #[serde(rename = "_bid_price")]
    pub bid_price: f64,
    #[serde(rename = "_ref_bid_price")]
    pub ref_bid_price: f64,
    #[serde(rename = "_high_bid_price")]
    pub high_bid_price: f64,
    #[serde(rename = "_low_bid_price")]
    pub low_bid_price: f64,
    #[serde(rename = "_bid_day_change")]
    pub bid_day_change: f64,
    /// Pre-formatted by the API (sign and percent symbol included); passed through as is.
    #[serde(rename = "_bid_day_change_pcnt")]
    pub bid_day_change_pcnt: String,
    /// Epoch milliseconds.
    #[serde(rename = "_quote_tm")]
    pub quote_tm: i64,
    #[serde(rename = "_pips")]
    pub pips: f64,
    #[serde(rename = "_pips_lot")]
    pub pips_lot: f64,
    #[serde(rename = "_digits")]
    pub digits: f64,
    #[serde(rename = "_30d_min_bid_price")]
    pub month_min: f64,
    #[serde(rename = "_30d_max_bid_price")]
    pub month_max: f64,
}

/// Decode a response body and keep only its first quote.
pub fn decode_quote(body: &[u8]) -> FetchResult<RawQuote> {
    let quotes: Vec<RawQuote> = serde_json::from_slice(body)
        .map_err(|err| FetchError::Decode(format!("malformed quote payload: {err}")))?;

    quotes
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Decode("quote payload was an empty array".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{
        "_symbol": "EURUSD",
        "_ask_price": 1.10012,
        "_bid_price": 1.1,
        "_ref_bid_price": 1.11,
        "_high_bid_price": 1.105,
        "_low_bid_price": 1.095,
        "_bid_day_change": -0.01,
        "_bid_day_change_pcnt": "-0.90%",
        "_quote_tm": 1700000000000,
        "_pips": 0.0001,
        "_pips_lot": 10.0,
        "_digits": 5,
        "_30d_min_bid_price": 1.05,
        "_30d_max_bid_price": 1.12
    }, {
        "_symbol": "IGNORED"
    }]"#;

    #[test]
    fn decodes_first_element() {
        let quote = decode_quote(SAMPLE.as_bytes()).expect("decode sample");
        assert_eq!(quote.symbol, "EURUSD");
        assert_eq!(quote.bid_price, 1.1);
        assert_eq!(quote.bid_day_change, -0.01);
        assert_eq!(quote.bid_day_change_pcnt, "-0.90%");
        assert_eq!(quote.quote_tm, 1_700_000_000_000);
        assert_eq!(quote.digits, 5.0);
        assert_eq!(quote.month_max, 1.12);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let quote = decode_quote(br#"[{"_symbol":"GBPUSD","_bid_price":1.27}]"#)
            .expect("decode partial");
        assert_eq!(quote.bid_price, 1.27);
        assert_eq!(quote.ask_price, 0.0);
        assert!(quote.bid_day_change_pcnt.is_empty());
    }

    #[test]
    fn empty_array_is_a_decode_error() {
        let err = decode_quote(b"[]").expect_err("empty array should fail");
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let bodies: [&[u8]; 3] = [b"<html>blocked</html>", br#"{"_symbol":"EURUSD"}"#, b""];
        for body in bodies {
            let err = decode_quote(body).expect_err("malformed body should fail");
            assert!(matches!(err, FetchError::Decode(_)), "unexpected: {err:?}");
        }
    }
}

use crate::fetch::{DisplayQuote, QuoteSnapshot};
use crate::market::MarketStatus;
use crate::utils::format_significant;

use super::{Menu, MenuLine, COLOR_ERROR, COLOR_GAIN, COLOR_LOSS};

const SIGNIFICANT_DIGITS: usize = 5;
const ERROR_LINE_LENGTH: usize = 25;
const WEBVIEW_WIDTH: u32 = 640;
const WEBVIEW_HEIGHT: u32 = 480;
const NO_QUOTES_LINE: &str = "Quotes unavailable";

/// Menu shown instead of quotes when no market is open.
pub fn menu_for_status(status: &MarketStatus) -> Option<Menu> {
    let headline = status.headline()?;
    let mut menu = Menu::new();
    menu.status_line(MenuLine::new(headline).dropdown(false));
    Some(menu)
}

/// Lay out fetched quotes in configured asset order.
pub fn menu_for_quotes(mut quotes: Vec<DisplayQuote>) -> Menu {
    quotes.sort_by_key(|quote| quote.index);

    let mut menu = Menu::new();
    for quote in &quotes {
        match &quote.outcome {
            Ok(snapshot) => push_snapshot(&mut menu, &quote.symbol, snapshot),
            Err(err) => {
                menu.dropdown_line(
                    MenuLine::new(format!("{}: {err}", quote.symbol))
                        .color(COLOR_ERROR)
                        .length(ERROR_LINE_LENGTH),
                );
            }
        }
    }

    if menu.status.is_empty() {
        menu.status_line(
            MenuLine::new(NO_QUOTES_LINE)
                .color(COLOR_ERROR)
                .dropdown(false),
        );
    }

    menu
}

fn push_snapshot(menu: &mut Menu, symbol: &str, quote: &QuoteSnapshot) {
    let color = if quote.change < 0.0 {
        COLOR_LOSS
    } else {
        COLOR_GAIN
    };
    let bid = number(quote.bid);

    menu.status_line(
        MenuLine::new(format!("{symbol}: {bid} {}", quote.percent_change))
            .color(color)
            .dropdown(false),
    );
    menu.dropdown_line(
        MenuLine::new(format!(
            "{} - {symbol}: {bid} {}",
            quote.time,
            number(quote.change)
        ))
        .webview(quote.web_url.as_str(), WEBVIEW_WIDTH, WEBVIEW_HEIGHT)
        .color(color),
    );
    menu.dropdown_line(
        MenuLine::new(format!(
            "{symbol}: {bid} {} [{} - {}]",
            quote.percent_change,
            number(quote.low),
            number(quote.high)
        ))
        .alternate(true)
        .href(quote.web_url.as_str())
        .color(color),
    );
}

fn number(value: f64) -> String {
    format_significant(value, SIGNIFICANT_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn snapshot(change: f64) -> QuoteSnapshot {
        QuoteSnapshot {
            time: "10:00:01".to_string(),
            bid: 1.1,
            percent_change: "-0.90%".to_string(),
            change,
            high: 1.105,
            low: 1.095,
            web_url: "https://y?a=EURUSD".to_string(),
        }
    }

    #[test]
    fn closed_markets_render_single_line() {
        let menu = menu_for_status(&MarketStatus::Weekend).expect("weekend menu");
        assert_eq!(menu.render(), "Weekend - Markets closed | dropdown=false\n");

        let menu = menu_for_status(&MarketStatus::Closed).expect("closed menu");
        assert_eq!(menu.status.len(), 1);
        assert!(menu.dropdown.is_empty());

        assert!(menu_for_status(&MarketStatus::Open(vec![0])).is_none());
    }

    #[test]
    fn success_and_failure_blocks() {
        let quotes = vec![
            DisplayQuote {
                index: 1,
                symbol: "GBPUSD".to_string(),
                outcome: Err(FetchError::Timeout("deadline".to_string())),
            },
            DisplayQuote {
                index: 0,
                symbol: "EURUSD".to_string(),
                outcome: Ok(snapshot(-0.01)),
            },
        ];

        let menu = menu_for_quotes(quotes);

        assert_eq!(
            menu.status,
            vec![MenuLine::new("EURUSD: 1.1 -0.90%")
                .color(COLOR_LOSS)
                .dropdown(false)]
        );
        assert_eq!(menu.dropdown.len(), 3);
        assert_eq!(menu.dropdown[0].text, "10:00:01 - EURUSD: 1.1 -0.01");
        assert_eq!(menu.dropdown[0].color.as_deref(), Some("red"));
        assert_eq!(menu.dropdown[1].text, "EURUSD: 1.1 -0.90% [1.095 - 1.105]");
        assert!(menu.dropdown[1].alternate);
        assert_eq!(menu.dropdown[1].href.as_deref(), Some("https://y?a=EURUSD"));

        let error_line = &menu.dropdown[2];
        assert_eq!(error_line.text, "GBPUSD: timeout");
        assert_eq!(error_line.color.as_deref(), Some(COLOR_ERROR));
        assert_eq!(error_line.length, Some(25));
        assert!(!error_line.text.contains("deadline"));
    }

    #[test]
    fn gains_use_green() {
        let menu = menu_for_quotes(vec![DisplayQuote {
            index: 0,
            symbol: "EURUSD".to_string(),
            outcome: Ok(snapshot(0.0)),
        }]);
        assert_eq!(menu.status[0].color.as_deref(), Some(COLOR_GAIN));
    }

    #[test]
    fn all_failures_still_render_a_status_line() {
        let menu = menu_for_quotes(vec![DisplayQuote {
            index: 0,
            symbol: "EURUSD".to_string(),
            outcome: Err(FetchError::Status(500)),
        }]);
        assert_eq!(menu.status[0].text, NO_QUOTES_LINE);
        assert_eq!(menu.dropdown[0].text, "EURUSD: HTTP 500");
    }
}

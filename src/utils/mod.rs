pub mod text;
pub mod time;

pub use text::{format_significant, sanitize_menu_text};
pub use time::{format_quote_time, now_in};

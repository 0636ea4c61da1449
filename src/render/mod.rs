use std::fmt;

use crate::utils::sanitize_menu_text;

pub mod quotes;

pub use quotes::{menu_for_quotes, menu_for_status};

pub const COLOR_LOSS: &str = "red";
/// Light/dark appearance pair.
pub const COLOR_GAIN: &str = "green,white";
pub const COLOR_ERROR: &str = "red";

/// Separates the bar lines from the dropdown in SwiftBar/xbar output.
const SECTION_SEPARATOR: &str = "---";

/// One menu item plus its rendering parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLine {
    pub text: String,
    pub color: Option<String>,
    pub href: Option<String>,
    pub webview: Option<WebView>,
    pub alternate: bool,
    pub length: Option<usize>,
    /// `Some(false)` hides a bar line from the dropdown.
    pub dropdown: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebView {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl MenuLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn href(mut self, url: impl Into<String>) -> Self {
        self.href = Some(url.into());
        self
    }

    pub fn webview(mut self, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.webview = Some(WebView {
            url: url.into(),
            width,
            height,
        });
        self
    }

    pub fn alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn dropdown(mut self, dropdown: bool) -> Self {
        self.dropdown = Some(dropdown);
        self
    }

    fn params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(color) = &self.color {
            params.push(format!("color={color}"));
        }
        if let Some(href) = &self.href {
            params.push(format!("href={href}"));
        }
        if let Some(view) = &self.webview {
            params.push(format!("webview={}", view.url));
            params.push(format!("webvieww={}", view.width));
            params.push(format!("webviewh={}", view.height));
        }
        if self.alternate {
            params.push("alternate=true".to_string());
        }
        if let Some(length) = self.length {
            params.push(format!("length={length}"));
        }
        if let Some(dropdown) = self.dropdown {
            params.push(format!("dropdown={dropdown}"));
        }
        params
    }
}

impl fmt::Display for MenuLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&sanitize_menu_text(&self.text))?;
        let params = self.params();
        if !params.is_empty() {
            write!(f, " | {}", params.join(" "))?;
        }
        Ok(())
    }
}

/// Status-bar menu: lines cycled in the bar, then the dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub status: Vec<MenuLine>,
    pub dropdown: Vec<MenuLine>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_line(&mut self, line: MenuLine) -> &mut Self {
        self.status.push(line);
        self
    }

    pub fn dropdown_line(&mut self, line: MenuLine) -> &mut Self {
        self.dropdown.push(line);
        self
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.status {
            writeln!(f, "{line}")?;
        }
        if !self.dropdown.is_empty() {
            writeln!(f, "{SECTION_SEPARATOR}")?;
            for line in &self.dropdown {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

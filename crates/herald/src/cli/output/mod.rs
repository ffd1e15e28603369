//! Output formatting utilities

use console::{style, Style};

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for release ids
pub fn version_style() -> Style {
    Style::new().green().bold()
}

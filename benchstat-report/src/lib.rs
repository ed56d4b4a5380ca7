#![warn(missing_docs)]
//! Rendering for `benchstat`.
//!
//! Turns assembled comparison tables into aligned plain text or an
//! HTML table, and scales raw measurements into human-readable units.

mod scale;
mod table;

pub use scale::{metric_of, new_scaler, time_scaler, Scaler};
pub use table::{format_stat, render_html, render_text, Row};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain-text tables.
    #[default]
    Text,
    /// An HTML `<table class='benchstat'>` per metric.
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}

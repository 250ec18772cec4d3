//! Output formatting for derived network values.
//!
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors
//! - JSON output goes straight through `serde_json`

mod csv;
mod terminal;

use crate::processing::DerivedValues;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

pub use csv::{render_csv, CSV_HEADER};
pub use terminal::{format_field, render_text};

/// Output format selected by configuration or flag.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<OutputFormat, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{other}', expected text, csv or json"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Derived values labelled with where they came from.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedValues {
    /// Input text or report entry name.
    pub name: String,
    #[serde(flatten)]
    pub values: DerivedValues,
}

/// Render rows in the requested format.
pub fn render(format: OutputFormat, rows: &[NamedValues]) -> Result<String, Box<dyn Error>> {
    log::debug!("render {} rows as {format}", rows.len());
    match format {
        OutputFormat::Text => Ok(render_text(rows)),
        OutputFormat::Csv => Ok(render_csv(rows)),
        OutputFormat::Json => serde_json::to_string_pretty(rows)
            .map_err(|e| format!("Error serializing JSON: {e}").into()),
    }
}

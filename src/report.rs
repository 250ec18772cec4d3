//! Batch reports over a JSON list of named networks.
//!
//! The input file is a JSON array such as
//! `[{"name": "lan", "cidr": "192.168.1.0/24"}]`. A malformed entry fails the
//! whole read, with the JSON path of the offending value in the message.

use crate::models::Ipv4Block;
use crate::output::NamedValues;
use crate::processing::derived_values_of;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// One named network from a report file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub cidr: Ipv4Block,
}

/// Parse report JSON text.
pub fn parse_report(json: &str) -> Result<Vec<ReportEntry>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let entries: Vec<ReportEntry> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing report: path={} error={}", e.path(), e))?;
    log::debug!("Parsed {} report entries", entries.len());
    Ok(entries)
}

/// Read and parse a report file.
///
/// # Arguments
/// * `file` - Path to the JSON report file
///
/// # Returns
/// * `Ok(Vec<ReportEntry>)` - The entries in file order
/// * `Err` - If the file is missing, unreadable or malformed
pub fn read_report(file: &str) -> Result<Vec<ReportEntry>, Box<dyn Error>> {
    if !Path::new(file).exists() {
        return Err(format!("Report file does not exist: {file}").into());
    }
    log::info!("Reading report file: {file}");
    let json =
        std::fs::read_to_string(file).map_err(|e| format!("Error reading {file}: {e}"))?;
    parse_report(&json)
}

/// Derived values for every entry, in input order.
///
/// Fails on the first entry whose block is invalid, naming that entry.
pub fn report_rows(entries: &[ReportEntry]) -> Result<Vec<NamedValues>, Box<dyn Error>> {
    entries
        .iter()
        .map(|entry| -> Result<NamedValues, Box<dyn Error>> {
            let values = derived_values_of(&entry.cidr).ok_or_else(|| {
                log::warn!("Report entry {:?} has an invalid CIDR", entry.name);
                format!("Report entry '{}' has an invalid CIDR: {}", entry.name, entry.cidr)
            })?;
            Ok(NamedValues {
                name: entry.name.clone(),
                values,
            })
        })
        .collect()
}

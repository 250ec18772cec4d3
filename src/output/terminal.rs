//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::NamedValues;
use colored::Colorize;

/// Width of the label column in text output.
const LABEL_WIDTH: usize = 18;

/// Format a value as a quoted, right-aligned field.
///
/// Embedded double quotes are doubled, as CSV expects.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string().replace('"', "\"\"");
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn format_line(label: &str, value: &str) -> String {
    format!(
        "  {label:<width$}{value}\n",
        label = label.cyan(),
        width = LABEL_WIDTH
    )
}

/// Render rows as labelled blocks, one per row.
pub fn render_text(rows: &[NamedValues]) -> String {
    let mut out = String::new();
    for row in rows {
        let v = &row.values;
        let d = &v.details;
        out.push_str(&format!("{}\n", row.name.bold()));
        out.push_str(&format_line("CIDR", &v.cidr));
        out.push_str(&format_line("IP", &v.ip));
        out.push_str(&format_line("Integer", &v.ip_int));
        out.push_str(&format_line("Prefix", &v.prefix));
        out.push_str(&format_line("Subnet Mask", &v.subnet_mask));
        out.push_str(&format_line("Wildcard Mask", &d.wildcard_mask));
        out.push_str(&format_line("Network Address", &d.network_address));
        out.push_str(&format_line("Broadcast Address", &d.broadcast_address));
        out.push_str(&format_line("First Host", &d.first_host));
        out.push_str(&format_line("Last Host", &d.last_host));
        out.push_str(&format_line("Total Hosts", &d.total_hosts.to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::derived_values;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_format_field_escapes_quotes() {
        assert_eq!(format_field("a\"b", 0), "\"a\"\"b\"");
    }

    #[test]
    fn test_render_text() {
        let rows = vec![NamedValues {
            name: "10.0.0.0/30".to_string(),
            values: derived_values("10.0.0.0/30").unwrap(),
        }];
        let text = render_text(&rows);
        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("255.255.255.252"));
        assert!(text.contains("10.0.0.1"));
        assert!(text.contains("10.0.0.2"));
        assert!(text.lines().last().unwrap().ends_with('2'));
    }
}

//! CSV output formatting for derived values.

use super::terminal::format_field;
use super::NamedValues;

/// Header line matching the column order of [`render_csv`].
pub const CSV_HEADER: &str = r#"            "name",              "cidr",              "ip",      "ip_int", "prefix",     "subnet_mask",   "network_address", "broadcast_address",   "wildcard_mask",      "first_host",       "last_host", "total_hosts""#;

/// Render rows as CSV with a header line.
///
/// Fields are quoted and right-aligned so the columns line up in a terminal.
pub fn render_csv(rows: &[NamedValues]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&csv_row(row));
        out.push('\n');
    }
    out
}

fn csv_row(row: &NamedValues) -> String {
    let v = &row.values;
    let d = &v.details;
    format!(
        r#"{name},{cidr},{ip},{ip_int},{prefix},{subnet_mask},{network},{broadcast},{wildcard},{first_host},{last_host},{total_hosts}"#,
        name = format_field(&row.name, 20),
        cidr = format_field(&v.cidr, 20),
        ip = format_field(&v.ip, 18),
        ip_int = format_field(&v.ip_int, 13),
        prefix = format_field(&v.prefix, 9),
        subnet_mask = format_field(&v.subnet_mask, 18),
        network = format_field(&d.network_address, 19),
        broadcast = format_field(&d.broadcast_address, 20),
        wildcard = format_field(&d.wildcard_mask, 18),
        first_host = format_field(&d.first_host, 18),
        last_host = format_field(&d.last_host, 18),
        total_hosts = format_field(d.total_hosts, 14),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::derived_values;

    fn named(name: &str, cidr: &str) -> NamedValues {
        NamedValues {
            name: name.to_string(),
            values: derived_values(cidr).unwrap(),
        }
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&[named("lan", "192.168.1.1/24"), named("wan", "10.0.0.1/32")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);

        let fields: Vec<&str> = lines[1].split(',').map(|f| f.trim()).collect();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0], "\"lan\"");
        assert_eq!(fields[1], "\"192.168.1.1/24\"");
        assert_eq!(fields[3], "\"3232235777\"");
        assert_eq!(fields[7], "\"192.168.1.255\"");
        assert_eq!(fields[11], "\"254\"");

        let fields: Vec<&str> = lines[2].split(',').map(|f| f.trim()).collect();
        assert_eq!(fields[11], "\"0\"");
    }

    #[test]
    fn test_header_matches_row_columns() {
        let csv = render_csv(&[named("lan", "192.168.1.1/24")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
    }
}

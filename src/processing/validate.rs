//! Well-formedness predicates for raw field text.
//!
//! Addresses are strict (no leading zeros) while prefixes accept leading
//! zeros, e.g. `"024"`. Neither accepts signs or whitespace.

use crate::models::{parse_prefix, prefix_in_range, Ipv4Value};

/// True if `ip` is strict dotted-decimal notation.
pub fn is_valid_address(ip: &str) -> bool {
    Ipv4Value::parse(ip).is_valid()
}

/// True if `prefix` is decimal text for a value in [0,32].
pub fn is_valid_prefix(prefix: &str) -> bool {
    parse_prefix(prefix).is_some()
}

/// True if the numeric prefix length is in [0,32].
pub fn is_valid_prefix_len(prefix: i64) -> bool {
    prefix_in_range(prefix).is_some()
}

/// True if `cidr` splits once on `/` into a valid address and prefix.
pub fn is_valid_cidr(cidr: &str) -> bool {
    match cidr.split_once('/') {
        Some((ip, prefix)) => is_valid_address(ip) && is_valid_prefix(prefix),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("192.168.1.1"));
        assert!(is_valid_address("0.0.0.0"));
        assert!(!is_valid_address("192.168.1.256"));
        assert!(!is_valid_address("192.168.01.1"));
        assert!(!is_valid_address("192.168.1"));
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("24"));
        assert!(is_valid_prefix("0"));
        assert!(is_valid_prefix("32"));
        assert!(is_valid_prefix("024"));
        assert!(!is_valid_prefix("33"));
        assert!(!is_valid_prefix("-1"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("2 4"));

        assert!(is_valid_prefix_len(24));
        assert!(is_valid_prefix_len(0));
        assert!(!is_valid_prefix_len(33));
        assert!(!is_valid_prefix_len(-1));
    }

    #[test]
    fn test_is_valid_cidr() {
        assert!(is_valid_cidr("192.168.1.1/24"));
        assert!(is_valid_cidr("192.168.1.1/024"));
        assert!(!is_valid_cidr("192.168.1.1/33"));
        assert!(!is_valid_cidr("999.999.9.9/99"));
        assert!(!is_valid_cidr("192.168.1.1"));
        assert!(!is_valid_cidr("192.168.1.1/24/8"));
        assert!(!is_valid_cidr(" 192.168.1.1/24"));
    }
}

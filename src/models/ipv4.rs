//! IPv4 address value with an explicit invalid state.
//!
//! [`Ipv4Value`] holds either an unsigned 32-bit address or the invalid
//! marker. Arithmetic on it wraps modulo 2^32 and an invalid operand poisons
//! the result, so a failed parse flows through every derived value instead of
//! being coerced to some default address.

use regex::Regex;
use serde::{de, ser};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::{Add, BitAnd, BitOr, Not, Sub};
use std::sync::OnceLock;

/// Placeholder text displayed for an invalid address.
pub const INVALID_ADDRESS: &str = "Invalid IP Address";

/// One dotted-decimal octet: `0` or a number without leading zeros.
static OCTET_REGEX: OnceLock<Regex> = OnceLock::new();

/// Optionally signed decimal integer of any length.
static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_octet_regex() -> &'static Regex {
    OCTET_REGEX.get_or_init(|| Regex::new(r"^(0|[1-9][0-9]{0,2})$").expect("Invalid Regex"))
}

fn get_integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("Invalid Regex"))
}

/// Parse a single octet, `None` unless it is canonical decimal in [0,255].
fn parse_octet(part: &str) -> Option<u8> {
    if !get_octet_regex().is_match(part) {
        return None;
    }
    // At most three digits, so u16 cannot overflow.
    let n: u16 = part.parse().ok()?;
    u8::try_from(n).ok()
}

/// IPv4 address as an unsigned 32-bit integer, or invalid.
///
/// Equality is by numeric value; two invalid values compare equal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Value(Option<u32>);

impl Ipv4Value {
    /// The invalid marker.
    pub const INVALID: Ipv4Value = Ipv4Value(None);

    /// Wrap a raw 32-bit address.
    pub const fn new(n: u32) -> Ipv4Value {
        Ipv4Value(Some(n))
    }

    /// Build an address from any integer, reduced modulo 2^32.
    ///
    /// # Examples
    /// ```
    /// use cidrmate::models::Ipv4Value;
    /// assert_eq!(Ipv4Value::from_integer(-1).to_string(), "255.255.255.255");
    /// assert_eq!(Ipv4Value::from_integer(1 << 32).to_string(), "0.0.0.0");
    /// ```
    pub fn from_integer(n: i64) -> Ipv4Value {
        // Truncating to the low 32 bits is the reduction modulo 2^32.
        Ipv4Value::new(n as u32)
    }

    /// Parse integer text (`[+-]?[0-9]+`) and reduce it modulo 2^32.
    ///
    /// Any number of digits is accepted, the digits are folded with
    /// wrapping arithmetic so the result is exact modulo 2^32.
    pub fn from_integer_str(s: &str) -> Ipv4Value {
        if !get_integer_regex().is_match(s) {
            return Ipv4Value::INVALID;
        }
        let (negative, digits) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let n = digits.bytes().fold(0u32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(u32::from(digit - b'0'))
        });
        Ipv4Value::new(if negative { n.wrapping_neg() } else { n })
    }

    /// Parse strict dotted-decimal notation.
    ///
    /// Exactly four octets are required, each `0` or a number in [1,255]
    /// without leading zeros, sign or whitespace. Anything else is invalid.
    pub fn parse(s: &str) -> Ipv4Value {
        let mut octets = [0u8; 4];
        let mut parts = s.split('.');
        for octet in octets.iter_mut() {
            match parts.next().and_then(parse_octet) {
                Some(n) => *octet = n,
                None => return Ipv4Value::INVALID,
            }
        }
        if parts.next().is_some() {
            return Ipv4Value::INVALID;
        }
        Ipv4Value::new(u32::from_be_bytes(octets))
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The unsigned 32-bit value, `None` when invalid.
    pub fn to_integer(self) -> Option<u32> {
        self.0
    }

    /// The four octets, most significant first.
    pub fn octets(self) -> Option<[u8; 4]> {
        self.0.map(u32::to_be_bytes)
    }

    /// Convert to the standard library address type.
    pub fn to_ipv4_addr(self) -> Option<Ipv4Addr> {
        self.0.map(Ipv4Addr::from)
    }

    /// Apply `f` to a valid value; invalid stays invalid.
    pub fn map<F>(self, f: F) -> Ipv4Value
    where
        F: FnOnce(u32) -> u32,
    {
        Ipv4Value(self.0.map(f))
    }

    /// Combine two values; invalid if either side is.
    pub fn zip_with<F>(self, other: Ipv4Value, f: F) -> Ipv4Value
    where
        F: FnOnce(u32, u32) -> u32,
    {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Ipv4Value::new(f(a, b)),
            _ => Ipv4Value::INVALID,
        }
    }
}

impl From<u32> for Ipv4Value {
    fn from(n: u32) -> Self {
        Ipv4Value::new(n)
    }
}

impl From<Ipv4Addr> for Ipv4Value {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Value::new(u32::from(addr))
    }
}

impl BitAnd for Ipv4Value {
    type Output = Ipv4Value;

    fn bitand(self, rhs: Ipv4Value) -> Ipv4Value {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl BitOr for Ipv4Value {
    type Output = Ipv4Value;

    fn bitor(self, rhs: Ipv4Value) -> Ipv4Value {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl Not for Ipv4Value {
    type Output = Ipv4Value;

    fn not(self) -> Ipv4Value {
        self.map(|n| !n)
    }
}

impl Add<u32> for Ipv4Value {
    type Output = Ipv4Value;

    fn add(self, rhs: u32) -> Ipv4Value {
        self.map(|n| n.wrapping_add(rhs))
    }
}

impl Sub<u32> for Ipv4Value {
    type Output = Ipv4Value;

    fn sub(self, rhs: u32) -> Ipv4Value {
        self.map(|n| n.wrapping_sub(rhs))
    }
}

impl fmt::Display for Ipv4Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.octets() {
            Some([a, b, c, d]) => write!(f, "{a}.{b}.{c}.{d}"),
            None => f.write_str(INVALID_ADDRESS),
        }
    }
}

impl Serialize for Ipv4Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.is_valid() {
            return Err(ser::Error::custom("cannot serialize an invalid IP address"));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Value {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let addr = Ipv4Value::parse(&s);
        if !addr.is_valid() {
            return Err(de::Error::custom(format!("invalid IP address: {s}")));
        }
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_max() {
        let ip = Ipv4Value::new(0);
        assert_eq!(ip.to_integer(), Some(0));
        assert_eq!(ip.to_string(), "0.0.0.0");

        let ip = Ipv4Value::new(4294967295);
        assert_eq!(ip.to_integer(), Some(4294967295));
        assert_eq!(ip.to_string(), "255.255.255.255");
    }

    #[test]
    fn test_octets() {
        let ip = Ipv4Value::new(3232235521);
        assert_eq!(ip.octets(), Some([192, 168, 0, 1]));
        assert_eq!(ip.to_string(), "192.168.0.1");
        assert_eq!(Ipv4Value::INVALID.octets(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Ipv4Value::parse("192.168.0.1").to_integer(),
            Some(3232235521)
        );
        assert_eq!(Ipv4Value::parse("192.168.1.1").to_integer(), Some(3232235777));
        assert_eq!(Ipv4Value::parse("0.0.0.0").to_integer(), Some(0));
        assert_eq!(
            Ipv4Value::parse("255.255.255.255").to_integer(),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for s in [
            "invalid-ip",
            "192.168.0",
            "192.168.0.256",
            "1.2.3.4.5",
            "01.2.3.4",
            "1.2.3.04",
            "1.2.3.00",
            "+1.2.3.4",
            "-1.2.3.4",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1..3.4",
            "1.2.3.",
            "",
            "1000.2.3.4",
        ] {
            assert!(!Ipv4Value::parse(s).is_valid(), "{s:?} should be invalid");
        }
    }

    #[test]
    fn test_from_integer_wraps() {
        assert_eq!(Ipv4Value::from_integer(-1), Ipv4Value::new(u32::MAX));
        assert_eq!(Ipv4Value::from_integer(1 << 32), Ipv4Value::new(0));
        assert_eq!(
            Ipv4Value::from_integer((1 << 32) + 3232235777),
            Ipv4Value::parse("192.168.1.1")
        );
    }

    #[test]
    fn test_from_integer_str() {
        assert_eq!(
            Ipv4Value::from_integer_str("3232235777").to_string(),
            "192.168.1.1"
        );
        assert_eq!(
            Ipv4Value::from_integer_str("-1").to_string(),
            "255.255.255.255"
        );
        assert!(!Ipv4Value::from_integer_str("").is_valid());
        assert!(!Ipv4Value::from_integer_str("12a").is_valid());
        assert!(!Ipv4Value::from_integer_str("-").is_valid());
        assert!(!Ipv4Value::from_integer_str("1 2").is_valid());
        assert_eq!(Ipv4Value::from_integer_str("+12"), Ipv4Value::new(12));
    }

    #[test]
    fn test_from_integer_str_beyond_i64() {
        assert_eq!(
            Ipv4Value::from_integer_str("99999999999999999999"),
            Ipv4Value::new(1661992959)
        );
        // 2^64 + 5
        assert_eq!(
            Ipv4Value::from_integer_str("18446744073709551621").to_string(),
            "0.0.0.5"
        );
        // -(2^40 + 7)
        assert_eq!(
            Ipv4Value::from_integer_str("-1099511627783"),
            Ipv4Value::new(4294967289)
        );
        assert_eq!(
            Ipv4Value::from_integer_str("000000000000000000003232235777").to_string(),
            "192.168.1.1"
        );
        for n in [0i64, 1, -1, i64::MAX, i64::MIN, 3232235777, -3232235777] {
            assert_eq!(
                Ipv4Value::from_integer_str(&n.to_string()),
                Ipv4Value::from_integer(n)
            );
        }
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(Ipv4Value::new(u32::MAX) + 1, Ipv4Value::new(0));
        assert_eq!(Ipv4Value::new(0) - 1, Ipv4Value::new(u32::MAX));
        assert_eq!(!Ipv4Value::new(0xFFFFFF00), Ipv4Value::new(0xFF));
    }

    #[test]
    fn test_invalid_poisons() {
        let ip = Ipv4Value::new(1);
        assert!(!(ip & Ipv4Value::INVALID).is_valid());
        assert!(!(Ipv4Value::INVALID | ip).is_valid());
        assert!(!(!Ipv4Value::INVALID).is_valid());
        assert!(!(Ipv4Value::INVALID + 1).is_valid());
        assert!(!(Ipv4Value::INVALID - 1).is_valid());
        assert_eq!(Ipv4Value::INVALID.to_string(), INVALID_ADDRESS);
    }

    #[test]
    fn test_format_parse_sweep() {
        for n in (0..=u32::MAX).step_by(65_537).chain([u32::MAX - 1, u32::MAX]) {
            let ip = Ipv4Value::new(n);
            assert_eq!(Ipv4Value::parse(&ip.to_string()), ip);
        }
    }

    #[test]
    fn test_std_interop() {
        let addr = Ipv4Addr::new(10, 1, 2, 3);
        let ip = Ipv4Value::from(addr);
        assert_eq!(ip.to_string(), "10.1.2.3");
        assert_eq!(ip.to_ipv4_addr(), Some(addr));
        assert_eq!(Ipv4Value::INVALID.to_ipv4_addr(), None);
    }

    #[test]
    fn test_serde() {
        let ip = Ipv4Value::parse("10.0.0.1");
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.0.0.1\"");
        assert_eq!(serde_json::from_str::<Ipv4Value>(&json).unwrap(), ip);
        assert!(serde_json::from_str::<Ipv4Value>("\"10.0.0.01\"").is_err());
        assert!(serde_json::to_string(&Ipv4Value::INVALID).is_err());
    }
}

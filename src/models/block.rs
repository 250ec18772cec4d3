//! IPv4 network block: an address plus a prefix length.
//!
//! Only the address and prefix are stored. Everything else is derived on
//! demand, and a block with an invalid address or prefix yields invalid
//! values for every derived field.

use super::ipv4::Ipv4Value;
use regex::Regex;
use serde::{de, ser};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Placeholder text displayed for an invalid block.
pub const INVALID_CIDR: &str = "Invalid CIDR Notation";

/// Plain unsigned decimal. Leading zeros are accepted for prefixes.
static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_regex() -> &'static Regex {
    PREFIX_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid Regex"))
}

/// Check that a prefix length lies in [0,32].
pub fn prefix_in_range(len: i64) -> Option<u8> {
    u8::try_from(len).ok().filter(|len| *len <= MAX_LENGTH)
}

/// Parse prefix text such as `"24"` or `"024"`.
pub fn parse_prefix(s: &str) -> Option<u8> {
    if !get_prefix_regex().is_match(s) {
        return None;
    }
    // Digit runs too long for u64 are out of range anyway.
    let len: u64 = s.parse().ok()?;
    i64::try_from(len).ok().and_then(prefix_in_range)
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// A zero prefix is special cased, the shift amount never reaches 32.
///
/// # Examples
/// ```
/// use cidrmate::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24), Some(0xFFFFFF00));
/// assert_eq!(get_cidr_mask(0), Some(0));
/// assert_eq!(get_cidr_mask(33), None);
/// ```
pub fn get_cidr_mask(len: u8) -> Option<u32> {
    match len {
        0 => Some(0),
        1..=MAX_LENGTH => Some(u32::MAX << (MAX_LENGTH - len)),
        _ => None,
    }
}

/// Prefix length of a subnet mask: `32 - floor(log2(!mask + 1))`.
///
/// Contiguity is not checked, a non-contiguous mask gives whatever the
/// formula yields.
pub fn mask_to_prefix(mask: Ipv4Value) -> Option<u8> {
    let mask = mask.to_integer()?;
    // In [1, 2^32], so the log is in [0, 32].
    let host_span = u64::from(!mask) + 1;
    Some(MAX_LENGTH - host_span.ilog2() as u8)
}

/// IPv4 network in CIDR notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Block {
    addr: Ipv4Value,
    prefix: Option<u8>,
}

impl Ipv4Block {
    /// Build a block, poisoned if `prefix` is outside [0,32].
    pub fn new(addr: Ipv4Value, prefix: i64) -> Ipv4Block {
        Ipv4Block {
            addr,
            prefix: prefix_in_range(prefix),
        }
    }

    /// Build a block from an already parsed prefix (`None` poisons it).
    pub fn from_parts(addr: Ipv4Value, prefix: Option<u8>) -> Ipv4Block {
        Ipv4Block {
            addr,
            prefix: prefix.filter(|len| *len <= MAX_LENGTH),
        }
    }

    /// Parse `"<address>/<prefix>"`, surrounding whitespace ignored.
    ///
    /// The text is split once on `/`, so a missing slash or a second one
    /// poisons the block.
    pub fn parse(s: &str) -> Ipv4Block {
        match s.trim().split_once('/') {
            Some((addr, prefix)) => {
                Ipv4Block::from_parts(Ipv4Value::parse(addr), parse_prefix(prefix))
            }
            None => Ipv4Block::from_parts(Ipv4Value::parse(s.trim()), None),
        }
    }

    pub fn addr(&self) -> Ipv4Value {
        self.addr
    }

    pub fn prefix(&self) -> Option<u8> {
        self.prefix
    }

    pub fn is_valid(&self) -> bool {
        self.addr.is_valid() && self.prefix.is_some()
    }

    /// Prefix length, only when the whole block is valid.
    fn valid_prefix(&self) -> Option<u8> {
        self.prefix.filter(|_| self.addr.is_valid())
    }

    /// Subnet mask with the top `prefix` bits set.
    pub fn mask(&self) -> Ipv4Value {
        match self.valid_prefix().and_then(get_cidr_mask) {
            Some(mask) => Ipv4Value::new(mask),
            None => Ipv4Value::INVALID,
        }
    }

    pub fn wildcard_mask(&self) -> Ipv4Value {
        !self.mask()
    }

    /// Address with all host bits cleared.
    pub fn network_address(&self) -> Ipv4Value {
        self.addr & self.mask()
    }

    /// Address with all host bits set.
    pub fn broadcast_address(&self) -> Ipv4Value {
        self.network_address() | self.wildcard_mask()
    }

    pub fn first_host(&self) -> Ipv4Value {
        self.network_address() + 1
    }

    pub fn last_host(&self) -> Ipv4Value {
        self.broadcast_address() - 1
    }

    /// Usable hosts, `2^(32 - prefix) - 2` floored at zero.
    ///
    /// Both /31 and /32 report zero.
    pub fn total_hosts(&self) -> Option<u64> {
        self.valid_prefix()
            .map(|len| (1u64 << (MAX_LENGTH - len)).saturating_sub(2))
    }

    /// Network address as an integer, `None` for an invalid block.
    pub fn to_integer(&self) -> Option<u32> {
        self.network_address().to_integer()
    }
}

impl fmt::Display for Ipv4Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.valid_prefix() {
            Some(len) => write!(f, "{}/{}", self.addr, len),
            None => f.write_str(INVALID_CIDR),
        }
    }
}

impl Serialize for Ipv4Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.is_valid() {
            return Err(ser::Error::custom("cannot serialize an invalid CIDR"));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Block {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4Block, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let block = Ipv4Block::parse(&s);
        if !block.is_valid() {
            return Err(de::Error::custom(format!("invalid CIDR format: {s}")));
        }
        Ok(block)
    }
}

//! String and number conversions for the field-binding layer.
//!
//! Every function here is total. Invalid input gives `None` rather than the
//! internal invalid marker, so callers can keep the raw text the user typed
//! or fall back to the last valid value.

use super::validate::is_valid_cidr;
use crate::models::{self, get_cidr_mask, parse_prefix, prefix_in_range, Ipv4Block, Ipv4Value};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// CIDR used when nothing valid has been supplied.
pub const DEFAULT_CIDR: &str = "192.168.1.0/24";

/// Network values derived from an address and prefix.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkDetails {
    pub network_address: String,
    pub broadcast_address: String,
    pub wildcard_mask: String,
    pub first_host: String,
    pub last_host: String,
    pub total_hosts: u64,
}

/// Every value shown for a block, as display strings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DerivedValues {
    pub cidr: String,
    pub ip: String,
    /// Unsigned integer form of `ip`.
    pub ip_int: String,
    pub prefix: String,
    pub subnet_mask: String,
    #[serde(flatten)]
    pub details: NetworkDetails,
}

/// An editable field of the block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Cidr,
    Ip,
    Integer,
    Prefix,
    SubnetMask,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Field, String> {
        match s.to_ascii_lowercase().as_str() {
            "cidr" => Ok(Field::Cidr),
            "ip" => Ok(Field::Ip),
            "int" | "integer" => Ok(Field::Integer),
            "prefix" => Ok(Field::Prefix),
            "mask" | "subnet-mask" | "subnet_mask" => Ok(Field::SubnetMask),
            _ => Err(format!(
                "unknown field '{s}', expected one of: cidr, ip, int, prefix, mask"
            )),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Cidr => "cidr",
            Field::Ip => "ip",
            Field::Integer => "int",
            Field::Prefix => "prefix",
            Field::SubnetMask => "mask",
        };
        f.write_str(name)
    }
}

/// Split a valid CIDR into its address text and prefix.
pub fn cidr_to_ip_prefix(cidr: &str) -> Option<(String, u8)> {
    if !is_valid_cidr(cidr) {
        return None;
    }
    let (ip, prefix) = cidr.split_once('/')?;
    Some((ip.to_string(), parse_prefix(prefix)?))
}

/// Join an address and prefix into CIDR text.
pub fn ip_prefix_to_cidr(ip: &str, prefix: i64) -> Option<String> {
    let block = Ipv4Block::new(Ipv4Value::parse(ip), prefix);
    block.is_valid().then(|| block.to_string())
}

/// Unsigned integer value of a dotted-decimal address.
pub fn ip_to_int(ip: &str) -> Option<u32> {
    Ipv4Value::parse(ip).to_integer()
}

pub fn int_to_ip(n: u32) -> String {
    Ipv4Value::new(n).to_string()
}

/// Subnet mask text for a prefix length, e.g. `24` gives `255.255.255.0`.
pub fn prefix_to_mask(prefix: i64) -> Option<String> {
    let mask = prefix_in_range(prefix).and_then(get_cidr_mask)?;
    Some(int_to_ip(mask))
}

/// Prefix length for subnet mask text. Contiguity is not checked.
pub fn mask_to_prefix(mask: &str) -> Option<u8> {
    models::mask_to_prefix(Ipv4Value::parse(mask))
}

fn details_of(block: &Ipv4Block) -> Option<NetworkDetails> {
    Some(NetworkDetails {
        network_address: block.network_address().to_string(),
        broadcast_address: block.broadcast_address().to_string(),
        wildcard_mask: block.wildcard_mask().to_string(),
        first_host: block.first_host().to_string(),
        last_host: block.last_host().to_string(),
        total_hosts: block.total_hosts()?,
    })
}

/// Network, broadcast, wildcard, host range and host count in one pass.
pub fn network_details(ip: &str, prefix: i64) -> Option<NetworkDetails> {
    details_of(&Ipv4Block::new(Ipv4Value::parse(ip), prefix))
}

/// All display values for a block.
pub fn derived_values_of(block: &Ipv4Block) -> Option<DerivedValues> {
    let prefix = block.prefix().filter(|_| block.is_valid())?;
    Some(DerivedValues {
        cidr: block.to_string(),
        ip: block.addr().to_string(),
        ip_int: block.addr().to_integer()?.to_string(),
        prefix: prefix.to_string(),
        subnet_mask: block.mask().to_string(),
        details: details_of(block)?,
    })
}

/// All display values for CIDR text.
pub fn derived_values(cidr: &str) -> Option<DerivedValues> {
    derived_values_of(&Ipv4Block::parse(cidr))
}

/// Replace one field of `current_cidr` with `raw` text.
///
/// Returns the resulting canonical CIDR, or `None` when the edit does not
/// produce a valid block. The other fields keep their current values.
pub fn apply_field_edit(current_cidr: &str, field: Field, raw: &str) -> Option<String> {
    let current = Ipv4Block::parse(current_cidr);
    let value = raw.trim();
    let next = match field {
        Field::Cidr => Ipv4Block::parse(value),
        Field::Ip => Ipv4Block::from_parts(Ipv4Value::parse(value), current.prefix()),
        Field::Integer => {
            Ipv4Block::from_parts(Ipv4Value::from_integer_str(value), current.prefix())
        }
        Field::Prefix => Ipv4Block::from_parts(current.addr(), parse_prefix(value)),
        Field::SubnetMask => Ipv4Block::from_parts(
            current.addr(),
            models::mask_to_prefix(Ipv4Value::parse(value)),
        ),
    };
    log::debug!("apply_field_edit({current_cidr}, {field}, {value:?}) -> {next}");
    next.is_valid().then(|| next.to_string())
}

/// Canonical form of `param` if it is a valid CIDR, else [`DEFAULT_CIDR`].
pub fn initial_cidr(param: Option<&str>) -> String {
    match param.map(Ipv4Block::parse) {
        Some(block) if block.is_valid() => block.to_string(),
        Some(_) => {
            log::warn!("Ignoring invalid CIDR {param:?}, using {DEFAULT_CIDR}");
            DEFAULT_CIDR.to_string()
        }
        None => DEFAULT_CIDR.to_string(),
    }
}

//! Address and network models.
//!
//! - [`Ipv4Value`] - IPv4 address with an explicit invalid state
//! - [`Ipv4Block`] - address plus prefix length, with derived network values

mod block;
mod ipv4;

// Re-export public types
pub use block::{
    get_cidr_mask, mask_to_prefix, parse_prefix, prefix_in_range, Ipv4Block, INVALID_CIDR,
    MAX_LENGTH,
};
pub use ipv4::{Ipv4Value, INVALID_ADDRESS};

//! IPv4 CIDR calculator.
//!
//! [`models`] holds the address and network types, [`processing`] the
//! validators and string conversions the field-binding layer calls. The rest
//! backs the `cidrmate` binary.

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;
pub mod report;

pub use models::{Ipv4Block, Ipv4Value};
pub use processing::{derived_values, network_details, DerivedValues, NetworkDetails};

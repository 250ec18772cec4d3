//! Field-level logic over the models.
//!
//! - [`validate`] - well-formedness predicates for raw text
//! - [`convert`] - string and number conversions for the view layer

mod convert;
mod validate;

// Re-export public functions
pub use convert::{
    apply_field_edit, cidr_to_ip_prefix, derived_values, derived_values_of, initial_cidr,
    int_to_ip, ip_prefix_to_cidr, ip_to_int, mask_to_prefix, network_details, prefix_to_mask,
    DerivedValues, Field, NetworkDetails, DEFAULT_CIDR,
};
pub use validate::{is_valid_address, is_valid_cidr, is_valid_prefix, is_valid_prefix_len};

//! Rule kind implementations
//!
//! Each module maps one input table layout to the provider resource it configures.

pub mod dnat;
pub mod firewall;
pub mod snat;

pub use dnat::DnatFormat;
pub use firewall::FirewallFormat;
pub use snat::SnatFormat;

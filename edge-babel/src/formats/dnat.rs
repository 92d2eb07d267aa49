//! Destination NAT rules (`vcd_dnat`)
//!
//! Input columns: gateway, external ip, port, internal ip, translated port.
//! Ports are emitted as bare numbers.

use crate::error::RuleError;
use crate::format::{resource_per_row, RuleFormat};
use crate::hcl::Block;
use crate::record::DestinationNatRule;
use crate::table::Table;

pub const RESOURCE_KIND: &str = "vcd_dnat";

pub struct DnatFormat;

impl RuleFormat for DnatFormat {
    fn name(&self) -> &str {
        "dnat"
    }

    fn description(&self) -> &str {
        "Destination NAT rules, one vcd_dnat resource per row"
    }

    fn output_file(&self) -> &str {
        "dnat.tf"
    }

    fn render(&self, table: &Table) -> Result<Vec<Block>, RuleError> {
        resource_per_row::<DestinationNatRule>(table, RESOURCE_KIND)
    }
}

//! Source NAT rules (`vcd_snat`)

use crate::error::RuleError;
use crate::format::{resource_per_row, RuleFormat};
use crate::hcl::Block;
use crate::record::SourceNatRule;
use crate::table::Table;

pub const RESOURCE_KIND: &str = "vcd_snat";

pub struct SnatFormat;

impl RuleFormat for SnatFormat {
    fn name(&self) -> &str {
        "snat"
    }

    fn description(&self) -> &str {
        "Source NAT rules, one vcd_snat resource per row"
    }

    fn output_file(&self) -> &str {
        "snat.tf"
    }

    fn render(&self, table: &Table) -> Result<Vec<Block>, RuleError> {
        resource_per_row::<SourceNatRule>(table, RESOURCE_KIND)
    }
}

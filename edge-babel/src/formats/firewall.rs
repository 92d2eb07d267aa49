//! Edge firewall rules (`vcd_firewall_rules`)
//!
//! Unlike the NAT kinds, the whole table becomes a single resource: the gateway is taken
//! from the first data row, and every data row contributes one nested `rule` block.

use crate::error::RuleError;
use crate::format::RuleFormat;
use crate::hcl::Block;
use crate::record::{FirewallRuleSet, RuleRecord};
use crate::table::Table;

pub const RESOURCE_KIND: &str = "vcd_firewall_rules";
pub const RESOURCE_NAME: &str = "fw";

pub struct FirewallFormat;

impl RuleFormat for FirewallFormat {
    fn name(&self) -> &str {
        "firewall"
    }

    fn description(&self) -> &str {
        "Edge firewall, a single vcd_firewall_rules resource with one rule block per row"
    }

    fn output_file(&self) -> &str {
        "firewall.tf"
    }

    fn render(&self, table: &Table) -> Result<Vec<Block>, RuleError> {
        let Some(set) = FirewallRuleSet::from_table(table)? else {
            return Ok(Vec::new());
        };

        let block = set.rules.iter().fold(
            Block::resource(RESOURCE_KIND, RESOURCE_NAME).with_attributes(set.attributes()),
            |block, rule| block.with_block(Block::nested("rule").with_attributes(rule.attributes())),
        );
        Ok(vec![block])
    }
}

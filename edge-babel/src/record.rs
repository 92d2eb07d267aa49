//! Typed rule records
//!
//!     Each input row becomes a fixed-arity record through [`RuleRecord::from_row`]. The
//!     arity check happens once, up front, so a short row surfaces as
//!     [`RuleError::MalformedRow`] naming the row instead of an index fault halfway through.
//!
//!     Column layouts (1-based):
//!
//!     | Record               | Columns |
//!     |----------------------|---------|
//!     | DestinationNatRule   | 1 gateway, 2 external ip, 3 port, 4 internal ip, 5 translated port |
//!     | SourceNatRule        | 1 gateway, 2 external ip, 3 internal ip |
//!     | FirewallRule         | 2 description, 3 policy, 4 protocol, 5 dest port, 6 dest ip, 7 src port, 8 src ip |
//!
//!     Column 1 of a firewall row holds the gateway, which is only read from the first data
//!     row (see [`FirewallRuleSet`]). It still counts towards the row's required width.

use crate::error::RuleError;
use crate::hcl::Value;
use crate::table::{Row, Table};

/// A record built from exactly one data row
pub trait RuleRecord: Sized {
    /// Highest 1-based column read from a row
    const COLUMNS: usize;

    /// Build the record from a row already known to have `COLUMNS` cells
    fn from_cells(row: &Row<'_>) -> Result<Self, RuleError>;

    /// Attributes in emission order
    fn attributes(&self) -> Vec<(&'static str, Value)>;

    /// Validate the row width, then build the record
    fn from_row(row: &Row<'_>) -> Result<Self, RuleError> {
        if row.len() < Self::COLUMNS {
            return Err(RuleError::MalformedRow {
                row: row.index(),
                expected: Self::COLUMNS,
                found: row.len(),
            });
        }
        Self::from_cells(row)
    }
}

/// Build one record per data row; the first short row aborts the whole table
pub fn records<R: RuleRecord>(table: &Table) -> Result<Vec<R>, RuleError> {
    table.data_rows().map(|row| R::from_row(&row)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationNatRule {
    pub gateway: String,
    pub external_ip: String,
    pub port: String,
    pub internal_ip: String,
    pub translated_port: String,
}

impl RuleRecord for DestinationNatRule {
    const COLUMNS: usize = 5;

    fn from_cells(row: &Row<'_>) -> Result<Self, RuleError> {
        Ok(DestinationNatRule {
            gateway: row.cell(1)?.to_string(),
            external_ip: row.cell(2)?.to_string(),
            port: row.cell(3)?.to_string(),
            internal_ip: row.cell(4)?.to_string(),
            translated_port: row.cell(5)?.to_string(),
        })
    }

    fn attributes(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("edge_gateway", Value::quoted(&self.gateway)),
            ("external_ip", Value::quoted(&self.external_ip)),
            ("port", Value::bare(&self.port)),
            ("internal_ip", Value::quoted(&self.internal_ip)),
            ("translated_port", Value::bare(&self.translated_port)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNatRule {
    pub gateway: String,
    pub external_ip: String,
    pub internal_ip: String,
}

impl RuleRecord for SourceNatRule {
    const COLUMNS: usize = 3;

    fn from_cells(row: &Row<'_>) -> Result<Self, RuleError> {
        Ok(SourceNatRule {
            gateway: row.cell(1)?.to_string(),
            external_ip: row.cell(2)?.to_string(),
            internal_ip: row.cell(3)?.to_string(),
        })
    }

    fn attributes(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("edge_gateway", Value::quoted(&self.gateway)),
            ("external_ip", Value::quoted(&self.external_ip)),
            ("internal_ip", Value::quoted(&self.internal_ip)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRule {
    pub description: String,
    pub policy: String,
    pub protocol: String,
    pub destination_port: String,
    pub destination_ip: String,
    pub source_port: String,
    pub source_ip: String,
}

impl RuleRecord for FirewallRule {
    const COLUMNS: usize = 8;

    fn from_cells(row: &Row<'_>) -> Result<Self, RuleError> {
        Ok(FirewallRule {
            description: row.cell(2)?.to_string(),
            policy: row.cell(3)?.to_string(),
            protocol: row.cell(4)?.to_string(),
            destination_port: row.cell(5)?.to_string(),
            destination_ip: row.cell(6)?.to_string(),
            source_port: row.cell(7)?.to_string(),
            source_ip: row.cell(8)?.to_string(),
        })
    }

    fn attributes(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("description", Value::quoted(&self.description)),
            ("policy", Value::quoted(&self.policy)),
            ("protocol", Value::quoted(&self.protocol)),
            ("destination_port", Value::quoted(&self.destination_port)),
            ("destination_ip", Value::quoted(&self.destination_ip)),
            ("source_port", Value::quoted(&self.source_port)),
            ("source_ip", Value::quoted(&self.source_ip)),
        ]
    }
}

/// Action applied to traffic no rule matches
pub const DEFAULT_FIREWALL_ACTION: &str = "drop";

/// The single firewall resource of a table: one gateway, many rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRuleSet {
    pub gateway: String,
    pub default_action: &'static str,
    pub rules: Vec<FirewallRule>,
}

impl FirewallRuleSet {
    /// Read the gateway from the first data row, then one rule per data row.
    ///
    /// Returns `None` for a table with no data rows.
    pub fn from_table(table: &Table) -> Result<Option<Self>, RuleError> {
        let Some(first) = table.row(1) else {
            return Ok(None);
        };
        let rules = records::<FirewallRule>(table)?;
        Ok(Some(FirewallRuleSet {
            gateway: first.cell(1)?.to_string(),
            default_action: DEFAULT_FIREWALL_ACTION,
            rules,
        }))
    }

    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("edge_gateway", Value::quoted(&self.gateway)),
            ("default_action", Value::quoted(self.default_action)),
        ]
    }
}

//! RuleFormat trait definition
//!
//! This module defines the trait every rule kind implements. A format knows which file it
//! owns and how to turn a [`Table`] into configuration blocks; writing is left to
//! [`publish`](crate::publish).

use crate::error::RuleError;
use crate::hcl::Block;
use crate::record::{records, RuleRecord};
use crate::table::Table;

/// Trait for rule kinds
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl RuleFormat for MyFormat {
///     fn name(&self) -> &str {
///         "my-kind"
///     }
///
///     fn output_file(&self) -> &str {
///         "my-kind.tf"
///     }
///
///     fn render(&self, table: &Table) -> Result<Vec<Block>, RuleError> {
///         resource_per_row::<MyRecord>(table, "vcd_my_kind")
///     }
/// }
/// ```
pub trait RuleFormat: Send + Sync {
    /// The name of this kind (e.g., "dnat", "firewall")
    fn name(&self) -> &str;

    /// Optional description of this kind
    fn description(&self) -> &str {
        ""
    }

    /// File name the rendered blocks are written to, relative to the output directory
    fn output_file(&self) -> &str;

    /// Render every data row of `table`.
    ///
    /// An empty result means "nothing to write". Any error leaves nothing rendered.
    fn render(&self, table: &Table) -> Result<Vec<Block>, RuleError>;
}

/// One `resource "<kind>" "rule<N>"` block per data row, numbered from 1
pub fn resource_per_row<R: RuleRecord>(
    table: &Table,
    resource_kind: &str,
) -> Result<Vec<Block>, RuleError> {
    Ok(records::<R>(table)?
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Block::resource(resource_kind, format!("rule{}", i + 1))
                .with_attributes(record.attributes())
        })
        .collect())
}

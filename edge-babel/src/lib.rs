//! Edge gateway rule tables to Terraform HCL
//!
//!     This crate turns comma-separated rule tables into configuration for the vCloud
//!     Director Terraform provider. Three kinds are supported:
//!
//!     | Kind     | Input (default)  | Output        | Resource             |
//!     |----------|------------------|---------------|----------------------|
//!     | dnat     | datadnat.csv     | dnat.tf       | vcd_dnat (per row)   |
//!     | snat     | datasnat.csv     | snat.tf       | vcd_snat (per row)   |
//!     | firewall | datafw.csv       | firewall.tf   | vcd_firewall_rules   |
//!
//!     This is a pure lib: it powers the CLI but never prints, reads env vars or exits.
//!     Progress is reported through `tracing` events only.
//!
//! Architecture
//!
//!     Every kind runs the same pipeline:
//!
//!         Table (table.rs) → typed records (record.rs) → Blocks (hcl.rs) → file (publish.rs)
//!
//!     - RuleFormat trait: what a kind is called, which file it owns and how it renders
//!     - RuleRegistry: ordered discovery and selection of kinds
//!     - formats/: the three kind implementations
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── table.rs                # Delimited input, 1-based columns
//!     ├── record.rs               # Fixed-arity rule records
//!     ├── hcl.rs                  # Block model and serializer
//!     ├── format.rs               # RuleFormat trait definition
//!     ├── registry.rs             # RuleRegistry
//!     ├── publish.rs              # Delete-then-write output files
//!     ├── formats
//!     │   ├── dnat.rs
//!     │   ├── snat.rs
//!     │   └── firewall.rs
//!     ├── lib.rs
//!
//! Testing
//!
//!     Unit tests live next to the code. Rendered output is checked with inline `insta`
//!     snapshots. Whole-pipeline behaviour against a scratch directory lives in tests/.

pub mod error;
pub mod format;
pub mod formats;
pub mod hcl;
pub mod publish;
pub mod record;
pub mod registry;
pub mod table;

pub use error::{RuleError, TableError};
pub use format::RuleFormat;
pub use publish::{publish, publish_from_path, PublishArtifact, PublishResult, PublishSpec};
pub use registry::RuleRegistry;
pub use table::Table;

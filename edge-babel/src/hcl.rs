//! HCL block model and serialization
//!
//! Every rule kind renders through the same small model: a [`Block`] carries an optional
//! resource header, a list of attributes and a list of nested blocks. The serializer emits
//! the subset of HCL the vCD provider needs:
//!
//! ```text
//! resource "vcd_dnat" "rule1" {
//!   edge_gateway = "EdgeA"
//!   port = 8080
//! }
//!
//! ```
//!
//! - Two-space indentation per nesting level
//! - One space on each side of `=`
//! - Quoted values escape `\` and `"`, and double the `$` / `%` of `${` / `%{` so cells are
//!   never read as template sequences; bare values are emitted verbatim
//! - Each top-level block is followed by a blank line

use std::fmt;

/// Attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Emitted as a double-quoted string literal
    Quoted(String),
    /// Emitted verbatim (numbers)
    Bare(String),
}

impl Value {
    pub fn quoted(s: impl Into<String>) -> Self {
        Value::Quoted(s.into())
    }

    pub fn bare(s: impl Into<String>) -> Self {
        Value::Bare(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Quoted(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Bare(s) => f.write_str(s),
        }
    }
}

/// What opens a block: `resource "<type>" "<name>"` or a bare keyword like `rule`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLabel {
    Resource { kind: String, name: String },
    Nested(String),
}

impl fmt::Display for BlockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockLabel::Resource { kind, name } => write!(f, "resource \"{}\" \"{}\"", kind, name),
            BlockLabel::Nested(keyword) => f.write_str(keyword),
        }
    }
}

/// A configuration block with ordered attributes and nested blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub label: BlockLabel,
    pub attributes: Vec<(&'static str, Value)>,
    pub blocks: Vec<Block>,
}

impl Block {
    pub fn resource(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Block {
            label: BlockLabel::Resource {
                kind: kind.into(),
                name: name.into(),
            },
            attributes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn nested(keyword: impl Into<String>) -> Self {
        Block {
            label: BlockLabel::Nested(keyword.into()),
            attributes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<(&'static str, Value)>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_attribute(mut self, key: &'static str, value: Value) -> Self {
        self.attributes.push((key, value));
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Render this block as a top-level declaration, trailing blank line included
    pub fn render(&self) -> String {
        let mut serializer = HclSerializer::new();
        serializer.serialize_block(self);
        serializer.output
    }
}

struct HclSerializer {
    output: String,
    indent_level: usize,
}

impl HclSerializer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn push_line(&mut self, s: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn serialize_block(&mut self, block: &Block) {
        self.push_line(&format!("{} {{", block.label));

        self.indent_level += 1;
        for (key, value) in &block.attributes {
            self.push_line(&format!("{} = {}", key, value));
        }
        if !block.attributes.is_empty() && !block.blocks.is_empty() {
            self.output.push('\n');
        }
        for nested in &block.blocks {
            self.serialize_block(nested);
        }
        self.indent_level -= 1;

        self.push_line("}");
        self.output.push('\n');
    }
}

/// Escape characters that would terminate or alter an HCL string literal
fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("${", "$${")
        .replace("%{", "%%{")
}

//! Rule kind registry for discovery and selection
//!
//! This module provides a centralized registry for all rule kinds. Kinds keep their
//! registration order, which is also the order the CLI runs their pipelines in.

use crate::error::RuleError;
use crate::format::RuleFormat;

/// Registry of rule kinds
///
/// # Examples
///
/// ```ignore
/// let registry = RuleRegistry::with_defaults();
///
/// let dnat = registry.get("dnat")?;
/// let blocks = dnat.render(&table)?;
/// ```
pub struct RuleRegistry {
    formats: Vec<Box<dyn RuleFormat>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        RuleRegistry {
            formats: Vec::new(),
        }
    }

    /// Register a kind
    ///
    /// If a kind with the same name already exists, it is replaced in place.
    pub fn register<F: RuleFormat + 'static>(&mut self, format: F) {
        match self.formats.iter().position(|f| f.name() == format.name()) {
            Some(i) => self.formats[i] = Box::new(format),
            None => self.formats.push(Box::new(format)),
        }
    }

    /// Get a kind by name
    pub fn get(&self, name: &str) -> Result<&dyn RuleFormat, RuleError> {
        self.formats
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
            .ok_or_else(|| RuleError::UnknownKind(name.to_string()))
    }

    /// Kind names in registration order
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.iter().map(|f| f.name().to_string()).collect()
    }

    /// Iterate over kinds in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn RuleFormat> {
        self.formats.iter().map(|f| f.as_ref())
    }

    /// Create a registry with the DNAT, SNAT and firewall kinds, in that order
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::DnatFormat);
        registry.register(crate::formats::SnatFormat);
        registry.register(crate::formats::FirewallFormat);

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

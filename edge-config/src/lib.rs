//! Shared configuration loader for hcl-edge-gen.
//!
//! `defaults/edge.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. The CLI layers an optional user file and its own flags on top of
//! those defaults via [`Loader`] before deserializing into [`EdgeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/edge.default.toml");

/// Top-level configuration consumed by the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConfig {
    pub inputs: InputsConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Source table for each rule kind.
#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    pub dnat: PathBuf,
    pub snat: PathBuf,
    pub firewall: PathBuf,
}

impl InputsConfig {
    /// Input path for a kind name as registered in the rule registry
    pub fn for_kind(&self, kind: &str) -> Option<&Path> {
        match kind {
            "dnat" => Some(self.dnat.as_path()),
            "snat" => Some(self.snat.as_path()),
            "firewall" => Some(self.firewall.as_path()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EdgeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EdgeConfig, ConfigError> {
    Loader::new().build()
}

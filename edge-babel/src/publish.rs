//! Writing rendered rules to their output files
//!
//!     Each kind owns one file in the output directory. A run replaces that file wholesale:
//!
//!     1. the table is rendered completely in memory, so a malformed row aborts before the
//!        file system is touched and any previous output survives;
//!     2. an existing file is removed;
//!     3. if there is at least one block, the file is created and each block is appended
//!        in order. With zero blocks the file is left absent rather than created empty.
//!
//!     Replacement is not atomic: a reader watching the directory may briefly see the file
//!     missing or partially written. Nothing in this tool's use requires more.

use crate::error::{RuleError, TableError};
use crate::format::RuleFormat;
use crate::table::Table;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct PublishSpec<'a> {
    pub format: &'a dyn RuleFormat,
    pub table: &'a Table,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

impl<'a> PublishSpec<'a> {
    pub fn new(format: &'a dyn RuleFormat, table: &'a Table) -> Self {
        Self {
            format,
            table,
            output_dir: PathBuf::from("."),
            dry_run: false,
        }
    }

    pub fn with_output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Where this kind's output lives
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.format.output_file())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Blocks were written to this file
    File(PathBuf),
    /// Dry run: the text that would have been written
    InMemory(String),
    /// Nothing to write; no file exists at this path
    Absent(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub kind: String,
    pub artifact: PublishArtifact,
    /// Number of top-level blocks rendered
    pub blocks: usize,
}

pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, RuleError> {
    let kind = spec.format.name().to_string();
    let path = spec.output_path();

    let rendered: Vec<String> = spec
        .format
        .render(spec.table)?
        .iter()
        .map(|block| block.render())
        .collect();
    debug!(kind = %kind, blocks = rendered.len(), "rendered table");

    let blocks = rendered.len();
    let artifact = if spec.dry_run {
        PublishArtifact::InMemory(rendered.concat())
    } else {
        replace_file(&path, &rendered).map_err(|source| RuleError::Write {
            path: path.clone(),
            source,
        })?
    };

    Ok(PublishResult {
        kind,
        artifact,
        blocks,
    })
}

/// Load `input` and publish it, or return `None` when the input is missing or empty
pub fn publish_from_path(
    format: &dyn RuleFormat,
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    dry_run: bool,
) -> Result<Option<PublishResult>, RuleError> {
    let input = input.as_ref();
    let table = match Table::from_path(input) {
        Ok(table) => table,
        Err(TableError::NotFoundOrEmpty(path)) => {
            info!(kind = format.name(), input = %path.display(), "input missing or empty, skipping");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let spec = PublishSpec::new(format, &table)
        .with_output_dir(output_dir)
        .with_dry_run(dry_run);
    publish(spec).map(Some)
}

fn replace_file(path: &Path, blocks: &[String]) -> io::Result<PublishArtifact> {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed previous output"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    if blocks.is_empty() {
        info!(path = %path.display(), "no rules, output left absent");
        return Ok(PublishArtifact::Absent(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for block in blocks {
        writer.write_all(block.as_bytes())?;
    }
    writer.flush()?;

    info!(path = %path.display(), blocks = blocks.len(), "wrote output");
    Ok(PublishArtifact::File(path.to_path_buf()))
}

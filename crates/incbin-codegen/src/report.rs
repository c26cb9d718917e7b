//! Embedding report: what was embedded, how large, and where definitions live.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use incbin_targets::TargetProfile;

use crate::error::{CodegenError, Result};
use crate::naming::{SymbolNames, SymbolNaming};
use crate::resource::{PayloadKind, ResourceDescriptor};

/// Where the symbol definitions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefinitionSource {
    /// Emitted inline as an assembler block.
    Inline,
    /// Supplied by a registered definition provider.
    Provider,
    /// Left to an out-of-band mechanism; unresolved at link time otherwise.
    External,
}

impl fmt::Display for DefinitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefinitionSource::Inline => "inline",
            DefinitionSource::Provider => "definition provider",
            DefinitionSource::External => "external (not emitted)",
        })
    }
}

/// One embedded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub name: String,
    pub symbols: SymbolNames,
    pub source: PathBuf,
    pub kind: PayloadKind,
    /// Length of the source file.
    pub file_len: u64,
    /// The value `Size` will read at run time.
    pub size: u64,
    /// Hex SHA-256 of the source file.
    pub sha256: String,
}

impl ResourceEntry {
    /// Inspect the source file of `resource`, resolved against `base`.
    pub fn inspect(
        resource: &ResourceDescriptor,
        naming: &SymbolNaming,
        base: Option<&Path>,
    ) -> Result<Self> {
        let source = resource.resolved_path(base);
        let mut file = File::open(&source).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CodegenError::MissingSource {
                name: resource.name.clone(),
                path: source.clone(),
            },
            _ => CodegenError::Io(e),
        })?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(CodegenError::MissingSource {
                name: resource.name.clone(),
                path: source,
            });
        }
        symbol_size(&resource.name, metadata.len(), resource.kind)?;

        let mut hasher = Sha256::new();
        let file_len = io::copy(&mut file, &mut hasher)?;

        Ok(Self {
            name: resource.name.clone(),
            symbols: naming.names(&resource.name),
            source,
            kind: resource.kind,
            file_len,
            size: symbol_size(&resource.name, file_len, resource.kind)?,
            sha256: format!("{:x}", hasher.finalize()),
        })
    }
}

/// The `Size` value for a source of `file_len` bytes; it must fit the
/// 32-bit integer the assembler emits.
fn symbol_size(name: &str, file_len: u64, kind: PayloadKind) -> Result<u64> {
    let size = file_len + kind.terminator_len();
    let max = u64::from(u32::MAX);
    if size > max {
        return Err(CodegenError::SourceTooLarge {
            name: name.to_string(),
            len: file_len,
            max,
        });
    }
    Ok(size)
}

/// Summary of one embedding run.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedReport {
    pub target: String,
    pub family: String,
    /// Alignment of every data symbol, in bytes.
    pub alignment: u32,
    pub definitions: DefinitionSource,
    pub resources: Vec<ResourceEntry>,
    /// Files written, if any.
    pub outputs: Vec<PathBuf>,
}

impl EmbedReport {
    pub fn new(profile: &TargetProfile, definitions: DefinitionSource) -> Self {
        Self {
            target: profile.name.clone(),
            family: profile.family.to_string(),
            alignment: profile.alignment().bytes(),
            definitions,
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Total bytes placed in read-only data, excluding padding.
    pub fn total_bytes(&self) -> u64 {
        self.resources.iter().map(|r| r.size).sum()
    }
}

impl fmt::Display for EmbedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Embedding Report ===")?;
        writeln!(f, "Target: {} ({})", self.target, self.family)?;
        writeln!(f, "Alignment: {} bytes", self.alignment)?;
        writeln!(f, "Definitions: {}", self.definitions)?;

        writeln!(f)?;
        writeln!(
            f,
            "--- Resources ({}, {} bytes) ---",
            self.resources.len(),
            self.total_bytes()
        )?;
        for r in &self.resources {
            writeln!(f, "  {}: {} bytes ({})", r.name, r.size, r.source.display())?;
            writeln!(
                f,
                "    symbols: {}, {}, {}",
                r.symbols.data, r.symbols.end, r.symbols.size
            )?;
            writeln!(f, "    sha256: {}", r.sha256)?;
        }

        if !self.outputs.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Outputs ---")?;
            for path in &self.outputs {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}

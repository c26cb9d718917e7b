//! `incbin.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use incbin_codegen::{EmitLanguage, ResourceDescriptor, SymbolNaming};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "incbin.toml";

/// The top-level manifest structure for an incbin project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncbinManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Target selection.
    #[serde(default)]
    pub target: Option<TargetConfig>,
    /// Symbol naming.
    #[serde(default)]
    pub naming: SymbolNaming,
    /// Generated output.
    #[serde(default)]
    pub output: OutputConfig,
    /// Files to embed.
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceDescriptor>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Target section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Default profile name: a built-in, a project profile, or `host`.
    #[serde(default)]
    pub default: Option<String>,
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory generated files are written to, relative to the project.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Section replacing the target's read-only data section.
    #[serde(default)]
    pub section: Option<String>,
    /// Languages written by `incbin emit` when none is given.
    #[serde(default = "default_languages")]
    pub languages: Vec<EmitLanguage>,
    /// Generate safe accessor functions in Rust output.
    #[serde(default = "default_true")]
    pub accessors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            section: None,
            languages: default_languages(),
            accessors: true,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_languages() -> Vec<EmitLanguage> {
    vec![EmitLanguage::C, EmitLanguage::CHeader]
}

fn default_true() -> bool {
    true
}

impl IncbinManifest {
    /// Search upward from `start_dir` for an `incbin.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: IncbinManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing incbin.toml")
    }

    /// The default target profile name from the manifest.
    pub fn default_target(&self) -> Option<&str> {
        self.target.as_ref().and_then(|t| t.default.as_deref())
    }

    /// Generate the default template for `incbin init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[target]
default = "host"

[naming]
style = "camel"

[output]
dir = "out"
languages = ["c", "c-header"]

# [[resource]]
# name = "Icon"
# path = "assets/icon.png"
"#
        )
    }
}

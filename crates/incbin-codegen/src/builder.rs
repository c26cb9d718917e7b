//! Build-script entry point.
//!
//! ```no_run
//! // build.rs
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     incbin_codegen::Builder::from_env()?
//!         .embed("Icon", "assets/icon.png")
//!         .embed_text("License", "LICENSE")
//!         .build()?;
//!     Ok(())
//! }
//! ```
//!
//! ```ignore
//! // src/lib.rs
//! incbin::include_embedded!();
//!
//! pub fn icon_bytes() -> &'static [u8] {
//!     icon().as_bytes()
//! }
//! ```
//!
//! `incbin.rs` in `OUT_DIR` defines and declares every resource; include it
//! in exactly one module. `incbin_extern.rs` only declares them and may be
//! included anywhere else.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use incbin_targets::TargetProfile;

use crate::emit::{EmitLanguage, EmitOptions};
use crate::error::{CodegenError, Result};
use crate::fallback::DefinitionProvider;
use crate::naming::{NamingStyle, SymbolNaming};
use crate::pipeline::{run, PipelineConfig};
use crate::report::{DefinitionSource, EmbedReport};
use crate::resource::{ElementType, ResourceDescriptor};

/// File holding definitions and declarations.
pub const DEFINITIONS_FILE: &str = "incbin.rs";
/// File holding declarations only.
pub const DECLARATIONS_FILE: &str = "incbin_extern.rs";

/// Collects embedding requests and writes the generated Rust into `OUT_DIR`.
#[derive(Debug)]
pub struct Builder {
    profile: TargetProfile,
    resources: Vec<ResourceDescriptor>,
    naming: SymbolNaming,
    section: Option<String>,
    accessors: bool,
    manifest_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    provider: Option<Box<dyn DefinitionProvider>>,
    cargo_directives: bool,
}

impl Builder {
    /// A builder for an explicit profile. Paths resolve against the current
    /// directory unless [`manifest_dir`](Self::manifest_dir) is set.
    pub fn new(profile: TargetProfile) -> Self {
        Self {
            profile,
            resources: Vec::new(),
            naming: SymbolNaming::default(),
            section: None,
            accessors: true,
            manifest_dir: None,
            out_dir: None,
            provider: None,
            cargo_directives: true,
        }
    }

    /// A builder for the crate Cargo is currently building.
    pub fn from_env() -> Result<Self> {
        let profile = TargetProfile::from_cargo_env()?;
        let mut builder = Self::new(profile);
        builder.manifest_dir = Some(env_path("CARGO_MANIFEST_DIR")?);
        builder.out_dir = Some(env_path("OUT_DIR")?);
        Ok(builder)
    }

    /// Embed `path` verbatim as `name`.
    pub fn embed(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.embed_resource(ResourceDescriptor::new(name, path))
    }

    /// Embed `path` followed by a NUL terminator, with `c_char` elements.
    pub fn embed_text(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.embed_resource(ResourceDescriptor::text(name, path))
    }

    /// Embed `path` verbatim, declared with the given element type.
    pub fn embed_typed(
        self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        element: ElementType,
    ) -> Self {
        self.embed_resource(ResourceDescriptor::new(name, path).with_element(element))
    }

    pub fn embed_resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resources.push(resource);
        self
    }

    /// Prefix composed before the `g` marker of every symbol.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naming.prefix = Some(prefix.into());
        self
    }

    pub fn style(mut self, style: NamingStyle) -> Self {
        self.naming.style = style;
        self
    }

    /// Output section replacing the target's read-only data section.
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Whether to generate a safe accessor `fn` per resource (default: yes).
    pub fn accessors(mut self, enabled: bool) -> Self {
        self.accessors = enabled;
        self
    }

    pub fn manifest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Provider for definitions on targets that can only declare.
    pub fn definition_provider(mut self, provider: Box<dyn DefinitionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Whether to print `cargo:rerun-if-changed` lines (default: yes).
    pub fn cargo_directives(mut self, enabled: bool) -> Self {
        self.cargo_directives = enabled;
        self
    }

    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    /// Validate, inspect, generate, and write.
    pub fn build(&self) -> Result<EmbedReport> {
        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => env_path("OUT_DIR")?,
        };

        let config = PipelineConfig {
            profile: self.profile.clone(),
            naming: self.naming.clone(),
            options: EmitOptions {
                section: self.section.clone(),
                accessors: self.accessors,
            },
            languages: vec![EmitLanguage::Rust, EmitLanguage::RustExtern],
            base_dir: self.manifest_dir.clone(),
        };
        let output = run(&self.resources, &config)?;
        let mut report = output.report;

        for entry in &report.resources {
            debug!(
                resource = %entry.name,
                size = entry.size,
                source = %entry.source.display(),
                "embedding resource"
            );
            if self.cargo_directives {
                println!("cargo:rerun-if-changed={}", entry.source.display());
            }
        }

        if report.definitions == DefinitionSource::External {
            match &self.provider {
                Some(provider) => {
                    provider
                        .provide(&report.resources, &self.profile)
                        .map_err(|detail| CodegenError::Provider {
                            detail: format!("{}: {detail}", provider.name()),
                        })?;
                    report.definitions = DefinitionSource::Provider;
                }
                None => warn!(
                    target_profile = %self.profile.name,
                    "target cannot define embedded data inline and no definition provider is set; \
                     the symbols will be unresolved unless defined elsewhere"
                ),
            }
        }

        fs::create_dir_all(&out_dir)?;
        for file in &output.files {
            let name = match file.language {
                EmitLanguage::Rust => DEFINITIONS_FILE,
                _ => DECLARATIONS_FILE,
            };
            let path = out_dir.join(name);
            fs::write(&path, &file.contents)?;
            report.outputs.push(path);
        }

        info!(
            target_profile = %report.target,
            resources = report.resources.len(),
            bytes = report.total_bytes(),
            "embedding complete"
        );
        Ok(report)
    }
}

fn env_path(var: &str) -> Result<PathBuf> {
    env::var_os(var)
        .map(PathBuf::from)
        .ok_or_else(|| CodegenError::MissingEnv { var: var.to_string() })
}

/// Path of a generated file inside `out_dir`.
pub fn generated_path(out_dir: &Path, declarations_only: bool) -> PathBuf {
    out_dir.join(if declarations_only {
        DECLARATIONS_FILE
    } else {
        DEFINITIONS_FILE
    })
}

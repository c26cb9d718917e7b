//! Embedding pipeline orchestrator.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use incbin_targets::TargetProfile;

use crate::emit::{dialect_or_fallback, generate, render, EmitLanguage, EmitOptions};
use crate::error::{CodegenError, Result};
use crate::naming::{accessor_name, SymbolNaming};
use crate::report::{DefinitionSource, EmbedReport, ResourceEntry};
use crate::resource::ResourceDescriptor;

/// Configuration for one embedding run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target profile.
    pub profile: TargetProfile,
    /// Symbol naming rules.
    pub naming: SymbolNaming,
    /// Section override and accessor switch.
    pub options: EmitOptions,
    /// One output file per language, in order.
    pub languages: Vec<EmitLanguage>,
    /// Directory relative source paths are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(profile: TargetProfile) -> Self {
        Self {
            profile,
            naming: SymbolNaming::default(),
            options: EmitOptions::default(),
            languages: Vec::new(),
            base_dir: None,
        }
    }

    /// Whether any requested language carries Rust accessor functions.
    pub fn emits_accessors(&self) -> bool {
        self.options.accessors
            && self
                .languages
                .iter()
                .any(|l| matches!(l, EmitLanguage::Rust | EmitLanguage::RustExtern))
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub language: EmitLanguage,
    pub contents: String,
}

/// Output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Rendered files, in the order of `PipelineConfig::languages`.
    pub files: Vec<EmittedFile>,
    /// Report with sizes and digests.
    pub report: EmbedReport,
}

/// Check every request and inspect every source without generating anything.
pub fn plan(resources: &[ResourceDescriptor], config: &PipelineConfig) -> Result<EmbedReport> {
    // Stage 1: Dialect resolution; incoherent profiles fail before any file is read
    let dialect = dialect_or_fallback(&config.profile, config.options.section.as_deref())?;
    let definitions = if dialect.is_some() {
        DefinitionSource::Inline
    } else {
        DefinitionSource::External
    };

    // Stage 2: Name validation and duplicate detection
    config.naming.validate()?;
    let mut seen = HashSet::new();
    for resource in resources {
        resource.validate()?;
        if !seen.insert(resource.name.as_str()) {
            return Err(CodegenError::DuplicateResource {
                name: resource.name.clone(),
            });
        }
    }
    if config.emits_accessors() {
        let mut accessors: HashMap<String, &str> = HashMap::new();
        for resource in resources {
            let accessor = accessor_name(&resource.name);
            if let Some(first) = accessors.get(&accessor) {
                return Err(CodegenError::AccessorCollision {
                    first: (*first).to_string(),
                    second: resource.name.clone(),
                    accessor,
                });
            }
            accessors.insert(accessor, &resource.name);
        }
    }

    // Stage 3: Source inspection
    let mut report = EmbedReport::new(&config.profile, definitions);
    for resource in resources {
        report.resources.push(ResourceEntry::inspect(
            resource,
            &config.naming,
            config.base_dir.as_deref(),
        )?);
    }
    Ok(report)
}

/// Run the full pipeline: plan -> generate -> render.
pub fn run(resources: &[ResourceDescriptor], config: &PipelineConfig) -> Result<PipelineOutput> {
    let report = plan(resources, config)?;

    // Stage 4: Generation, with sources pinned to the inspected paths
    let pinned: Vec<ResourceDescriptor> = resources
        .iter()
        .zip(&report.resources)
        .map(|(resource, entry)| ResourceDescriptor {
            source_path: entry.source.clone(),
            ..resource.clone()
        })
        .collect();

    let mut files = Vec::with_capacity(config.languages.len());
    for &language in &config.languages {
        let emitted = pinned
            .iter()
            .map(|r| generate(r, &config.naming, &config.profile, language, &config.options))
            .collect::<Result<Vec<_>>>()?;

        // Stage 5: Rendering
        files.push(EmittedFile {
            language,
            contents: render(language, &config.profile, &emitted),
        });
    }

    Ok(PipelineOutput { files, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use incbin_targets::resolve_profile;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.bin"), [0x2a]).unwrap();
        fs::write(dir.path().join("empty"), b"").unwrap();
        dir
    }

    fn config(profile: &str, dir: &tempfile::TempDir, languages: Vec<EmitLanguage>) -> PipelineConfig {
        PipelineConfig {
            languages,
            base_dir: Some(dir.path().to_path_buf()),
            ..PipelineConfig::new(resolve_profile(profile).unwrap())
        }
    }

    #[test]
    fn full_pipeline_elf() {
        let dir = fixture();
        let resources = [
            ResourceDescriptor::new("Onebyte", "one.bin"),
            ResourceDescriptor::new("Empty", "empty"),
        ];
        let out = run(
            &resources,
            &config("linux-x86_64", &dir, vec![EmitLanguage::Asm, EmitLanguage::CHeader]),
        )
        .unwrap();

        assert_eq!(out.files.len(), 2);
        assert_eq!(out.files[0].language, EmitLanguage::Asm);
        let asm = &out.files[0].contents;
        assert!(asm.contains(&format!(
            ".incbin \"{}\"",
            dir.path().join("one.bin").display()
        )));
        assert!(out.files[1].contents.contains("extern const unsigned int gEmptySize;"));

        assert_eq!(out.report.definitions, DefinitionSource::Inline);
        assert_eq!(out.report.resources[0].size, 1);
        assert_eq!(out.report.resources[1].size, 0);
    }

    #[test]
    fn duplicate_names_fail_even_with_distinct_files() {
        let dir = fixture();
        let resources = [
            ResourceDescriptor::new("Blob", "one.bin"),
            ResourceDescriptor::new("Blob", "empty"),
        ];
        let err = plan(&resources, &config("linux-x86_64", &dir, vec![])).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateResource { ref name } if name == "Blob"));
    }

    #[test]
    fn accessor_collisions_fail_only_for_rust_output() {
        let dir = fixture();
        let resources = [
            ResourceDescriptor::new("Icon", "one.bin"),
            ResourceDescriptor::new("icon", "empty"),
        ];
        let err = plan(&resources, &config("linux-x86_64", &dir, vec![EmitLanguage::Rust])).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::AccessorCollision { ref first, ref second, ref accessor }
                if first == "Icon" && second == "icon" && accessor == "icon"
        ));

        // C symbols stay distinct, and so do Rust ones without accessors
        assert!(plan(&resources, &config("linux-x86_64", &dir, vec![EmitLanguage::C])).is_ok());
        let mut no_accessors = config("linux-x86_64", &dir, vec![EmitLanguage::Rust]);
        no_accessors.options.accessors = false;
        assert!(plan(&resources, &no_accessors).is_ok());
    }

    #[test]
    fn missing_source_fails() {
        let dir = fixture();
        let resources = [ResourceDescriptor::new("Gone", "gone.bin")];
        assert!(matches!(
            plan(&resources, &config("linux-x86_64", &dir, vec![])).unwrap_err(),
            CodegenError::MissingSource { .. }
        ));
    }

    #[test]
    fn declaration_only_reports_external_definitions() {
        let dir = fixture();
        let resources = [ResourceDescriptor::new("Onebyte", "one.bin")];
        let out = run(&resources, &config("wasm32", &dir, vec![EmitLanguage::RustExtern])).unwrap();
        assert_eq!(out.report.definitions, DefinitionSource::External);
        assert!(!out.files[0].contents.contains("global_asm"));
        assert!(out.files[0].contents.contains("pub static gOnebyteData: [u8; 0];"));
    }

    #[test]
    fn asm_for_declaration_only_fails() {
        let dir = fixture();
        let resources = [ResourceDescriptor::new("Onebyte", "one.bin")];
        let err = run(&resources, &config("wasm32", &dir, vec![EmitLanguage::Asm])).unwrap_err();
        assert!(matches!(err, CodegenError::NoInlineAssembly { .. }));
    }

    #[test]
    fn incoherent_profile_fails_before_reading_sources() {
        let dir = fixture();
        let mut profile = resolve_profile("linux-x86_64").unwrap();
        profile.assembler = incbin_targets::AssemblerDialect::ArmShift;
        let resources = [ResourceDescriptor::new("Gone", "gone.bin")];
        let err = plan(&resources, &PipelineConfig::new(profile).with_base_dir(dir.path())).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedDialect { .. }));
    }
}

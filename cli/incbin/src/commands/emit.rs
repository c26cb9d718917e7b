//! `incbin emit`: write embedding code for a target.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use incbin_codegen::{
    run as run_pipeline, EmitLanguage, EmitOptions, NamingStyle, PipelineConfig,
    ResourceDescriptor,
};

use crate::commands::target::{resolve, HOST};
use crate::manifest::IncbinManifest;

/// Base name of files written into the manifest's output directory.
const OUTPUT_STEM: &str = "embedded";

/// Command-line overrides for one emission.
#[derive(Debug, Clone)]
pub struct EmitRequest {
    pub target: Option<String>,
    pub languages: Vec<EmitLanguage>,
    pub output: Option<PathBuf>,
    pub prefix: Option<String>,
    pub style: Option<NamingStyle>,
    pub section: Option<String>,
    /// Ad-hoc resources are text payloads.
    pub text: bool,
    pub accessors: bool,
    /// `NAME=PATH` specs; empty means the manifest's resources.
    pub resources: Vec<String>,
}

impl Default for EmitRequest {
    fn default() -> Self {
        Self {
            target: None,
            languages: Vec::new(),
            output: None,
            prefix: None,
            style: None,
            section: None,
            text: false,
            accessors: true,
            resources: Vec::new(),
        }
    }
}

/// Parse a `NAME=PATH` resource argument.
pub fn parse_resource_spec(spec: &str, text: bool) -> Result<ResourceDescriptor> {
    let Some((name, path)) = spec.split_once('=') else {
        bail!("invalid resource '{spec}' (expected NAME=PATH)");
    };
    if path.is_empty() {
        bail!("resource '{name}' has an empty path");
    }
    Ok(if text {
        ResourceDescriptor::text(name, path)
    } else {
        ResourceDescriptor::new(name, path)
    })
}

/// File name for a language inside the output directory.
fn output_file_name(language: EmitLanguage) -> String {
    match language {
        EmitLanguage::RustExtern => format!("{OUTPUT_STEM}_extern.rs"),
        other => format!("{OUTPUT_STEM}.{}", other.extension()),
    }
}

/// Generate code for ad-hoc resources or the manifest's `[[resource]]` list.
///
/// Ad-hoc paths resolve against `cwd`, manifest paths against the project.
pub fn run(
    cwd: &Path,
    project: Option<(&IncbinManifest, &Path)>,
    request: &EmitRequest,
) -> Result<()> {
    let manifest = project.map(|(m, _)| m);

    // 1. Resources
    let (resources, base_dir) = if !request.resources.is_empty() {
        let resources = request
            .resources
            .iter()
            .map(|spec| parse_resource_spec(spec, request.text))
            .collect::<Result<Vec<_>>>()?;
        (resources, cwd.to_path_buf())
    } else if let Some((manifest, dir)) = project {
        (manifest.resources.clone(), dir.to_path_buf())
    } else {
        bail!("no resources given and no incbin.toml found");
    };
    if resources.is_empty() {
        bail!("nothing to embed: add [[resource]] entries or pass NAME=PATH");
    }

    // 2. Target
    let target = request
        .target
        .as_deref()
        .or_else(|| manifest.and_then(|m| m.default_target()))
        .unwrap_or(HOST);
    let profile = resolve(target, project.map(|(_, dir)| dir))?;

    // 3. Naming and output options, command line over manifest
    let mut naming = manifest.map(|m| m.naming.clone()).unwrap_or_default();
    if let Some(prefix) = &request.prefix {
        naming.prefix = Some(prefix.clone());
    }
    if let Some(style) = request.style {
        naming.style = style;
    }
    let languages = if !request.languages.is_empty() {
        request.languages.clone()
    } else {
        manifest
            .map(|m| m.output.languages.clone())
            .unwrap_or_else(|| vec![EmitLanguage::CHeader])
    };
    let section = request
        .section
        .clone()
        .or_else(|| manifest.and_then(|m| m.output.section.clone()));
    let accessors = request.accessors && manifest.map_or(true, |m| m.output.accessors);

    let config = PipelineConfig {
        profile,
        naming,
        options: EmitOptions { section, accessors },
        languages,
        base_dir: Some(base_dir),
    };
    debug!(target_profile = %config.profile.name, languages = config.languages.len(), "emitting");

    // 4. Generate
    let output = run_pipeline(&resources, &config)?;

    // 5. Write
    match (&request.output, project) {
        (Some(path), _) => {
            if output.files.len() != 1 {
                bail!("--output needs exactly one --lang, got {}", output.files.len());
            }
            let contents = &output.files[0].contents;
            if path.as_os_str() == "-" {
                std::io::stdout().write_all(contents.as_bytes())?;
            } else {
                fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
        }
        (None, Some((manifest, dir))) => {
            let out_dir = dir.join(&manifest.output.dir);
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            for file in &output.files {
                let path = out_dir.join(output_file_name(file.language));
                fs::write(&path, &file.contents)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
        }
        (None, None) => {
            let mut stdout = std::io::stdout().lock();
            for file in &output.files {
                stdout.write_all(file.contents.as_bytes())?;
            }
        }
    }

    info!(
        target_profile = %output.report.target,
        resources = output.report.resources.len(),
        definitions = %output.report.definitions,
        "emit complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_specs() {
        let r = parse_resource_spec("Icon=assets/icon.png", false).unwrap();
        assert_eq!(r.name, "Icon");
        assert_eq!(r.source_path, Path::new("assets/icon.png"));

        let t = parse_resource_spec("Banner=a=b.txt", true).unwrap();
        assert_eq!(t.source_path, Path::new("a=b.txt"));
        assert_eq!(t.kind, incbin_codegen::PayloadKind::Text);

        assert!(parse_resource_spec("NoPath", false).is_err());
        assert!(parse_resource_spec("Empty=", false).is_err());
    }

    #[test]
    fn output_names() {
        assert_eq!(output_file_name(EmitLanguage::Asm), "embedded.S");
        assert_eq!(output_file_name(EmitLanguage::CHeader), "embedded.h");
        assert_eq!(output_file_name(EmitLanguage::RustExtern), "embedded_extern.rs");
    }

    #[test]
    fn ad_hoc_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.bin"), [1u8]).unwrap();
        let out = dir.path().join("one.S");
        let request = EmitRequest {
            target: Some("ghs-powerpc".into()),
            languages: vec![EmitLanguage::Asm],
            output: Some(out.clone()),
            resources: vec!["Onebyte=one.bin".into()],
            ..EmitRequest::default()
        };
        run(dir.path(), None, &request).unwrap();

        let asm = fs::read_to_string(out).unwrap();
        assert!(asm.contains("INCBIN \""));
        assert!(asm.contains(".int gOnebyteEnd - gOnebyteData"));
    }

    #[test]
    fn output_requires_single_language() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.bin"), [1u8]).unwrap();
        let request = EmitRequest {
            target: Some("linux-x86_64".into()),
            languages: vec![EmitLanguage::C, EmitLanguage::CHeader],
            output: Some(dir.path().join("x")),
            resources: vec!["Onebyte=one.bin".into()],
            ..EmitRequest::default()
        };
        assert!(run(dir.path(), None, &request).is_err());
    }

    #[test]
    fn missing_resources_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), None, &EmitRequest::default()).unwrap_err();
        assert!(err.to_string().contains("no resources"));

        let request = EmitRequest {
            target: Some("linux-x86_64".into()),
            resources: vec!["Gone=gone.bin".into()],
            ..EmitRequest::default()
        };
        assert!(run(dir.path(), None, &request).is_err());
    }

    #[test]
    fn asm_for_declaration_only_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.bin"), [1u8]).unwrap();
        let request = EmitRequest {
            target: Some("windows-msvc-x86_64".into()),
            languages: vec![EmitLanguage::Asm],
            output: Some(dir.path().join("one.S")),
            resources: vec!["Onebyte=one.bin".into()],
            ..EmitRequest::default()
        };
        let err = run(dir.path(), None, &request).unwrap_err();
        assert!(format!("{err:#}").contains("only declarations"));
    }
}

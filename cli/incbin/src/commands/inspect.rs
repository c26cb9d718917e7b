//! `incbin inspect`: embedding report for the manifest's resources.

use std::path::Path;

use anyhow::{bail, Result};

use incbin_codegen::{plan, EmitOptions, EmbedReport, PipelineConfig};

use crate::commands::target::{resolve, HOST};
use crate::manifest::IncbinManifest;

/// Build the report without generating or writing anything.
pub fn report(project_dir: &Path, manifest: &IncbinManifest, target: Option<&str>) -> Result<EmbedReport> {
    let target = target.or(manifest.default_target()).unwrap_or(HOST);
    let profile = resolve(target, Some(project_dir))?;
    let config = PipelineConfig {
        naming: manifest.naming.clone(),
        options: EmitOptions {
            section: manifest.output.section.clone(),
            accessors: manifest.output.accessors,
        },
        ..PipelineConfig::new(profile).with_base_dir(project_dir)
    };
    Ok(plan(&manifest.resources, &config)?)
}

/// Print the report as text or JSON.
pub fn run(
    project_dir: &Path,
    manifest: &IncbinManifest,
    target: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let report = report(project_dir, manifest, target)?;
    match format {
        None | Some("text") => print!("{report}"),
        Some("json") => println!("{}", serde_json::to_string_pretty(&report)?),
        Some(other) => bail!("unknown format '{other}' (expected text or json)"),
    }
    Ok(())
}

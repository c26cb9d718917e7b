//! `incbin init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{IncbinManifest, MANIFEST_FILE};

/// Create a new incbin project at the given path.
///
/// `name` is the project name. The directory `name` is created relative to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    // Create directory structure
    for sub in ["assets", "profiles", "out"] {
        fs::create_dir_all(project_dir.join(sub))
            .with_context(|| format!("creating {sub}/ directory"))?;
    }

    // Generate incbin.toml
    fs::write(project_dir.join(MANIFEST_FILE), IncbinManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    // Generate .gitignore
    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/assets/");
    println!("  {name}/profiles/");
    println!("  {name}/out/");
    println!("  {name}/.gitignore");

    Ok(())
}

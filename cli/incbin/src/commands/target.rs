//! `incbin target`: browse, author, and check target profiles.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use incbin_codegen::dialect::{resolve_dialect, DialectFragmentSet};
use incbin_codegen::CodegenError;
use incbin_targets::parse::{
    discover_profiles, find_profile, generate_template, has_errors, profile_to_toml,
    validate_profile, PROFILE_SUFFIX,
};
use incbin_targets::{builtin_profiles, CfgValues, TargetProfile};

/// Name that resolves to the machine running the CLI.
pub const HOST: &str = "host";

/// Resolve a profile name: `host`, a project profile, a `.profile.toml` path, or a built-in.
pub fn resolve(name: &str, project_dir: Option<&Path>) -> Result<TargetProfile> {
    if name == HOST {
        return host_profile();
    }
    match find_profile(project_dir, name).with_context(|| format!("loading profile '{name}'"))? {
        Some(profile) => Ok(profile),
        None => bail!("unknown target: '{name}'. Use 'incbin target list' to see available targets."),
    }
}

/// The profile of the machine the CLI was compiled for.
pub fn host_profile() -> Result<TargetProfile> {
    let mut features = Vec::new();
    for (enabled, feature) in [
        (cfg!(target_feature = "sse2"), "sse2"),
        (cfg!(target_feature = "avx"), "avx"),
        (cfg!(target_feature = "neon"), "neon"),
        (cfg!(target_feature = "altivec"), "altivec"),
        (cfg!(target_feature = "simd128"), "simd128"),
    ] {
        if enabled {
            features.push(feature.to_string());
        }
    }
    let cfg = CfgValues {
        arch: std::env::consts::ARCH.to_string(),
        os: std::env::consts::OS.to_string(),
        vendor: String::new(),
        env: String::new(),
        pointer_width: usize::BITS.to_string(),
        features,
    };
    let mut profile = TargetProfile::from_cfg(&cfg).context("detecting host profile")?;
    profile.name = format!("{HOST} ({})", profile.name);
    Ok(profile)
}

/// List all built-in and project profiles.
pub fn list(project_dir: Option<&Path>) -> Result<()> {
    println!("Built-in profiles:");
    println!();
    for (name, description) in builtin_profiles() {
        println!("  {name:<25} {description}");
    }
    println!("  {HOST:<25} the machine running incbin");

    if let Some(dir) = project_dir {
        let custom = discover_profiles(dir)?;
        if !custom.is_empty() {
            println!();
            println!("Project profiles:");
            println!();
            for (name, path) in custom {
                println!("  {name:<25} {}", path.display());
            }
        }
    }

    println!();
    println!("Use 'incbin target describe <name>' for details.");
    Ok(())
}

#[derive(Serialize)]
struct Description<'a> {
    profile: &'a TargetProfile,
    alignment: u32,
    alignment_log2: u32,
    dialect: Option<DialectFragmentSet>,
}

/// Describe a profile in detail.
pub fn describe(name: &str, project_dir: Option<&Path>, format: Option<&str>) -> Result<()> {
    let profile = resolve(name, project_dir)?;
    let alignment = profile.alignment();
    let dialect = match resolve_dialect(&profile) {
        Ok(d) => Some(d),
        Err(CodegenError::NoInlineAssembly { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    match format {
        Some("toml") => {
            print!("{}", profile_to_toml(&profile)?);
            return Ok(());
        }
        Some("json") => {
            let description = Description {
                profile: &profile,
                alignment: alignment.bytes(),
                alignment_log2: alignment.log2(),
                dialect,
            };
            println!("{}", serde_json::to_string_pretty(&description)?);
            return Ok(());
        }
        Some(other) if other != "text" => bail!("unknown format '{other}' (expected text, toml, or json)"),
        _ => {}
    }

    println!("=== Profile: {} ===", profile.name);
    println!("Architecture:  {} ({} bits)", profile.architecture, profile.pointer_width.bits());
    println!("SIMD class:    {:?}", profile.simd);
    println!("Family:        {}", profile.family);
    println!("Assembler:     {}", profile.assembler);
    println!("Symbol prefix: {:?}", profile.symbol_prefix);
    println!("Alignment:     {} bytes (2^{})", alignment.bytes(), alignment.log2());
    println!();

    match dialect {
        Some(d) => {
            println!("--- Fragments ---");
            println!("  Section:     {}", d.section_enter);
            println!("  Restore:     {}", d.section_exit);
            println!("  Global:      {}", d.global_directive);
            println!(
                "  Type:        {}",
                d.type_marker.map(|m| format!(".type <sym>, {m}")).unwrap_or_else(|| "(none)".into())
            );
            println!("  Align:       {}", d.align_line(alignment));
            println!("  Include:     {}", d.raw_include);
            println!("  Integer:     {}", d.int_directive);
        }
        None => {
            println!("--- Declaration only ---");
            println!("  No raw-include facility: definitions must be supplied externally.");
        }
    }
    Ok(())
}

/// Write a template `<name>.profile.toml` into the project's `profiles/` directory.
pub fn new(name: &str, project_dir: &Path) -> Result<()> {
    let dir = project_dir.join("profiles");
    let path = dir.join(format!("{name}{PROFILE_SUFFIX}"));
    if path.exists() {
        bail!("profile '{}' already exists", path.display());
    }
    fs::create_dir_all(&dir).context("creating profiles/ directory")?;
    fs::write(&path, generate_template(name)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Validate a profile for internal consistency and dialect coverage.
pub fn validate(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let profile = resolve(name, project_dir)?;
    let mut failed = false;

    if let Err(issues) = validate_profile(&profile) {
        for issue in &issues {
            println!("  {}: {}", issue.severity, issue.message);
        }
        failed = has_errors(&issues);
    }

    match resolve_dialect(&profile) {
        Ok(_) | Err(CodegenError::NoInlineAssembly { .. }) => {}
        Err(e) => {
            println!("  error: {e}");
            failed = true;
        }
    }

    if failed {
        bail!("profile '{name}' is invalid");
    }
    println!("Profile '{}' is valid.", profile.name);
    Ok(())
}

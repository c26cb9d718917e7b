//! TOML parsing, serialization, validation, and discovery for profile definitions.
//!
//! Custom toolchains are described by `.profile.toml` files in the `profiles/`
//! directory of a project. This module loads, validates, serializes, and
//! discovers these files.

use std::path::{Path, PathBuf};

use crate::error::{Result, TargetError};
use crate::family::{AssemblerDialect, ObjectFamily};
use crate::profile::TargetProfile;

/// File suffix of profile definitions.
pub const PROFILE_SUFFIX: &str = ".profile.toml";

/// A validation issue found in a profile definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a profile from a `.profile.toml` file.
pub fn load_profile_toml(path: &Path) -> Result<TargetProfile> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_profile_toml(&content)
}

/// Parse a profile from a TOML string.
pub fn parse_profile_toml(toml_str: &str) -> Result<TargetProfile> {
    let profile: TargetProfile = toml::from_str(toml_str)?;
    Ok(profile)
}

/// Serialize a profile to pretty TOML.
pub fn profile_to_toml(profile: &TargetProfile) -> Result<String> {
    let toml_str = toml::to_string_pretty(profile)?;
    Ok(toml_str)
}

/// Validate a profile for internal consistency.
///
/// Returns `Ok(())` if clean, or `Err(issues)` with every problem found.
/// Warnings alone do not make a profile unusable; see [`has_errors`].
pub fn validate_profile(profile: &TargetProfile) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let error = |message: String| ValidationIssue {
        severity: "error",
        message,
    };

    // 1. Name is usable as a file stem
    if profile.name.is_empty()
        || !profile
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        issues.push(error(format!(
            "profile name '{}' must be non-empty and use only [A-Za-z0-9-_.]",
            profile.name
        )));
    }

    // 2. Symbol prefix can be pasted in front of a C identifier
    if !profile
        .symbol_prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        || profile.symbol_prefix.starts_with(|c: char| c.is_ascii_digit())
    {
        issues.push(error(format!(
            "symbol-prefix '{}' is not a valid identifier prefix",
            profile.symbol_prefix
        )));
    }

    // 3. Pointer width does not exceed the architecture's
    let natural = profile.architecture.natural_pointer_width();
    if profile.pointer_width > natural {
        issues.push(error(format!(
            "pointer width {} bits exceeds the {}-bit {} architecture",
            profile.pointer_width.bits(),
            natural.bits(),
            profile.architecture
        )));
    } else if profile.pointer_width < natural {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!(
                "pointer width {} bits is narrower than the {} default ({} bits); ILP32 ABI assumed",
                profile.pointer_width.bits(),
                profile.architecture,
                natural.bits()
            ),
        });
    }

    // 4. Shift-exponent alignment only exists on ARM assemblers
    if profile.assembler == AssemblerDialect::ArmShift && !profile.architecture.is_arm32() {
        issues.push(error(format!(
            "assembler 'arm-shift' requires the arm architecture, found {}",
            profile.architecture
        )));
    }

    // 5. Family and assembler agree
    match profile.family {
        ObjectFamily::MachO | ObjectFamily::Coff if profile.assembler != AssemblerDialect::Gnu => {
            issues.push(error(format!(
                "family '{}' requires the gnu assembler dialect, found '{}'",
                profile.family, profile.assembler
            )));
        }
        ObjectFamily::ArmEmbedded if !profile.architecture.is_arm32() => {
            issues.push(error(format!(
                "family 'arm-embedded' requires the arm architecture, found {}",
                profile.architecture
            )));
        }
        ObjectFamily::Elf if profile.architecture.is_wasm() => {
            issues.push(error(format!(
                "{} does not produce ELF objects; use family 'declaration-only'",
                profile.architecture
            )));
        }
        _ => {}
    }

    // 6. Mach-O symbols carry an underscore
    if profile.family == ObjectFamily::MachO && profile.symbol_prefix != "_" {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!(
                "Mach-O targets normally use symbol-prefix \"_\", found \"{}\"",
                profile.symbol_prefix
            ),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Whether a validation result contains at least one error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == "error")
}

/// Generate a template `.profile.toml` for a new toolchain.
///
/// Seeds from linux-x86_64 with the given custom name.
pub fn generate_template(name: &str) -> Result<String> {
    let mut profile = TargetProfile::linux_x86_64();
    profile.name = name.into();
    profile_to_toml(&profile)
}

/// Discover all `.profile.toml` files in a project's `profiles/` directory.
///
/// Returns a list of (profile_name, file_path) pairs sorted by name.
pub fn discover_profiles(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let profiles_dir = project_dir.join("profiles");
    if !profiles_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in std::fs::read_dir(&profiles_dir)? {
        let path = entry?.path();
        let stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(PROFILE_SUFFIX))
            .map(String::from);
        if let Some(name) = stem {
            profiles.push((name, path));
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(profiles)
}

/// Find a project profile by name, falling back to the built-in catalogue.
pub fn find_profile(project_dir: Option<&Path>, name: &str) -> Result<Option<TargetProfile>> {
    if let Some(dir) = project_dir {
        let path = dir.join("profiles").join(format!("{name}{PROFILE_SUFFIX}"));
        if path.is_file() {
            return load_profile_toml(&path).map(Some);
        }
    }
    if name.ends_with(PROFILE_SUFFIX) {
        return load_profile_toml(Path::new(name)).map(Some);
    }
    Ok(crate::profile::resolve_profile(name))
}

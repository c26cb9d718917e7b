//! Profile detection from a Cargo build-script environment.
//!
//! Cargo exposes the compilation target to build scripts through
//! `CARGO_CFG_TARGET_*` variables. rustc always assembles with LLVM's
//! GNU-compatible parser, so detected profiles use [`AssemblerDialect::Gnu`].

use std::env;

use crate::arch::{Architecture, PointerWidth, SimdClass};
use crate::error::{Result, TargetError};
use crate::family::{AssemblerDialect, ObjectFamily};
use crate::profile::{default_symbol_prefix, TargetProfile};

/// The `cfg(target_*)` values a profile is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfgValues {
    pub arch: String,
    pub os: String,
    pub vendor: String,
    pub env: String,
    pub pointer_width: String,
    /// Enabled target features, e.g. `["fxsr", "sse", "sse2"]`.
    pub features: Vec<String>,
}

impl CfgValues {
    /// Read the `CARGO_CFG_TARGET_*` variables set by Cargo for build scripts.
    pub fn from_cargo_env() -> Result<Self> {
        Ok(Self {
            arch: required("CARGO_CFG_TARGET_ARCH")?,
            os: required("CARGO_CFG_TARGET_OS")?,
            vendor: env::var("CARGO_CFG_TARGET_VENDOR").unwrap_or_default(),
            env: env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default(),
            pointer_width: required("CARGO_CFG_TARGET_POINTER_WIDTH")?,
            features: env::var("CARGO_CFG_TARGET_FEATURE")
                .map(|v| split_features(&v))
                .unwrap_or_default(),
        })
    }
}

fn required(var: &str) -> Result<String> {
    env::var(var).map_err(|_| TargetError::MissingEnv { var: var.to_string() })
}

fn split_features(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}

const APPLE_OSES: &[&str] = &["macos", "ios", "tvos", "watchos", "visionos"];
const COFF_OSES: &[&str] = &["windows", "uefi", "cygwin"];
/// Operating systems whose Rust targets emit ELF objects. Anything else
/// (XCOFF on AIX, for one) is rejected rather than guessed.
const ELF_OSES: &[&str] = &[
    "linux", "android", "freebsd", "netbsd", "openbsd", "dragonfly", "illumos", "solaris",
    "fuchsia", "redox", "haiku", "hermit", "hurd", "l4re", "nto", "nuttx", "rtems", "vxworks",
    "espidf", "horizon", "psp", "vita", "solid_asp3", "teeos", "trusty", "xous", "zkvm", "none",
];

impl TargetProfile {
    /// Detect the profile of the crate currently being built.
    pub fn from_cargo_env() -> Result<Self> {
        Self::from_cfg(&CfgValues::from_cargo_env()?)
    }

    /// Derive a profile from `cfg(target_*)` values.
    pub fn from_cfg(cfg: &CfgValues) -> Result<Self> {
        let architecture = Architecture::parse(&cfg.arch)?;
        let bits: u32 = cfg.pointer_width.trim().parse().map_err(|_| TargetError::Validation {
            detail: format!("invalid target pointer width '{}'", cfg.pointer_width),
        })?;
        let pointer_width = PointerWidth::from_bits(bits).ok_or_else(|| TargetError::Validation {
            detail: format!("pointer width {bits} is not 16, 32, or 64"),
        })?;

        let os = cfg.os.as_str();
        let family = if architecture.is_wasm() {
            ObjectFamily::DeclarationOnly
        } else if cfg.vendor == "apple" || APPLE_OSES.contains(&os) {
            ObjectFamily::MachO
        } else if COFF_OSES.contains(&os) {
            ObjectFamily::Coff
        } else if ELF_OSES.contains(&os) {
            ObjectFamily::Elf
        } else {
            return Err(TargetError::UnsupportedFamily {
                name: format!("target_os = \"{os}\""),
            });
        };

        let simd = SimdClass::from_features(cfg.features.iter().map(String::as_str));
        let name = [cfg.arch.as_str(), cfg.vendor.as_str(), cfg.os.as_str(), cfg.env.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-");

        Ok(TargetProfile {
            name,
            architecture,
            pointer_width,
            simd,
            family,
            assembler: AssemblerDialect::Gnu,
            symbol_prefix: default_symbol_prefix(architecture, family).to_string(),
        })
    }
}

//! Complete target profile.
//!
//! Assembles architecture, pointer width, SIMD class, object family, and
//! assembler dialect into the read-only description consumed by the
//! alignment policy and the dialect table.

use serde::{Deserialize, Serialize};

use crate::alignment::{alignment_for, Alignment};
use crate::arch::{Architecture, PointerWidth, SimdClass};
use crate::family::{AssemblerDialect, ObjectFamily, RawInclude};

/// A target profile: everything the code generator needs to know about a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetProfile {
    /// Profile name (e.g., "linux-x86_64", "ghs-powerpc").
    pub name: String,
    /// CPU architecture.
    pub architecture: Architecture,
    /// Data pointer width.
    pub pointer_width: PointerWidth,
    /// SIMD capability class.
    #[serde(default)]
    pub simd: SimdClass,
    /// Object-format family.
    pub family: ObjectFamily,
    /// Assembler alignment dialect.
    #[serde(default)]
    pub assembler: AssemblerDialect,
    /// Prefix the C compiler puts in front of external symbol names.
    #[serde(default)]
    pub symbol_prefix: String,
}

impl TargetProfile {
    /// Compose a profile, deriving the pointer width from the architecture.
    pub fn compose(
        name: impl Into<String>,
        architecture: Architecture,
        simd: SimdClass,
        family: ObjectFamily,
        assembler: AssemblerDialect,
    ) -> Self {
        let symbol_prefix = default_symbol_prefix(architecture, family).to_string();
        Self {
            name: name.into(),
            architecture,
            pointer_width: architecture.natural_pointer_width(),
            simd,
            family,
            assembler,
            symbol_prefix,
        }
    }

    /// Alignment of the data symbol on this target.
    pub fn alignment(&self) -> Alignment {
        alignment_for(self)
    }

    /// Raw-include capability of the toolchain.
    pub fn raw_include(&self) -> RawInclude {
        self.family.raw_include()
    }

    /// Generic Linux x86-64 (SSE2 baseline).
    pub fn linux_x86_64() -> Self {
        Self::compose(
            "linux-x86_64",
            Architecture::X86_64,
            SimdClass::Narrow,
            ObjectFamily::Elf,
            AssemblerDialect::Gnu,
        )
    }

    /// Linux AArch64 (NEON baseline).
    pub fn linux_aarch64() -> Self {
        Self::compose(
            "linux-aarch64",
            Architecture::Aarch64,
            SimdClass::Narrow,
            ObjectFamily::Elf,
            AssemblerDialect::Gnu,
        )
    }

    /// Apple Silicon macOS.
    pub fn macos_aarch64() -> Self {
        Self::compose(
            "macos-aarch64",
            Architecture::Aarch64,
            SimdClass::Narrow,
            ObjectFamily::MachO,
            AssemblerDialect::Gnu,
        )
    }

    /// Cortex-M4F built with the GNU toolchain.
    pub fn thumbv7em_none_eabi() -> Self {
        Self::compose(
            "thumbv7em-none-eabi",
            Architecture::Arm,
            SimdClass::None,
            ObjectFamily::Elf,
            AssemblerDialect::Gnu,
        )
    }

    /// MSVC-style toolchain without inline raw include.
    pub fn windows_msvc_x86_64() -> Self {
        Self::compose(
            "windows-msvc-x86_64",
            Architecture::X86_64,
            SimdClass::Narrow,
            ObjectFamily::DeclarationOnly,
            AssemblerDialect::Generic,
        )
    }
}

/// The C-level symbol prefix conventionally used by a family/architecture pair.
pub fn default_symbol_prefix(architecture: Architecture, family: ObjectFamily) -> &'static str {
    match (family, architecture) {
        (ObjectFamily::MachO, _) => "_",
        (ObjectFamily::Coff, Architecture::X86) => "_",
        (ObjectFamily::DeclarationOnly, Architecture::X86) => "_",
        _ => "",
    }
}

/// Resolve a built-in profile by name.
pub fn resolve_profile(name: &str) -> Option<TargetProfile> {
    use AssemblerDialect::{ArmShift, Generic, Gnu};
    use Architecture as A;
    use ObjectFamily as F;
    use SimdClass::{Narrow, None as NoSimd, Wide};

    let profile = match name {
        "linux-x86_64" => TargetProfile::linux_x86_64(),
        "linux-x86_64-avx" => TargetProfile::compose(name, A::X86_64, Wide, F::Elf, Gnu),
        "linux-i686" => TargetProfile::compose(name, A::X86, Narrow, F::Elf, Gnu),
        "linux-aarch64" => TargetProfile::linux_aarch64(),
        "linux-armv7" => TargetProfile::compose(name, A::Arm, Narrow, F::Elf, Gnu),
        "linux-riscv64" => TargetProfile::compose(name, A::Riscv64, NoSimd, F::Elf, Gnu),
        "macos-x86_64" => TargetProfile::compose(name, A::X86_64, Narrow, F::MachO, Gnu),
        "macos-aarch64" => TargetProfile::macos_aarch64(),
        "windows-gnu-x86_64" => TargetProfile::compose(name, A::X86_64, Narrow, F::Coff, Gnu),
        "windows-gnu-i686" => TargetProfile::compose(name, A::X86, Narrow, F::Coff, Gnu),
        "windows-msvc-x86_64" => TargetProfile::windows_msvc_x86_64(),
        "thumbv7em-none-eabi" => TargetProfile::thumbv7em_none_eabi(),
        "arm-embedded-armasm" => {
            TargetProfile::compose(name, A::Arm, NoSimd, F::ArmEmbedded, ArmShift)
        }
        "ghs-powerpc" => TargetProfile::compose(name, A::Powerpc, NoSimd, F::GreenHills, Generic),
        "ghs-arm" => TargetProfile::compose(name, A::Arm, NoSimd, F::GreenHills, ArmShift),
        "wasm32" => TargetProfile::compose(name, A::Wasm32, NoSimd, F::DeclarationOnly, Generic),
        _ => return None,
    };
    Some(profile)
}

/// List all built-in profile names with a short description.
pub fn builtin_profiles() -> Vec<(&'static str, &'static str)> {
    vec![
        ("linux-x86_64", "ELF, GNU assembler, SSE2 (16-byte alignment)"),
        ("linux-x86_64-avx", "ELF, GNU assembler, AVX (32-byte alignment)"),
        ("linux-i686", "ELF, GNU assembler, 32-bit x86 with SSE"),
        ("linux-aarch64", "ELF, GNU assembler, NEON"),
        ("linux-armv7", "ELF, GNU assembler, 32-bit ARM with NEON"),
        ("linux-riscv64", "ELF, GNU assembler, no SIMD class"),
        ("macos-x86_64", "Mach-O, '_' symbol prefix"),
        ("macos-aarch64", "Mach-O, '_' symbol prefix, NEON"),
        ("windows-gnu-x86_64", "PE/COFF, GNU-compatible assembler"),
        ("windows-gnu-i686", "PE/COFF, GNU-compatible assembler, '_' symbol prefix"),
        ("windows-msvc-x86_64", "declaration-only (no inline raw include)"),
        ("thumbv7em-none-eabi", "ELF, GNU assembler, Cortex-M4F"),
        ("arm-embedded-armasm", "ARM-native assembler, shift-exponent .align"),
        ("ghs-powerpc", "Green Hills PowerPC, INCBIN directive"),
        ("ghs-arm", "Green Hills ARM, INCBIN directive, shift-exponent .align"),
        ("wasm32", "declaration-only (WebAssembly)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_profile() {
        let p = TargetProfile::linux_x86_64();
        assert_eq!(p.pointer_width.bytes(), 8);
        assert_eq!(p.symbol_prefix, "");
        assert_eq!(p.alignment().bytes(), 16);
        assert!(p.raw_include().is_supported());
    }

    #[test]
    fn macos_profile_has_underscore_prefix() {
        let p = TargetProfile::macos_aarch64();
        assert_eq!(p.symbol_prefix, "_");
        assert_eq!(p.family, ObjectFamily::MachO);
    }

    #[test]
    fn thumb_profile_uses_pointer_alignment() {
        let p = TargetProfile::thumbv7em_none_eabi();
        assert_eq!(p.pointer_width.bytes(), 4);
        assert_eq!(p.alignment().bytes(), 4);
    }

    #[test]
    fn msvc_is_declaration_only() {
        let p = TargetProfile::windows_msvc_x86_64();
        assert!(!p.raw_include().is_supported());
    }

    #[test]
    fn every_listed_builtin_resolves() {
        for (name, _) in builtin_profiles() {
            let p = resolve_profile(name).unwrap_or_else(|| panic!("{name} does not resolve"));
            assert_eq!(p.name, name);
        }
        assert!(resolve_profile("nonexistent").is_none());
    }

    #[test]
    fn coff_i686_prefix() {
        let p = resolve_profile("windows-gnu-i686").unwrap();
        assert_eq!(p.symbol_prefix, "_");
        let p = resolve_profile("windows-gnu-x86_64").unwrap();
        assert_eq!(p.symbol_prefix, "");
    }
}

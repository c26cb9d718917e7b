//! Object-format family and assembler dialect.
//!
//! These two axes, together with the architecture, pick the directive
//! spellings the code generator emits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// The object-format family (and toolchain flavour) of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFamily {
    /// ELF objects assembled by a GNU-compatible assembler (Linux, BSD, bare metal).
    Elf,
    /// Apple Mach-O objects.
    MachO,
    /// PE/COFF objects assembled by a GNU-compatible assembler (MinGW, LLVM).
    Coff,
    /// ARM toolchains with their own assembler (RealView, Diab, ImageCraft).
    ArmEmbedded,
    /// Green Hills toolchains.
    GreenHills,
    /// Toolchains with no inline raw-include facility; only declarations are emitted.
    DeclarationOnly,
}

impl ObjectFamily {
    /// Every known family, in declaration order.
    pub const ALL: [ObjectFamily; 6] = [
        ObjectFamily::Elf,
        ObjectFamily::MachO,
        ObjectFamily::Coff,
        ObjectFamily::ArmEmbedded,
        ObjectFamily::GreenHills,
        ObjectFamily::DeclarationOnly,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectFamily::Elf => "elf",
            ObjectFamily::MachO => "mach-o",
            ObjectFamily::Coff => "coff",
            ObjectFamily::ArmEmbedded => "arm-embedded",
            ObjectFamily::GreenHills => "green-hills",
            ObjectFamily::DeclarationOnly => "declaration-only",
        }
    }

    /// Whether the toolchain can place a file's bytes with a raw-include directive.
    pub fn raw_include(self) -> RawInclude {
        match self {
            ObjectFamily::DeclarationOnly => RawInclude::Unsupported,
            _ => RawInclude::Supported,
        }
    }

    /// Whether the object format has a symbol-type concept (`.type sym, @object`).
    pub fn has_symbol_types(self) -> bool {
        matches!(
            self,
            ObjectFamily::Elf | ObjectFamily::ArmEmbedded | ObjectFamily::GreenHills
        )
    }
}

impl fmt::Display for ObjectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectFamily {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ObjectFamily::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .or(match lower.as_str() {
                "macho" => Some(ObjectFamily::MachO),
                "pe" | "pe-coff" => Some(ObjectFamily::Coff),
                "ghs" => Some(ObjectFamily::GreenHills),
                _ => None,
            })
            .ok_or_else(|| TargetError::UnsupportedFamily { name: s.to_string() })
    }
}

/// Alignment-directive flavour of the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblerDialect {
    /// GNU-compatible (`gas`, LLVM integrated assembler): `.balign <bytes>`.
    #[default]
    Gnu,
    /// ARM-native assemblers: `.align <log2(bytes)>`.
    ArmShift,
    /// Other assemblers, which treat `.align` as a byte count.
    Generic,
}

impl AssemblerDialect {
    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            AssemblerDialect::Gnu => "gnu",
            AssemblerDialect::ArmShift => "arm-shift",
            AssemblerDialect::Generic => "generic",
        }
    }
}

impl fmt::Display for AssemblerDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssemblerDialect {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gnu" => Ok(AssemblerDialect::Gnu),
            "arm-shift" => Ok(AssemblerDialect::ArmShift),
            "generic" => Ok(AssemblerDialect::Generic),
            _ => Err(TargetError::Validation {
                detail: format!("unknown assembler dialect '{s}' (expected gnu, arm-shift, or generic)"),
            }),
        }
    }
}

/// Toolchain capability: can the assembler copy a file verbatim into the object?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawInclude {
    Supported,
    /// Definitions must come from an external provider.
    Unsupported,
}

impl RawInclude {
    pub fn is_supported(self) -> bool {
        self == RawInclude::Supported
    }
}

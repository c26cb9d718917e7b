//! Architecture model.
//!
//! Defines the CPU architectures a profile can name, their native pointer
//! width, and the SIMD capability class used by the alignment policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A target CPU architecture.
///
/// Spellings follow Rust's `target_arch` values. The set is closed: a name
/// outside it is rejected rather than mapped to a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    X86,
    X86_64,
    /// 32-bit ARM (A32/T32), including Thumb-only cores.
    Arm,
    Aarch64,
    Riscv32,
    Riscv64,
    Powerpc,
    Powerpc64,
    Mips,
    Mips64,
    Loongarch64,
    S390x,
    Sparc64,
    Wasm32,
    Wasm64,
}

impl Architecture {
    /// Every known architecture, in declaration order.
    pub const ALL: [Architecture; 15] = [
        Architecture::X86,
        Architecture::X86_64,
        Architecture::Arm,
        Architecture::Aarch64,
        Architecture::Riscv32,
        Architecture::Riscv64,
        Architecture::Powerpc,
        Architecture::Powerpc64,
        Architecture::Mips,
        Architecture::Mips64,
        Architecture::Loongarch64,
        Architecture::S390x,
        Architecture::Sparc64,
        Architecture::Wasm32,
        Architecture::Wasm64,
    ];

    /// Canonical name (Rust `target_arch` spelling).
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::Arm => "arm",
            Architecture::Aarch64 => "aarch64",
            Architecture::Riscv32 => "riscv32",
            Architecture::Riscv64 => "riscv64",
            Architecture::Powerpc => "powerpc",
            Architecture::Powerpc64 => "powerpc64",
            Architecture::Mips => "mips",
            Architecture::Mips64 => "mips64",
            Architecture::Loongarch64 => "loongarch64",
            Architecture::S390x => "s390x",
            Architecture::Sparc64 => "sparc64",
            Architecture::Wasm32 => "wasm32",
            Architecture::Wasm64 => "wasm64",
        }
    }

    /// Parse a `target_arch` value or the architecture field of a target triple.
    pub fn parse(name: &str) -> Result<Self, TargetError> {
        let lower = name.trim().to_ascii_lowercase();
        let arch = match lower.as_str() {
            "x86" | "i386" | "i486" | "i586" | "i686" => Architecture::X86,
            "x86_64" | "amd64" | "x64" => Architecture::X86_64,
            "aarch64" | "arm64" | "arm64e" => Architecture::Aarch64,
            "riscv32" => Architecture::Riscv32,
            "riscv64" => Architecture::Riscv64,
            "powerpc" | "ppc" => Architecture::Powerpc,
            "powerpc64" | "powerpc64le" | "ppc64" | "ppc64le" => Architecture::Powerpc64,
            "mips" | "mipsel" => Architecture::Mips,
            "mips64" | "mips64el" => Architecture::Mips64,
            "loongarch64" => Architecture::Loongarch64,
            "s390x" => Architecture::S390x,
            "sparc64" | "sparcv9" => Architecture::Sparc64,
            "wasm32" => Architecture::Wasm32,
            "wasm64" => Architecture::Wasm64,
            s if s == "arm" || s.starts_with("armv") || s.starts_with("thumb") => {
                Architecture::Arm
            }
            s if s.starts_with("riscv32") => Architecture::Riscv32,
            s if s.starts_with("riscv64") => Architecture::Riscv64,
            _ => {
                return Err(TargetError::UnsupportedArchitecture {
                    name: name.to_string(),
                })
            }
        };
        Ok(arch)
    }

    /// Native pointer width of the architecture.
    pub fn natural_pointer_width(self) -> PointerWidth {
        match self {
            Architecture::X86
            | Architecture::Arm
            | Architecture::Riscv32
            | Architecture::Powerpc
            | Architecture::Mips
            | Architecture::Wasm32 => PointerWidth::W32,
            Architecture::X86_64
            | Architecture::Aarch64
            | Architecture::Riscv64
            | Architecture::Powerpc64
            | Architecture::Mips64
            | Architecture::Loongarch64
            | Architecture::S390x
            | Architecture::Sparc64
            | Architecture::Wasm64 => PointerWidth::W64,
        }
    }

    /// 32-bit ARM, whose assemblers treat `@` as a comment character.
    pub fn is_arm32(self) -> bool {
        self == Architecture::Arm
    }

    /// WebAssembly targets.
    pub fn is_wasm(self) -> bool {
        matches!(self, Architecture::Wasm32 | Architecture::Wasm64)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Width of a data pointer on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PointerWidth {
    W16,
    W32,
    W64,
}

impl PointerWidth {
    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            PointerWidth::W16 => 16,
            PointerWidth::W32 => 32,
            PointerWidth::W64 => 64,
        }
    }

    /// Width in bytes; also the natural pointer alignment.
    pub fn bytes(self) -> u32 {
        self.bits() / 8
    }

    /// Build from a bit count (`CARGO_CFG_TARGET_POINTER_WIDTH`).
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(PointerWidth::W16),
            32 => Some(PointerWidth::W32),
            64 => Some(PointerWidth::W64),
            _ => None,
        }
    }
}

impl TryFrom<u32> for PointerWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("pointer width {bits} is not 16, 32, or 64"))
    }
}

impl From<PointerWidth> for u32 {
    fn from(width: PointerWidth) -> Self {
        width.bits()
    }
}

/// SIMD capability class of the target CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimdClass {
    /// No vector unit the alignment policy cares about.
    #[default]
    None,
    /// 128-bit vectors (SSE, NEON, AltiVec, wasm simd128).
    Narrow,
    /// 256-bit vectors (AVX).
    Wide,
}

const WIDE_FEATURES: &[&str] = &["avx", "avx2", "avx512f"];
const NARROW_FEATURES: &[&str] = &["sse", "sse2", "neon", "altivec", "simd128"];

impl SimdClass {
    /// Classify a list of enabled target features (`CARGO_CFG_TARGET_FEATURE`).
    ///
    /// A wide feature wins over a narrow one, since AVX targets also report SSE.
    pub fn from_features<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut class = SimdClass::None;
        for feature in features {
            let feature = feature.trim();
            if WIDE_FEATURES.contains(&feature) {
                return SimdClass::Wide;
            }
            if NARROW_FEATURES.contains(&feature) {
                class = SimdClass::Narrow;
            }
        }
        class
    }

    /// Vector register width in bytes, if any.
    pub fn vector_bytes(self) -> Option<u32> {
        match self {
            SimdClass::None => None,
            SimdClass::Narrow => Some(16),
            SimdClass::Wide => Some(32),
        }
    }
}

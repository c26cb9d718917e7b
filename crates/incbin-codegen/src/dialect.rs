//! Target dialect table.
//!
//! Maps a [`TargetProfile`] to the assembler spellings the contract generator
//! splices together. The mapping is explicit and total over coherent
//! profiles: an incoherent profile is an error, never a default.

use serde::Serialize;

use incbin_targets::{Alignment, AssemblerDialect, ObjectFamily, TargetProfile};

use crate::error::{CodegenError, Result};

/// How the assembler spells an alignment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignDirective {
    /// `.balign <bytes>`
    ByteCount,
    /// `.align <log2(bytes)>`
    ShiftExponent,
    /// `.align <bytes>`
    GenericBytes,
}

impl AlignDirective {
    pub fn for_assembler(assembler: AssemblerDialect) -> Self {
        match assembler {
            AssemblerDialect::Gnu => AlignDirective::ByteCount,
            AssemblerDialect::ArmShift => AlignDirective::ShiftExponent,
            AssemblerDialect::Generic => AlignDirective::GenericBytes,
        }
    }

    pub fn render(self, alignment: Alignment) -> String {
        match self {
            AlignDirective::ByteCount => format!(".balign {}", alignment.bytes()),
            AlignDirective::ShiftExponent => format!(".align {}", alignment.log2()),
            AlignDirective::GenericBytes => format!(".align {}", alignment.bytes()),
        }
    }
}

/// Assembler fragments for one target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectFragmentSet {
    /// Switches into the read-only output section.
    pub section_enter: String,
    /// Restores the previous section.
    pub section_exit: String,
    /// `.global` or `.globl`.
    pub global_directive: &'static str,
    /// Symbol-type marker for `.type sym, <marker>`; `None` where the format has no symbol types.
    pub type_marker: Option<&'static str>,
    pub align: AlignDirective,
    /// `.incbin` or `INCBIN`.
    pub raw_include: &'static str,
    /// 32-bit integer directive holding the size.
    pub int_directive: &'static str,
    pub byte_directive: &'static str,
    /// Prefix the C compiler adds to external names.
    pub mangling_prefix: String,
}

impl DialectFragmentSet {
    /// Place the data in `section` instead of the family's read-only section.
    pub fn with_section(mut self, section: &str, family: ObjectFamily) -> Self {
        let (enter, exit) = match family {
            ObjectFamily::Elf => (format!(".pushsection {section}, \"a\""), ".popsection".to_string()),
            ObjectFamily::Coff => (format!(".section {section},\"dr\""), ".text".to_string()),
            _ => (format!(".section {section}"), ".text".to_string()),
        };
        self.section_enter = enter;
        self.section_exit = exit;
        self
    }

    pub fn global_line(&self, symbol: &str) -> String {
        format!("{} {symbol}", self.global_directive)
    }

    pub fn type_line(&self, symbol: &str) -> Option<String> {
        self.type_marker.map(|marker| format!(".type {symbol}, {marker}"))
    }

    pub fn align_line(&self, alignment: Alignment) -> String {
        self.align.render(alignment)
    }

    /// The `path` argument must already be escaped for an assembler string.
    pub fn include_line(&self, path: &str) -> String {
        format!("{} \"{path}\"", self.raw_include)
    }
}

/// Resolve the dialect fragments for a profile.
pub fn resolve_dialect(profile: &TargetProfile) -> Result<DialectFragmentSet> {
    let unsupported = |detail: String| CodegenError::UnsupportedDialect {
        profile: profile.name.clone(),
        detail,
    };

    if !profile.raw_include().is_supported() {
        return Err(CodegenError::NoInlineAssembly {
            profile: profile.name.clone(),
        });
    }
    if profile.architecture.is_wasm() {
        return Err(unsupported(format!(
            "{} has no object family with raw include; use 'declaration-only'",
            profile.architecture
        )));
    }
    if profile.assembler == AssemblerDialect::ArmShift && !profile.architecture.is_arm32() {
        return Err(unsupported(format!(
            "shift-exponent alignment is only spoken by ARM assemblers, not {}",
            profile.architecture
        )));
    }

    let (section_enter, section_exit) = match (profile.family, profile.assembler) {
        (ObjectFamily::Elf, _) => (".pushsection .rodata, \"a\"", ".popsection"),
        (ObjectFamily::MachO, AssemblerDialect::Gnu) => (".const_data", ".text"),
        (ObjectFamily::Coff, AssemblerDialect::Gnu) => (".section .rdata,\"dr\"", ".text"),
        (ObjectFamily::ArmEmbedded, _) if profile.architecture.is_arm32() => {
            (".section .rodata", ".text")
        }
        (ObjectFamily::GreenHills, _) => (".section .rodata", ".text"),
        (family, assembler) => {
            return Err(unsupported(format!(
                "family '{family}' cannot be used with assembler '{assembler}' on {}",
                profile.architecture
            )))
        }
    };

    let type_marker = if !profile.family.has_symbol_types() {
        None
    } else if profile.architecture.is_arm32() {
        // '@' starts a comment in ARM assembly.
        Some("%object")
    } else {
        Some("@object")
    };

    let mach_o = profile.family == ObjectFamily::MachO;

    Ok(DialectFragmentSet {
        section_enter: section_enter.to_string(),
        section_exit: section_exit.to_string(),
        global_directive: if mach_o { ".globl" } else { ".global" },
        type_marker,
        align: AlignDirective::for_assembler(profile.assembler),
        raw_include: if profile.family == ObjectFamily::GreenHills {
            "INCBIN"
        } else {
            ".incbin"
        },
        int_directive: if mach_o { ".long" } else { ".int" },
        byte_directive: ".byte",
        mangling_prefix: profile.symbol_prefix.clone(),
    })
}

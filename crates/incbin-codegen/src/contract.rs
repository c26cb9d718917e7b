//! Symbol contract generator.
//!
//! One assembler block per resource defines three symbols:
//!
//! ```text
//! Data:  aligned, followed by the raw-included bytes (and a NUL for text)
//! End:   1-byte aligned, holds one placeholder byte
//! Size:  aligned 32-bit integer, End - Data
//! ```
//!
//! The assembler computes `Size` from the two labels, so `Size == End - Data`
//! holds by construction on every dialect, including for empty files.

use incbin_targets::Alignment;

use crate::dialect::DialectFragmentSet;
use crate::naming::SymbolNames;
use crate::resource::{PayloadKind, ResourceDescriptor};

/// Escape a path for use inside a double-quoted assembler string.
pub fn escape_asm_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// The assembler lines defining one resource.
///
/// `names` are the source-level names; the dialect's mangling prefix is
/// applied to every label and to both operands of the size expression.
/// `path` is the file as the assembler should see it, unescaped.
pub fn assembly_block(
    resource: &ResourceDescriptor,
    names: &SymbolNames,
    dialect: &DialectFragmentSet,
    alignment: Alignment,
    path: &str,
) -> Vec<String> {
    let sym = names.mangled(&dialect.mangling_prefix);
    let mut lines = Vec::with_capacity(20);

    lines.push(dialect.section_enter.clone());

    // Data
    lines.push(dialect.global_line(&sym.data));
    lines.extend(dialect.type_line(&sym.data));
    lines.push(dialect.align_line(alignment));
    lines.push(format!("{}:", sym.data));
    lines.push(dialect.include_line(&escape_asm_path(path)));
    if resource.kind == PayloadKind::Text {
        lines.push(format!("{} 0", dialect.byte_directive));
    }

    // End
    lines.push(dialect.global_line(&sym.end));
    lines.extend(dialect.type_line(&sym.end));
    lines.push(dialect.align_line(Alignment::BYTE));
    lines.push(format!("{}:", sym.end));
    lines.push(format!("{} 1", dialect.byte_directive));

    // Size
    lines.push(dialect.global_line(&sym.size));
    lines.extend(dialect.type_line(&sym.size));
    lines.push(dialect.align_line(alignment));
    lines.push(format!("{}:", sym.size));
    lines.push(format!("{} {} - {}", dialect.int_directive, sym.end, sym.data));

    lines.push(dialect.section_exit.clone());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::resolve_dialect;
    use crate::naming::SymbolNaming;
    use incbin_targets::resolve_profile;

    fn block(profile: &str, resource: &ResourceDescriptor) -> Vec<String> {
        let profile = resolve_profile(profile).unwrap();
        let dialect = resolve_dialect(&profile).unwrap();
        let names = SymbolNaming::default().names(&resource.name);
        assembly_block(resource, &names, &dialect, profile.alignment(), "data/lorem.txt")
    }

    #[test]
    fn elf_block() {
        let lines = block("linux-x86_64", &ResourceDescriptor::new("Lorem", "lorem.txt"));
        let expected = [
            ".pushsection .rodata, \"a\"",
            ".global gLoremData",
            ".type gLoremData, @object",
            ".balign 16",
            "gLoremData:",
            ".incbin \"data/lorem.txt\"",
            ".global gLoremEnd",
            ".type gLoremEnd, @object",
            ".balign 1",
            "gLoremEnd:",
            ".byte 1",
            ".global gLoremSize",
            ".type gLoremSize, @object",
            ".balign 16",
            "gLoremSize:",
            ".int gLoremEnd - gLoremData",
            ".popsection",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn mach_o_block_is_mangled() {
        let lines = block("macos-aarch64", &ResourceDescriptor::new("Lorem", "lorem.txt"));
        assert_eq!(lines[0], ".const_data");
        assert!(lines.contains(&".globl _gLoremData".to_string()));
        assert!(lines.contains(&"_gLoremEnd:".to_string()));
        assert!(lines.contains(&".long _gLoremEnd - _gLoremData".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with(".type")));
        assert_eq!(lines.last().unwrap(), ".text");
    }

    #[test]
    fn text_payload_appends_nul_before_end() {
        let lines = block("linux-x86_64", &ResourceDescriptor::text("TLorem", "lorem.txt"));
        let include = lines.iter().position(|l| l.starts_with(".incbin")).unwrap();
        assert_eq!(lines[include + 1], ".byte 0");
        assert_eq!(lines[include + 2], ".global gTLoremEnd");
    }

    #[test]
    fn green_hills_arm_block() {
        let lines = block("ghs-arm", &ResourceDescriptor::new("Icon", "icon.png"));
        assert!(lines.contains(&"INCBIN \"data/lorem.txt\"".to_string()));
        assert!(lines.contains(&".type gIconData, %object".to_string()));
        assert!(lines.contains(&".align 2".to_string()));
        assert!(lines.contains(&".align 0".to_string()));
    }

    #[test]
    fn paths_are_escaped() {
        assert_eq!(escape_asm_path(r"C:\assets\a.bin"), r"C:\\assets\\a.bin");
        assert_eq!(escape_asm_path("odd\"name"), "odd\\\"name");
        assert_eq!(escape_asm_path("plain/path.bin"), "plain/path.bin");
    }
}

//! Rust output: `global_asm!` definitions, `extern` declarations, accessors.
//!
//! rustc adds the platform's C symbol prefix to `extern` statics itself, so
//! declarations always use the unmangled names while the assembler block
//! carries the mangled ones.

use incbin_targets::Alignment;

use crate::naming::{accessor_name, SymbolNames};
use crate::resource::{ElementType, PayloadKind, ResourceDescriptor};

/// Escape text for a Rust string literal.
pub fn escape_rust_string(text: &str) -> String {
    text.escape_debug().to_string()
}

/// A `global_asm!` invocation carrying the assembler block, one template string per line.
///
/// `options(raw)` keeps `{` and `}` in paths from being read as operands.
pub fn rust_global_asm(lines: &[String], att_syntax: bool) -> String {
    let mut out = String::from("::core::arch::global_asm!(\n");
    for line in lines {
        out.push_str(&format!("    \"{}\",\n", escape_rust_string(line)));
    }
    let options = if att_syntax { "raw, att_syntax" } else { "raw" };
    out.push_str(&format!("    options({options})\n);\n"));
    out
}

pub fn rust_extern_block(names: &SymbolNames, element: ElementType) -> String {
    let ty = element.rust_type();
    format!(
        "#[allow(non_upper_case_globals)]\n\
         unsafe extern \"C\" {{\n    \
             pub static {data}: [{ty}; 0];\n    \
             pub static {end}: {ty};\n    \
             pub static {size}: u32;\n\
         }}\n",
        data = names.data,
        end = names.end,
        size = names.size,
    )
}

/// A safe `fn` returning `::incbin::Embedded` for the resource.
pub fn rust_accessor(resource: &ResourceDescriptor, names: &SymbolNames, alignment: Alignment) -> String {
    let source = escape_rust_string(&resource.source_path.to_string_lossy());
    format!(
        "/// `{name}`, embedded from \"{source}\".\n\
         #[allow(dead_code)]\n\
         pub fn {func}() -> ::incbin::Embedded {{\n    \
             // SAFETY: the three symbols are defined together by one assembler block.\n    \
             unsafe {{\n        \
                 ::incbin::Embedded::from_symbols(\n            \
                     ::core::ptr::addr_of!({data}).cast::<u8>(),\n            \
                     ::core::ptr::addr_of!({end}).cast::<u8>(),\n            \
                     {size},\n            \
                     {align},\n        \
                 ){terminated}\n    \
             }}\n\
         }}\n",
        name = resource.name,
        func = accessor_name(&resource.name),
        data = names.data,
        end = names.end,
        size = names.size,
        align = alignment.bytes(),
        terminated = match resource.kind {
            PayloadKind::Text => "\n        .nul_terminated()",
            PayloadKind::Binary => "",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SymbolNaming;

    #[test]
    fn extern_block_for_bytes() {
        let names = SymbolNaming::default().names("Lorem");
        let text = rust_extern_block(&names, ElementType::Byte);
        assert_eq!(
            text,
            "#[allow(non_upper_case_globals)]\n\
             unsafe extern \"C\" {\n    \
             pub static gLoremData: [u8; 0];\n    \
             pub static gLoremEnd: u8;\n    \
             pub static gLoremSize: u32;\n\
             }\n"
        );
    }

    #[test]
    fn extern_block_for_chars() {
        let names = SymbolNaming::default().names("TLorem");
        let text = rust_extern_block(&names, ElementType::Char);
        assert!(text.contains("pub static gTLoremData: [::core::ffi::c_char; 0];"));
        assert!(text.contains("pub static gTLoremEnd: ::core::ffi::c_char;"));
    }

    #[test]
    fn global_asm_is_one_string_per_line() {
        let lines = vec![".incbin \"C:\\\\x\\\\a.bin\"".to_string(), "gAEnd:".to_string()];
        let text = rust_global_asm(&lines, false);
        assert_eq!(
            text,
            "::core::arch::global_asm!(\n    \
             \".incbin \\\"C:\\\\\\\\x\\\\\\\\a.bin\\\"\",\n    \
             \"gAEnd:\",\n    \
             options(raw)\n);\n"
        );
    }

    #[test]
    fn accessor_uses_snake_case_name() {
        let resource = ResourceDescriptor::text("TLorem", "data/loremipsum.txt");
        let names = SymbolNaming::default().names("TLorem");
        let text = rust_accessor(&resource, &names, Alignment::new(16).unwrap());
        assert!(text.contains("pub fn t_lorem() -> ::incbin::Embedded {"));
        assert!(text.contains("::core::ptr::addr_of!(gTLoremData).cast::<u8>()"));
        assert!(text.contains("gTLoremSize,\n"));
        assert!(text.contains("16,\n"));
        assert!(text.contains(")\n        .nul_terminated()\n"));

        let binary = ResourceDescriptor::new("Lorem", "data/loremipsum.txt");
        let names = SymbolNaming::default().names("Lorem");
        assert!(!rust_accessor(&binary, &names, Alignment::new(16).unwrap()).contains("nul_terminated"));
    }
}

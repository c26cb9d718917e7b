//! C and C++ output.

use incbin_targets::Alignment;

use crate::naming::SymbolNames;
use crate::resource::ElementType;

pub const DEFAULT_GUARD: &str = "INCBIN_GENERATED_H";

/// Escape text for a C string literal.
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// The three `extern` declarations.
///
/// Declaration-only toolchains get `__declspec(align(N))`; everything else
/// understands the GNU attribute.
pub fn c_declarations(
    names: &SymbolNames,
    element: ElementType,
    alignment: Alignment,
    declaration_only: bool,
) -> String {
    let ty = element.c_type();
    let n = alignment.bytes();
    let data = if declaration_only {
        format!("extern const __declspec(align({n})) {ty} {}[];", names.data)
    } else {
        format!("extern const {ty} {}[] __attribute__((aligned({n})));", names.data)
    };
    format!(
        "{data}\nextern const {ty} *{};\nextern const unsigned int {};\n",
        names.end, names.size
    )
}

/// A file-scope `__asm__` statement carrying the assembler block.
pub fn c_definition(lines: &[String]) -> String {
    let mut out = String::from("__asm__(\n");
    for line in lines {
        out.push_str(&format!("    \"{}\\n\"\n", escape_c_string(line)));
    }
    out.push_str(");\n");
    out
}

pub fn header_open(guard: &str) -> String {
    format!(
        "#ifndef {guard}\n#define {guard}\n\n#ifdef __cplusplus\nextern \"C\" {{\n#endif\n"
    )
}

pub fn header_close(guard: &str) -> String {
    format!("#ifdef __cplusplus\n}}\n#endif\n\n#endif /* {guard} */\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SymbolNaming;

    #[test]
    fn gnu_declarations() {
        let names = SymbolNaming::default().names("Lorem");
        let text = c_declarations(&names, ElementType::Byte, Alignment::new(16).unwrap(), false);
        assert_eq!(
            text,
            "extern const unsigned char gLoremData[] __attribute__((aligned(16)));\n\
             extern const unsigned char *gLoremEnd;\n\
             extern const unsigned int gLoremSize;\n"
        );
    }

    #[test]
    fn declspec_declarations_with_char() {
        let names = SymbolNaming::default().names("TLorem");
        let text = c_declarations(&names, ElementType::Char, Alignment::new(8).unwrap(), true);
        assert!(text.starts_with("extern const __declspec(align(8)) char gTLoremData[];"));
        assert!(text.contains("extern const char *gTLoremEnd;"));
    }

    #[test]
    fn definition_escapes_quotes() {
        let lines = vec![".incbin \"a\\\\b.bin\"".to_string(), "gXEnd:".to_string()];
        let text = c_definition(&lines);
        assert_eq!(
            text,
            "__asm__(\n    \".incbin \\\"a\\\\\\\\b.bin\\\"\\n\"\n    \"gXEnd:\\n\"\n);\n"
        );
    }

    #[test]
    fn header_guards() {
        let open = header_open("MY_H");
        assert!(open.starts_with("#ifndef MY_H\n#define MY_H\n"));
        assert!(header_close("MY_H").ends_with("#endif /* MY_H */\n"));
    }
}

//! Emission: resource + profile → assembler, C, or Rust text.
//!
//! [`generate`] produces the per-resource pieces; [`render`] stitches a list
//! of them into a complete file with a `@generated` preamble.
//!
//! On declaration-only targets only declarations are produced. Their
//! definitions must come from a [`DefinitionProvider`](crate::DefinitionProvider)
//! or another out-of-band mechanism, otherwise the link fails with
//! unresolved symbols.

pub mod c;
pub mod rust;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use incbin_targets::{Architecture, TargetProfile};

use crate::contract::assembly_block;
use crate::dialect::{resolve_dialect, DialectFragmentSet};
use crate::error::{CodegenError, Result};
use crate::naming::{SymbolNames, SymbolNaming};
use crate::resource::ResourceDescriptor;

/// What kind of text to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmitLanguage {
    /// A standalone assembler source file.
    Asm,
    /// A C source file with file-scope `__asm__` blocks plus declarations.
    C,
    /// A C header with declarations only.
    CHeader,
    /// Rust `global_asm!` definitions plus `extern` declarations.
    Rust,
    /// Rust `extern` declarations only.
    RustExtern,
}

impl EmitLanguage {
    pub const ALL: [EmitLanguage; 5] = [
        EmitLanguage::Asm,
        EmitLanguage::C,
        EmitLanguage::CHeader,
        EmitLanguage::Rust,
        EmitLanguage::RustExtern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmitLanguage::Asm => "asm",
            EmitLanguage::C => "c",
            EmitLanguage::CHeader => "c-header",
            EmitLanguage::Rust => "rust",
            EmitLanguage::RustExtern => "rust-extern",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            EmitLanguage::Asm => "S",
            EmitLanguage::C => "c",
            EmitLanguage::CHeader => "h",
            EmitLanguage::Rust | EmitLanguage::RustExtern => "rs",
        }
    }

    /// Whether this language carries definitions (when the target allows them).
    pub fn defines(self) -> bool {
        matches!(self, EmitLanguage::Asm | EmitLanguage::C | EmitLanguage::Rust)
    }
}

impl fmt::Display for EmitLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmitLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EmitLanguage::ALL
            .into_iter()
            .find(|l| l.as_str() == lower)
            .or(match lower.as_str() {
                "s" | "assembly" => Some(EmitLanguage::Asm),
                "h" | "header" => Some(EmitLanguage::CHeader),
                "rs" => Some(EmitLanguage::Rust),
                _ => None,
            })
            .ok_or_else(|| {
                format!("unknown language '{s}' (expected asm, c, c-header, rust, or rust-extern)")
            })
    }
}

/// Knobs shared by every resource in one emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Output section replacing the family's read-only section.
    pub section: Option<String>,
    /// Emit a safe accessor `fn` per resource in Rust output.
    pub accessors: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            section: None,
            accessors: true,
        }
    }
}

/// Generated text for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedResource {
    pub names: SymbolNames,
    /// `None` when the language only declares, or the target cannot define.
    pub definitions: Option<String>,
    /// Empty for assembler output.
    pub declarations: String,
}

/// Resolve the dialect, or `None` on declaration-only targets.
pub fn dialect_or_fallback(
    profile: &TargetProfile,
    section: Option<&str>,
) -> Result<Option<DialectFragmentSet>> {
    match resolve_dialect(profile) {
        Ok(dialect) => Ok(Some(match section {
            Some(section) => dialect.with_section(section, profile.family),
            None => dialect,
        })),
        Err(CodegenError::NoInlineAssembly { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Generate the text for one resource.
pub fn generate(
    resource: &ResourceDescriptor,
    naming: &SymbolNaming,
    profile: &TargetProfile,
    language: EmitLanguage,
    options: &EmitOptions,
) -> Result<EmittedResource> {
    resource.validate()?;
    naming.validate()?;

    let names = naming.names(&resource.name);
    let alignment = profile.alignment();
    let dialect = dialect_or_fallback(profile, options.section.as_deref())?;

    let block = || {
        dialect.as_ref().map(|d| {
            let path = resource.source_path.to_string_lossy();
            assembly_block(resource, &names, d, alignment, &path)
        })
    };
    let fallback = dialect.is_none();

    let emitted = match language {
        EmitLanguage::Asm => {
            let lines = block().ok_or_else(|| CodegenError::NoInlineAssembly {
                profile: profile.name.clone(),
            })?;
            let mut text = lines.join("\n");
            text.push('\n');
            EmittedResource {
                definitions: Some(text),
                declarations: String::new(),
                names,
            }
        }
        EmitLanguage::C | EmitLanguage::CHeader => {
            let definitions = match language {
                EmitLanguage::C => block().map(|lines| c::c_definition(&lines)),
                _ => None,
            };
            EmittedResource {
                declarations: c::c_declarations(&names, resource.element, alignment, fallback),
                definitions,
                names,
            }
        }
        EmitLanguage::Rust | EmitLanguage::RustExtern => {
            let definitions = match language {
                EmitLanguage::Rust => block().map(|lines| {
                    let att = matches!(profile.architecture, Architecture::X86 | Architecture::X86_64);
                    rust::rust_global_asm(&lines, att)
                }),
                _ => None,
            };
            let mut declarations = rust::rust_extern_block(&names, resource.element);
            if options.accessors {
                declarations.push('\n');
                declarations.push_str(&rust::rust_accessor(resource, &names, alignment));
            }
            EmittedResource {
                definitions,
                declarations,
                names,
            }
        }
    };
    Ok(emitted)
}

/// Assemble a complete file from generated resources.
pub fn render(language: EmitLanguage, profile: &TargetProfile, resources: &[EmittedResource]) -> String {
    let mut out = String::new();
    let banner = format!(
        "@generated by incbin for target '{}' ({}). Do not edit.",
        profile.name, profile.family
    );

    match language {
        EmitLanguage::Asm | EmitLanguage::C => {
            out.push_str(&format!("/* {banner} */\n"));
        }
        EmitLanguage::CHeader => {
            out.push_str(&format!("/* {banner} */\n"));
            out.push_str(&c::header_open(c::DEFAULT_GUARD));
        }
        EmitLanguage::Rust | EmitLanguage::RustExtern => {
            out.push_str(&format!("// {banner}\n"));
        }
    }

    for resource in resources {
        out.push('\n');
        if let Some(definitions) = &resource.definitions {
            out.push_str(definitions);
            if !resource.declarations.is_empty() {
                out.push('\n');
            }
        }
        out.push_str(&resource.declarations);
    }

    if language == EmitLanguage::CHeader {
        out.push('\n');
        out.push_str(&c::header_close(c::DEFAULT_GUARD));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use incbin_targets::resolve_profile;

    fn lorem() -> ResourceDescriptor {
        ResourceDescriptor::new("Lorem", "data/loremipsum.txt")
    }

    #[test]
    fn language_parses() {
        assert_eq!("c-header".parse::<EmitLanguage>().unwrap(), EmitLanguage::CHeader);
        assert_eq!("RS".parse::<EmitLanguage>().unwrap(), EmitLanguage::Rust);
        assert!("cobol".parse::<EmitLanguage>().is_err());
    }

    #[test]
    fn rust_on_elf_defines_and_declares() {
        let out = generate(
            &lorem(),
            &SymbolNaming::default(),
            &resolve_profile("linux-x86_64").unwrap(),
            EmitLanguage::Rust,
            &EmitOptions::default(),
        )
        .unwrap();
        let defs = out.definitions.unwrap();
        assert!(defs.starts_with("::core::arch::global_asm!("));
        assert!(defs.contains("options(raw, att_syntax)"));
        assert!(out.declarations.contains("pub static gLoremSize: u32;"));
        assert!(out.declarations.contains("pub fn lorem() -> ::incbin::Embedded"));
    }

    #[test]
    fn rust_on_aarch64_has_no_att_syntax() {
        let out = generate(
            &lorem(),
            &SymbolNaming::default(),
            &resolve_profile("linux-aarch64").unwrap(),
            EmitLanguage::Rust,
            &EmitOptions { section: None, accessors: false },
        )
        .unwrap();
        assert!(out.definitions.unwrap().contains("options(raw)"));
        assert!(!out.declarations.contains("fn lorem"));
    }

    #[test]
    fn fallback_emits_declarations_only() {
        let profile = resolve_profile("windows-msvc-x86_64").unwrap();
        for language in [EmitLanguage::C, EmitLanguage::CHeader, EmitLanguage::Rust] {
            let out = generate(&lorem(), &SymbolNaming::default(), &profile, language, &EmitOptions::default())
                .unwrap();
            assert!(out.definitions.is_none(), "{language}");
            assert!(out.declarations.contains("gLoremData"), "{language}");
        }
        let c = generate(&lorem(), &SymbolNaming::default(), &profile, EmitLanguage::C, &EmitOptions::default())
            .unwrap();
        assert!(c.declarations.contains("__declspec(align(16))"));
    }

    #[test]
    fn asm_on_fallback_is_an_error() {
        let err = generate(
            &lorem(),
            &SymbolNaming::default(),
            &resolve_profile("wasm32").unwrap(),
            EmitLanguage::Asm,
            &EmitOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::NoInlineAssembly { .. }));
    }

    #[test]
    fn section_override_reaches_output() {
        let out = generate(
            &lorem(),
            &SymbolNaming::default(),
            &resolve_profile("linux-x86_64").unwrap(),
            EmitLanguage::Asm,
            &EmitOptions { section: Some(".blobs".into()), accessors: true },
        )
        .unwrap();
        assert!(out.definitions.unwrap().starts_with(".pushsection .blobs, \"a\"\n"));
    }

    #[test]
    fn invalid_names_never_reach_output() {
        let bad = ResourceDescriptor::new("no-dashes", "x.bin");
        let profile = resolve_profile("linux-x86_64").unwrap();
        assert!(generate(&bad, &SymbolNaming::default(), &profile, EmitLanguage::C, &EmitOptions::default())
            .is_err());
        let naming = SymbolNaming::new(Some("9lives".into()), Default::default());
        assert!(generate(&lorem(), &naming, &profile, EmitLanguage::C, &EmitOptions::default()).is_err());
    }

    #[test]
    fn render_header_wraps_declarations() {
        let profile = resolve_profile("linux-x86_64").unwrap();
        let items: Vec<_> = ["Lorem", "Onebyte"]
            .iter()
            .map(|name| {
                generate(
                    &ResourceDescriptor::new(*name, "f.bin"),
                    &SymbolNaming::default(),
                    &profile,
                    EmitLanguage::CHeader,
                    &EmitOptions::default(),
                )
                .unwrap()
            })
            .collect();
        let text = render(EmitLanguage::CHeader, &profile, &items);
        assert!(text.starts_with("/* @generated by incbin for target 'linux-x86_64' (elf)"));
        assert!(text.contains("#ifndef INCBIN_GENERATED_H"));
        assert!(text.contains("extern \"C\" {"));
        assert!(text.contains("gOnebyteSize"));
        assert!(text.trim_end().ends_with("#endif /* INCBIN_GENERATED_H */"));
    }

    #[test]
    fn render_asm_concatenates_blocks() {
        let profile = resolve_profile("linux-aarch64").unwrap();
        let items: Vec<_> = ["A", "B"]
            .iter()
            .map(|name| {
                generate(
                    &ResourceDescriptor::new(*name, "f.bin"),
                    &SymbolNaming::default(),
                    &profile,
                    EmitLanguage::Asm,
                    &EmitOptions::default(),
                )
                .unwrap()
            })
            .collect();
        let text = render(EmitLanguage::Asm, &profile, &items);
        assert_eq!(text.matches(".pushsection").count(), 2);
        assert!(text.contains(".int gBEnd - gBData"));
    }
}

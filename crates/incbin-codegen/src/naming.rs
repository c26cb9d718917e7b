//! Symbol naming: `g{Name}Data`, `g{Name}End`, `g{Name}Size`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// Spelling of the three suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStyle {
    /// `gFooData`, `gFooEnd`, `gFooSize`.
    #[default]
    Camel,
    /// `gFoo_data`, `gFoo_end`, `gFoo_size`.
    Snake,
}

impl NamingStyle {
    fn suffixes(self) -> [&'static str; 3] {
        match self {
            NamingStyle::Camel => ["Data", "End", "Size"],
            NamingStyle::Snake => ["_data", "_end", "_size"],
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NamingStyle::Camel => "camel",
            NamingStyle::Snake => "snake",
        })
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camel" => Ok(NamingStyle::Camel),
            "snake" => Ok(NamingStyle::Snake),
            other => Err(format!("unknown naming style '{other}' (expected camel or snake)")),
        }
    }
}

/// How resource names become symbol names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolNaming {
    /// Caller prefix composed before the `g` marker.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub style: NamingStyle,
}

impl SymbolNaming {
    pub fn new(prefix: Option<String>, style: NamingStyle) -> Self {
        Self { prefix, style }
    }

    /// Reject prefixes that are not C identifiers.
    pub fn validate(&self) -> Result<()> {
        let Some(prefix) = &self.prefix else {
            return Ok(());
        };
        let mut chars = prefix.chars();
        let head_ok = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(CodegenError::InvalidPrefix { prefix: prefix.clone() })
        }
    }

    /// The three source-level symbol names for a resource.
    pub fn names(&self, resource: &str) -> SymbolNames {
        let prefix = self.prefix.as_deref().unwrap_or("");
        let [data, end, size] = self.style.suffixes();
        SymbolNames {
            data: format!("{prefix}g{resource}{data}"),
            end: format!("{prefix}g{resource}{end}"),
            size: format!("{prefix}g{resource}{size}"),
        }
    }
}

/// The three source-level names of one embedded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolNames {
    pub data: String,
    pub end: String,
    pub size: String,
}

impl SymbolNames {
    /// Names as the assembler must spell them, with the C mangling prefix applied.
    pub fn mangled(&self, mangling_prefix: &str) -> SymbolNames {
        SymbolNames {
            data: format!("{mangling_prefix}{}", self.data),
            end: format!("{mangling_prefix}{}", self.end),
            size: format!("{mangling_prefix}{}", self.size),
        }
    }
}

/// Rust accessor function name for a resource: `Lorem` → `lorem`, `TLorem` → `t_lorem`.
pub fn accessor_name(resource: &str) -> String {
    let mut out = String::with_capacity(resource.len() + 4);
    let mut prev: Option<char> = None;
    let chars: Vec<char> = resource.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next_lower,
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_rust_keyword(&out) {
        out.push('_');
    }
    out
}

fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break" | "const" | "continue" | "crate" | "else" | "enum" | "extern" | "false"
            | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move"
            | "mut" | "pub" | "ref" | "return" | "self" | "static" | "struct" | "super"
            | "trait" | "true" | "type" | "unsafe" | "use" | "where" | "while" | "async"
            | "await" | "dyn" | "abstract" | "become" | "box" | "do" | "final" | "macro"
            | "override" | "priv" | "typeof" | "unsized" | "virtual" | "yield" | "try" | "gen"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_names() {
        let names = SymbolNaming::default().names("Lorem");
        assert_eq!(names.data, "gLoremData");
        assert_eq!(names.end, "gLoremEnd");
        assert_eq!(names.size, "gLoremSize");
    }

    #[test]
    fn snake_names_with_prefix() {
        let naming = SymbolNaming::new(Some("app_".into()), NamingStyle::Snake);
        let names = naming.names("Icon");
        assert_eq!(names.data, "app_gIcon_data");
        assert_eq!(names.end, "app_gIcon_end");
        assert_eq!(names.size, "app_gIcon_size");
    }

    #[test]
    fn mangling_applies_to_all_three() {
        let names = SymbolNaming::default().names("Lorem").mangled("_");
        assert_eq!(names.data, "_gLoremData");
        assert_eq!(names.end, "_gLoremEnd");
        assert_eq!(names.size, "_gLoremSize");
    }

    #[test]
    fn prefix_validation() {
        assert!(SymbolNaming::default().validate().is_ok());
        assert!(SymbolNaming::new(Some("_x1".into()), NamingStyle::Camel).validate().is_ok());
        assert!(SymbolNaming::new(Some("1x".into()), NamingStyle::Camel).validate().is_err());
        assert!(SymbolNaming::new(Some("a-b".into()), NamingStyle::Camel).validate().is_err());
        assert!(SymbolNaming::new(Some(String::new()), NamingStyle::Camel).validate().is_err());
    }

    #[test]
    fn accessor_names() {
        assert_eq!(accessor_name("Lorem"), "lorem");
        assert_eq!(accessor_name("TLorem"), "t_lorem");
        assert_eq!(accessor_name("Sevenbytes"), "sevenbytes");
        assert_eq!(accessor_name("HTTPServer"), "http_server");
        assert_eq!(accessor_name("icon2Big"), "icon2_big");
        assert_eq!(accessor_name("1_"), "_1_");
        assert_eq!(accessor_name("Type"), "type_");
    }

    #[test]
    fn style_parses() {
        assert_eq!("snake".parse::<NamingStyle>().unwrap(), NamingStyle::Snake);
        assert_eq!("Camel".parse::<NamingStyle>().unwrap(), NamingStyle::Camel);
        assert!("kebab".parse::<NamingStyle>().is_err());
    }
}

//! Embedding requests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// How the payload is laid out between the data and end symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    /// The file's bytes, verbatim.
    #[default]
    Binary,
    /// The file's bytes followed by a NUL terminator, counted in the size.
    Text,
}

impl PayloadKind {
    /// Bytes appended after the file contents.
    pub fn terminator_len(self) -> u64 {
        match self {
            PayloadKind::Binary => 0,
            PayloadKind::Text => 1,
        }
    }
}

/// Element type of the declared data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    /// `unsigned char` / `u8`.
    #[default]
    Byte,
    /// `char` / `c_char`.
    Char,
}

impl ElementType {
    pub fn c_type(self) -> &'static str {
        match self {
            ElementType::Byte => "unsigned char",
            ElementType::Char => "char",
        }
    }

    pub fn rust_type(self) -> &'static str {
        match self {
            ElementType::Byte => "u8",
            ElementType::Char => "::core::ffi::c_char",
        }
    }
}

/// A request to embed one file under one name.
///
/// The name is the identity of the resource: two descriptors with the same
/// name define the same symbols and cannot be linked together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceDescriptor {
    /// Identifier spliced into the symbol names (`g{name}Data`).
    pub name: String,
    /// File whose bytes are embedded.
    #[serde(alias = "path")]
    pub source_path: PathBuf,
    #[serde(default)]
    pub kind: PayloadKind,
    #[serde(default)]
    pub element: ElementType,
}

impl ResourceDescriptor {
    /// Embed `path` verbatim as `name`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: path.into(),
            kind: PayloadKind::Binary,
            element: ElementType::Byte,
        }
    }

    /// Embed `path` as NUL-terminated text, declared with `char` elements.
    pub fn text(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: PayloadKind::Text,
            element: ElementType::Char,
            ..Self::new(name, path)
        }
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }

    /// Check that the name can be spliced into a C identifier.
    ///
    /// A leading digit is fine: the name always follows the `g` marker.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CodegenError::InvalidName {
                name: self.name.clone(),
                reason: "name is empty".into(),
            });
        }
        if let Some(bad) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(CodegenError::InvalidName {
                name: self.name.clone(),
                reason: format!("character '{bad}' is not allowed in a symbol name"),
            });
        }
        Ok(())
    }

    /// The source path, resolved against `base` when relative.
    pub fn resolved_path(&self, base: Option<&Path>) -> PathBuf {
        match base {
            Some(base) if self.source_path.is_relative() => base.join(&self.source_path),
            _ => self.source_path.clone(),
        }
    }
}

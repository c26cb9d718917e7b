//! Code generation for build-time binary embedding.
//!
//! Each embedded file becomes three linker-visible symbols:
//!
//! - `g{Name}Data`: the file's bytes, aligned for the target
//! - `g{Name}End`: one past the last byte
//! - `g{Name}Size`: `End - Data`, computed by the assembler
//!
//! Generation runs in stages: the target profile picks a dialect
//! ([`resolve_dialect`]), the contract generator lays out one assembler block
//! per resource ([`assembly_block`]), and the emitters wrap it for C, Rust, or
//! a standalone assembler file. Targets without a raw-include facility only
//! get declarations; see [`DefinitionProvider`].
//!
//! Build scripts normally use [`Builder`].

pub mod builder;
pub mod contract;
pub mod dialect;
pub mod emit;
pub mod error;
pub mod fallback;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod resource;

pub use builder::{Builder, DECLARATIONS_FILE, DEFINITIONS_FILE};
pub use contract::{assembly_block, escape_asm_path};
pub use dialect::{resolve_dialect, AlignDirective, DialectFragmentSet};
pub use emit::{generate, render, EmitLanguage, EmitOptions, EmittedResource};
pub use error::{CodegenError, Result};
pub use fallback::DefinitionProvider;
pub use naming::{accessor_name, NamingStyle, SymbolNames, SymbolNaming};
pub use pipeline::{plan, run, EmittedFile, PipelineConfig, PipelineOutput};
pub use report::{DefinitionSource, EmbedReport, ResourceEntry};
pub use resource::{ElementType, PayloadKind, ResourceDescriptor};

pub use incbin_targets;

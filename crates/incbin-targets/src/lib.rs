//! Target profile model and alignment policy for incbin.
//!
//! A profile describes the toolchain a resource is embedded for:
//! - **Architecture:** CPU family, pointer width, SIMD capability class
//! - **Object family:** ELF, Mach-O, COFF, ARM-embedded, Green Hills, or declaration-only
//! - **Assembler dialect:** how `.align` is spelled
//!
//! Profiles come from the built-in catalogue, from `.profile.toml` files,
//! or from the Cargo build-script environment.

pub mod alignment;
pub mod arch;
pub mod detect;
pub mod error;
pub mod family;
pub mod parse;
pub mod profile;

pub use alignment::{alignment_for, Alignment};
pub use arch::{Architecture, PointerWidth, SimdClass};
pub use detect::CfgValues;
pub use error::{Result, TargetError};
pub use family::{AssemblerDialect, ObjectFamily, RawInclude};
pub use profile::{builtin_profiles, resolve_profile, TargetProfile};

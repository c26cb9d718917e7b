//! Declaration-only fallback.
//!
//! Toolchains without a raw-include facility only receive declarations.
//! Something outside the generator has to define `Data`, `End`, and `Size`
//! with the same contract: a resource compiler, a linker script, or a
//! provider registered on the [`Builder`](crate::Builder).

use std::fmt;

use incbin_targets::TargetProfile;

use crate::report::ResourceEntry;

/// Supplies definitions for resources the target cannot define inline.
///
/// Object-safe so providers can be stored in `Box<dyn DefinitionProvider>`.
pub trait DefinitionProvider: fmt::Debug + Send + Sync {
    /// Human-readable name, used in logs and errors.
    fn name(&self) -> &str;

    /// Arrange for every entry's three symbols to be defined.
    ///
    /// Each definition must honour `size == end - data` and align the data
    /// symbol to `profile.alignment()`.
    fn provide(&self, resources: &[ResourceEntry], profile: &TargetProfile) -> Result<(), String>;
}

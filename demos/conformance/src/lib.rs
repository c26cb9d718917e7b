//! Fixtures embedded by `build.rs`, exposed for the integration tests.

/// Definitions, declarations, and accessors.
pub mod embedded {
    incbin::include_embedded!();
}

/// The same symbols declared a second time, as another unit would see them.
pub mod declared {
    incbin::include_embedded!("incbin_extern.rs");
}

/// Lorem ipsum source, for comparing against the embedded copy.
pub const LOREM_SOURCE: &[u8] = include_bytes!("../data/loremipsum.txt");

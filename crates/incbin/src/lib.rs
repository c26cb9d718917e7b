//! Runtime view over files embedded at build time.
//!
//! `incbin-codegen` writes, for every resource, an assembler block defining
//! `g{Name}Data`, `g{Name}End`, and `g{Name}Size`, plus a safe accessor
//! returning an [`Embedded`]. This crate only reads those symbols; it never
//! copies, decompresses, or interprets the bytes.
//!
//! ```ignore
//! incbin::include_embedded!();
//!
//! fn main() {
//!     let lorem = lorem();
//!     assert_eq!(lorem.len(), 962);
//!     assert!(lorem.is_aligned());
//! }
//! ```

#![cfg_attr(not(test), no_std)]

use core::ffi::CStr;
use core::fmt;
use core::ops::Deref;

/// An embedded resource: a contiguous, read-only, `'static` byte range.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Embedded {
    bytes: &'static [u8],
    alignment: usize,
    /// The last byte is a terminator appended at build time, not file content.
    text: bool,
}

impl Embedded {
    /// Build a view from the three symbols of one resource.
    ///
    /// # Safety
    ///
    /// `data` must point to `size` readable bytes that live for the rest of
    /// the program and are never written, and `end` must equal
    /// `data + size`. The generated accessors guarantee both because the
    /// assembler computes `size` from the `data` and `end` labels.
    pub unsafe fn from_symbols(data: *const u8, end: *const u8, size: u32, alignment: usize) -> Self {
        let len = size as usize;
        debug_assert_eq!(end as usize - data as usize, len, "size != end - data");
        debug_assert!(alignment.is_power_of_two(), "alignment {alignment} is not a power of two");
        debug_assert_eq!(data as usize % alignment, 0, "data is not {alignment}-byte aligned");
        Self {
            bytes: core::slice::from_raw_parts(data, len),
            alignment,
            text: false,
        }
    }

    /// A view over an ordinary static, for tests and for definitions
    /// supplied by other means. An alignment of zero is treated as one.
    pub const fn from_static(bytes: &'static [u8], alignment: usize) -> Self {
        let alignment = if alignment == 0 { 1 } else { alignment };
        Self {
            bytes,
            alignment,
            text: false,
        }
    }

    /// Mark the view as a text payload whose final byte is the NUL
    /// terminator added at build time. Generated accessors for text
    /// resources call this.
    pub const fn nul_terminated(self) -> Self {
        debug_assert!(matches!(self.bytes.last(), Some(0)), "text payload without terminator");
        Self { text: true, ..self }
    }

    /// Whether this is a text payload.
    pub const fn is_text(&self) -> bool {
        self.text
    }

    pub const fn as_bytes(&self) -> &'static [u8] {
        self.bytes
    }

    /// The value of the `Size` symbol.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Address of the `Data` symbol.
    pub const fn data_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Address of the `End` symbol, one past the last byte.
    pub fn end_ptr(&self) -> *const u8 {
        self.bytes.as_ptr_range().end
    }

    /// Alignment the `Data` symbol was placed at, in bytes.
    pub const fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn is_aligned(&self) -> bool {
        self.data_ptr() as usize % self.alignment == 0
    }

    /// The file content as UTF-8, without the terminator of a text payload.
    ///
    /// Binary payloads are returned whole, trailing NUL bytes included.
    pub fn as_str(&self) -> Option<&'static str> {
        let bytes = match self.bytes.split_last() {
            Some((_, content)) if self.text => content,
            _ => self.bytes,
        };
        core::str::from_utf8(bytes).ok()
    }

    /// The payload of a text resource as a C string.
    ///
    /// `None` unless the bytes end with the only NUL in the range.
    pub fn as_c_str(&self) -> Option<&'static CStr> {
        CStr::from_bytes_with_nul(self.bytes).ok()
    }
}

impl Deref for Embedded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for Embedded {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for Embedded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Embedded")
            .field("data", &self.data_ptr())
            .field("len", &self.len())
            .field("alignment", &self.alignment)
            .field("text", &self.text)
            .finish()
    }
}

/// Include the Rust generated by `incbin_codegen::Builder`.
///
/// With no argument, includes `incbin.rs` (definitions, declarations, and
/// accessors); do this in exactly one module. Pass `"incbin_extern.rs"` to
/// include the declarations alone anywhere else.
#[macro_export]
macro_rules! include_embedded {
    () => {
        include!(concat!(env!("OUT_DIR"), "/incbin.rs"));
    };
    ($file:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $file));
    };
}

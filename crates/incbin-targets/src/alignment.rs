//! Alignment policy for embedded data.
//!
//! The data symbol is aligned so that vector loads can read it directly when
//! the target has a SIMD unit, and to the pointer width otherwise.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::SimdClass;
use crate::error::TargetError;
use crate::profile::TargetProfile;

/// A power-of-two byte alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Alignment(u32);

impl Alignment {
    /// One-byte alignment, used for the end marker.
    pub const BYTE: Alignment = Alignment(1);

    /// Construct from a byte count, rejecting anything that is not a power of two.
    pub fn new(bytes: u32) -> Result<Self, TargetError> {
        if bytes.is_power_of_two() {
            Ok(Alignment(bytes))
        } else {
            Err(TargetError::InvalidAlignment { bytes })
        }
    }

    /// Alignment in bytes.
    pub fn bytes(self) -> u32 {
        self.0
    }

    /// Base-2 exponent: `1 << log2() == bytes()`.
    pub fn log2(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// Whether `addr` satisfies this alignment.
    pub fn is_aligned(self, addr: usize) -> bool {
        addr % self.0 as usize == 0
    }
}

impl TryFrom<u32> for Alignment {
    type Error = TargetError;

    fn try_from(bytes: u32) -> Result<Self, Self::Error> {
        Alignment::new(bytes)
    }
}

impl From<Alignment> for u32 {
    fn from(alignment: Alignment) -> Self {
        alignment.0
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes (2^{})", self.0, self.log2())
    }
}

/// Alignment required for the data symbol on `profile`.
///
/// 128-bit SIMD targets get 16, 256-bit SIMD targets get 32, everything else
/// gets the native pointer width.
pub fn alignment_for(profile: &TargetProfile) -> Alignment {
    let pointer = profile.pointer_width.bytes();
    let bytes = match profile.simd {
        SimdClass::Narrow => 16,
        SimdClass::Wide => 32,
        SimdClass::None => pointer,
    };
    debug_assert!(bytes.is_power_of_two() && bytes >= pointer);
    Alignment(bytes)
}

//! CLI command implementations.

pub mod emit;
pub mod init;
pub mod inspect;
pub mod target;

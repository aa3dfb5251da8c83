//! Masking of secret values in logged command lines.
//!
//! Steps routinely shell out with credentials on the command line
//! (`--token=...`). The shell module logs every command it runs; this module
//! makes sure the logged line never contains the credential while the child
//! process still receives the real value.

pub mod mask;

pub use mask::{ArgMasker, BUILTIN_SECRET_FLAGS, MASK};

//! External command execution.
//!
//! Steps shell out to the tools they drive (helm, kubectl, go, ...). The
//! helpers here invoke an argv directly (no shell interpolation), capture
//! output for inspection, and log the command line with secret flag values
//! masked.

pub mod command;

pub use command::{run_and_handle_error, run_and_log, run_checked, RunOptions, RunResult};

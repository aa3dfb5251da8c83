//! Configuration registration and access.
//!
//! Every step declares the options it needs against a single
//! [`ConfigRegistrar`] during its configure phase; the registrar is then
//! parsed exactly once into a read-only [`Config`]. Two reserved options are
//! always present and feed step filtering:
//!
//! - `--steps` — tags of the steps to execute (default: `all`)
//! - `--skip-steps` — tags of the steps to skip (default: none)
//!
//! The two are mutually exclusive at the parser level. Every option can also
//! be supplied through an environment variable derived from the registrar's
//! program name (`PROG_OPTION_NAME`).

pub mod registrar;
pub mod values;

pub use registrar::{ConfigRegistrar, SKIP_STEPS_OPTION, STEPS_OPTION};
pub use values::Config;

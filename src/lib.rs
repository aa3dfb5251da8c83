//! Cairn - composable build-step execution with tag-based filtering.
//!
//! Cairn lets a build/CI tool decompose its work into named, independently
//! testable steps that can be selectively included or excluded at invocation
//! time, then executed through a fixed lifecycle with deterministic fault
//! handling.
//!
//! # Modules
//!
//! - [`config`] - Option registration and parsed configuration access
//! - [`context`] - Shared mutable context passed through run and cleanup
//! - [`error`] - Error types and result alias
//! - [`runner`] - Lifecycle driver mapping outcomes to exit codes
//! - [`secrets`] - Secret masking for logged command lines
//! - [`shell`] - External command execution
//! - [`steps`] - Step contract, filtering pipeline and helper checks
//! - [`tags`] - Step tags and the wildcard sentinel
//! - [`version`] - Lenient semantic-version parsing for pre-run checks
//!
//! # Example
//!
//! ```
//! use cairn::config::{Config, ConfigRegistrar};
//! use cairn::context::Context;
//! use cairn::error::Result;
//! use cairn::runner::Runner;
//! use cairn::steps::BuildStep;
//!
//! struct SayHello;
//!
//! impl BuildStep for SayHello {
//!     fn configure(&mut self, _registrar: &mut ConfigRegistrar) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pre_run(&mut self, _config: &Config) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn run(&mut self, _config: &Config, context: &mut Context) -> Result<()> {
//!         context.insert("greeting", "hello");
//!         Ok(())
//!     }
//!
//!     fn cleanup(
//!         &mut self,
//!         _config: &Config,
//!         _context: &mut Context,
//!         _run_failed: bool,
//!     ) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut step = SayHello;
//! let mut registrar = ConfigRegistrar::new("demo", "demo tool");
//! step.configure(&mut registrar)?;
//! let config = registrar.parse_from(["demo"])?;
//!
//! let mut runner = Runner::new(config, vec![Box::new(step)]);
//! assert_eq!(runner.run(), 0);
//! assert_eq!(runner.context().get_str("greeting"), Some("hello"));
//! # Ok::<(), cairn::CairnError>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod runner;
pub mod secrets;
pub mod shell;
pub mod steps;
pub mod tags;
pub mod version;

pub use error::{CairnError, Result};

//! Step contract, filtering and helper checks.
//!
//! This module provides the core step machinery:
//!
//! - [`BuildStep`] - the four-phase lifecycle contract every step implements
//! - [`FilteringPipeline`] - an ordered, tag-filtered collection of steps,
//!   itself a step
//! - [`Selection`] - the per-invocation include/skip predicate
//! - [`checks`] - pre-run helper assertions (binary presence, version range)
//!
//! Lifecycle order is configure → pre-run → run → cleanup. Configure runs
//! for every step regardless of filtering, because the options a step
//! registers may themselves define the filter. The remaining phases apply
//! only to steps matching the selection.

pub mod checks;
pub mod pipeline;
pub mod selection;
pub mod step;

pub use checks::{assert_binary_present_in_path, assert_version_in_range, find_binary_in_path};
pub use pipeline::FilteringPipeline;
pub use selection::Selection;
pub use step::BuildStep;

//! The step contract.

use crate::config::{Config, ConfigRegistrar};
use crate::context::Context;
use crate::error::Result;
use crate::tags::{StepTag, TagSet};

/// A unit of work driven through the four-phase lifecycle.
///
/// Steps are constructed once, configured once, executed once and then
/// discarded. They may carry internal mutable state (counters, accumulated
/// results); the framework never inspects it. Composites like
/// [`FilteringPipeline`](crate::steps::FilteringPipeline) implement this
/// same trait, so pipelines nest without special casing.
pub trait BuildStep {
    /// Human-readable step name, used in logs and validation errors.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &str {
        let full = std::any::type_name_of_val(self);
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Tags this step answers to. Must be stable for the step's lifetime.
    ///
    /// Defaults to the wildcard set, so an unfiltered step always runs.
    fn provided_tags(&self) -> TagSet {
        TagSet::from([StepTag::all()])
    }

    /// Register the options this step needs.
    ///
    /// Called once for every step, before configuration is parsed and
    /// regardless of filtering. A failure here aborts configuration and
    /// must name the failing step
    /// ([`CairnError::validation`](crate::CairnError::validation)).
    fn configure(&mut self, registrar: &mut ConfigRegistrar) -> Result<()>;

    /// Lightweight validation run before any step does real work.
    ///
    /// Typical checks: required binaries are present and within an accepted
    /// version range (see [`checks`](crate::steps::checks)). Must not mutate
    /// durable state or start long-running work.
    fn pre_run(&mut self, config: &Config) -> Result<()>;

    /// The step's actual work. Intermediate results go into `context`.
    fn run(&mut self, config: &Config, context: &mut Context) -> Result<()>;

    /// Release whatever `run` acquired.
    ///
    /// `run_failed` reports whether *any* step's run failed this invocation,
    /// not only this step's, so cleanup logic can branch (for example, skip
    /// a success-only report upload).
    fn cleanup(&mut self, config: &Config, context: &mut Context, run_failed: bool) -> Result<()>;
}

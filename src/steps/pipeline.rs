//! A composite step that filters its children by tag.

use crate::config::{Config, ConfigRegistrar};
use crate::context::Context;
use crate::error::Result;
use crate::steps::selection::Selection;
use crate::steps::step::BuildStep;
use crate::tags::TagSet;
use tracing::{debug, error, info, warn};

/// Ordered collection of steps, itself a step.
///
/// Children are configured unconditionally, in order: the options they
/// register may themselves define the filter, so filtering cannot be
/// resolved before parsing. Pre-run and run apply only to children matching
/// the per-invocation [`Selection`], in registration order, and stop at the
/// first failure. Cleanup visits exactly the children whose run was
/// attempted, in the same order, and never stops early: a child's cleanup
/// error is logged and the sweep continues.
///
/// Because the pipeline implements [`BuildStep`] and its provided tags are
/// the union of its children's, pipelines nest freely.
pub struct FilteringPipeline {
    name: String,
    steps: Vec<Box<dyn BuildStep>>,
    run_attempted: Vec<bool>,
}

impl FilteringPipeline {
    /// Create a pipeline owning `steps`, with a name used in log lines.
    pub fn new(steps: Vec<Box<dyn BuildStep>>, name: impl Into<String>) -> Self {
        let run_attempted = vec![false; steps.len()];
        Self {
            name: name.into(),
            steps,
            run_attempted,
        }
    }

    /// Number of child steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no children.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl BuildStep for FilteringPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn provided_tags(&self) -> TagSet {
        self.steps.iter().flat_map(|step| step.provided_tags()).collect()
    }

    fn configure(&mut self, registrar: &mut ConfigRegistrar) -> Result<()> {
        for step in &mut self.steps {
            debug!("Configuring step {}", step.name());
            if let Err(e) = step.configure(registrar) {
                error!("Configuration of step {} failed: {}", step.name(), e);
                return Err(e);
            }
        }
        Ok(())
    }

    fn pre_run(&mut self, config: &Config) -> Result<()> {
        let selection = Selection::from_config(config);
        for step in &mut self.steps {
            if !selection.includes(&step.provided_tags()) {
                info!(
                    "Skipping pre-run of step {} in {}: not selected",
                    step.name(),
                    self.name
                );
                continue;
            }
            info!("Running pre-run of step {} in {}", step.name(), self.name);
            step.pre_run(config)?;
        }
        Ok(())
    }

    fn run(&mut self, config: &Config, context: &mut Context) -> Result<()> {
        let selection = Selection::from_config(config);
        for (index, step) in self.steps.iter_mut().enumerate() {
            if !selection.includes(&step.provided_tags()) {
                info!(
                    "Skipping step {} in {}: not selected",
                    step.name(),
                    self.name
                );
                continue;
            }
            info!("Running step {} in {}", step.name(), self.name);
            self.run_attempted[index] = true;
            step.run(config, context)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, config: &Config, context: &mut Context, run_failed: bool) -> Result<()> {
        let mut first_failure = None;
        for (index, step) in self.steps.iter_mut().enumerate() {
            if !self.run_attempted[index] {
                continue;
            }
            info!("Running cleanup of step {} in {}", step.name(), self.name);
            if let Err(e) = step.cleanup(config, context, run_failed) {
                warn!("Cleanup of step {} failed: {}", step.name(), e);
                first_failure.get_or_insert(e);
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

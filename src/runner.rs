//! Top-level lifecycle driver.

use crate::config::Config;
use crate::context::Context;
use crate::error::Result;
use crate::steps::BuildStep;
use tracing::{error, info, warn};

/// Exit code reported for any failed invocation.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit code reported for a fully successful invocation.
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// Drives a step list through pre-run, run and cleanup, mapping the outcome
/// to a process exit code.
///
/// Failure handling is two-tier. A pre-run failure aborts immediately with
/// no cleanup phase: pre-run is pure validation, so no step has acquired
/// anything yet. A run failure stops further runs but always enters the
/// cleanup sweep, because earlier runs may have started side effects. The
/// sweep visits every step with the shared `run_failed` flag; individual
/// cleanup errors are logged, never interrupt the sweep, and force a failure
/// exit code even when every run succeeded.
///
/// The embedding binary is expected to pass the returned code to the
/// process exit (`std::process::ExitCode` or `std::process::exit`).
pub struct Runner {
    config: Config,
    steps: Vec<Box<dyn BuildStep>>,
    context: Context,
}

impl Runner {
    /// Create a runner over parsed configuration and an ordered step list.
    ///
    /// The steps must already be configured; the runner never calls
    /// `configure`.
    pub fn new(config: Config, steps: Vec<Box<dyn BuildStep>>) -> Self {
        Self {
            config,
            steps,
            context: Context::new(),
        }
    }

    /// The shared execution context of the current invocation.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Execute the full lifecycle once and return the process exit code.
    pub fn run(&mut self) -> i32 {
        self.context = Context::new();

        if let Err(e) = self.pre_run_all() {
            error!("Pre-run failed, aborting with no cleanup: {}", e);
            return FAILURE_EXIT_CODE;
        }

        let run_failed = match self.run_all() {
            Ok(()) => false,
            Err(e) => {
                error!("Run failed: {}", e);
                true
            }
        };

        let cleanup_clean = self.cleanup_all(run_failed);

        if run_failed || !cleanup_clean {
            FAILURE_EXIT_CODE
        } else {
            SUCCESS_EXIT_CODE
        }
    }

    fn pre_run_all(&mut self) -> Result<()> {
        for step in &mut self.steps {
            info!("Running pre-run of step {}", step.name());
            step.pre_run(&self.config)?;
        }
        Ok(())
    }

    fn run_all(&mut self) -> Result<()> {
        for step in &mut self.steps {
            info!("Running step {}", step.name());
            step.run(&self.config, &mut self.context)?;
        }
        Ok(())
    }

    fn cleanup_all(&mut self, run_failed: bool) -> bool {
        let mut clean = true;
        for step in &mut self.steps {
            info!("Running cleanup of step {}", step.name());
            if let Err(e) = step.cleanup(&self.config, &mut self.context, run_failed) {
                warn!("Cleanup of step {} failed: {}", step.name(), e);
                clean = false;
            }
        }
        clean
    }
}

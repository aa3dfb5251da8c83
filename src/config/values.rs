//! Parsed, read-only configuration access.

use crate::config::registrar::{SKIP_STEPS_OPTION, STEPS_OPTION};
use crate::tags::{StepTag, TagSet};
use clap::ArgMatches;

/// Read-only view over the parsed configuration.
///
/// Values are keyed by the option name they were registered under. Lookups
/// for unknown keys return `None`/empty rather than failing: a step that
/// never registered an option has no business reading it.
#[derive(Debug)]
pub struct Config {
    matches: ArgMatches,
}

impl Config {
    pub(crate) fn new(matches: ArgMatches) -> Self {
        Self { matches }
    }

    /// Look up a single-value string option.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(String::as_str)
    }

    /// Look up all values of a multi-value option.
    pub fn get_many(&self, name: &str) -> Vec<String> {
        self.matches
            .try_get_many::<String>(name)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    /// Look up a boolean flag.
    pub fn get_flag(&self, name: &str) -> bool {
        self.matches
            .try_get_one::<bool>(name)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    /// Tags requested through the reserved `--steps` option.
    pub fn requested_tags(&self) -> TagSet {
        self.get_many(STEPS_OPTION)
            .into_iter()
            .map(StepTag::new)
            .collect()
    }

    /// Tags excluded through the reserved `--skip-steps` option.
    pub fn skipped_tags(&self) -> TagSet {
        self.get_many(SKIP_STEPS_OPTION)
            .into_iter()
            .map(StepTag::new)
            .collect()
    }
}

//! Option registration shared by every step.

use crate::config::values::Config;
use crate::error::{CairnError, Result};
use crate::tags::ALL_TAG;
use clap::{Arg, ArgAction, Command};

/// Reserved option naming the tags of the steps to execute.
pub const STEPS_OPTION: &str = "steps";

/// Reserved option naming the tags of the steps to skip.
pub const SKIP_STEPS_OPTION: &str = "skip-steps";

/// Collects option declarations from every step before a single parse.
///
/// Steps must not assume anything about parsing order or the final argument
/// source: values may come from the command line or from environment
/// variables prefixed with the upper-cased program name.
#[derive(Debug)]
pub struct ConfigRegistrar {
    command: Command,
    env_prefix: String,
}

impl ConfigRegistrar {
    /// Create a registrar for the given program, with the reserved
    /// `--steps`/`--skip-steps` options already present and declared
    /// mutually exclusive.
    pub fn new(name: &str, about: &str) -> Self {
        let env_prefix = name.to_uppercase().replace('-', "_");
        let command = Command::new(name.to_string())
            .about(about.to_string())
            .arg(
                Arg::new(STEPS_OPTION)
                    .long(STEPS_OPTION)
                    .help("Tags of the steps to execute")
                    .num_args(1..)
                    .value_delimiter(',')
                    .action(ArgAction::Append)
                    .default_value(ALL_TAG)
                    .env(format!("{env_prefix}_STEPS"))
                    .conflicts_with(SKIP_STEPS_OPTION),
            )
            .arg(
                Arg::new(SKIP_STEPS_OPTION)
                    .long(SKIP_STEPS_OPTION)
                    .help("Tags of the steps to skip")
                    .num_args(1..)
                    .value_delimiter(',')
                    .action(ArgAction::Append)
                    .env(format!("{env_prefix}_SKIP_STEPS")),
            );
        Self {
            command,
            env_prefix,
        }
    }

    /// Register a single-value string option.
    pub fn option(&mut self, name: &str, help: &str, default: Option<&str>) -> Result<()> {
        self.ensure_unregistered(name)?;
        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .help(help.to_string())
            .action(ArgAction::Set)
            .env(self.env_var(name));
        if let Some(default) = default {
            arg = arg.default_value(default.to_string());
        }
        self.push_arg(arg);
        Ok(())
    }

    /// Register a boolean flag (false unless given).
    pub fn flag(&mut self, name: &str, help: &str) -> Result<()> {
        self.ensure_unregistered(name)?;
        let arg = Arg::new(name.to_string())
            .long(name.to_string())
            .help(help.to_string())
            .action(ArgAction::SetTrue)
            .env(self.env_var(name));
        self.push_arg(arg);
        Ok(())
    }

    /// Register a multi-value option (repeatable, comma-delimited).
    pub fn multi_option(&mut self, name: &str, help: &str, defaults: &[&str]) -> Result<()> {
        self.ensure_unregistered(name)?;
        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .help(help.to_string())
            .num_args(1..)
            .value_delimiter(',')
            .action(ArgAction::Append)
            .env(self.env_var(name));
        if !defaults.is_empty() {
            arg = arg.default_values(defaults.iter().map(ToString::to_string));
        }
        self.push_arg(arg);
        Ok(())
    }

    /// Parse the process arguments into a read-only [`Config`].
    pub fn parse(self) -> Result<Config> {
        self.parse_from(std::env::args_os())
    }

    /// Parse an explicit argument list (first element is the program name).
    pub fn parse_from<I, T>(self, args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from(args)
            .map_err(|e| CairnError::Config {
                message: e.to_string(),
            })?;
        Ok(Config::new(matches))
    }

    fn ensure_unregistered(&self, name: &str) -> Result<()> {
        if self
            .command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == name)
        {
            return Err(CairnError::Config {
                message: format!("option '--{name}' is already registered"),
            });
        }
        Ok(())
    }

    fn push_arg(&mut self, arg: Arg) {
        let command = std::mem::replace(&mut self.command, Command::new(""));
        self.command = command.arg(arg);
    }

    fn env_var(&self, name: &str) -> String {
        format!(
            "{}_{}",
            self.env_prefix,
            name.to_uppercase().replace('-', "_")
        )
    }
}

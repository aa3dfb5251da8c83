//! Command-line argument masking for secret flags.

/// Mask written in place of a secret value.
pub const MASK: &str = "[REDACTED]";

/// Flags whose values are masked by default.
pub const BUILTIN_SECRET_FLAGS: &[&str] = &[
    "--token",
    "--api-key",
    "--password",
    "--secret",
    "--access-key",
];

/// Masks the values of secret flags when rendering an argv for logging.
///
/// Both `--token=value` and `--token value` forms are handled. A flag must
/// match exactly; `--token-file` is not masked by the `--token` entry.
///
/// # Example
///
/// ```
/// use cairn::secrets::ArgMasker;
///
/// let masker = ArgMasker::with_builtins();
/// let line = masker.mask_args(&["helm", "push", "--token=abc123"]);
///
/// assert_eq!(line, "helm push --token=[REDACTED]");
/// assert!(!line.contains("abc123"));
/// ```
#[derive(Debug, Clone)]
pub struct ArgMasker {
    flags: Vec<String>,
}

impl ArgMasker {
    /// Create a masker with the built-in secret flags.
    pub fn with_builtins() -> Self {
        Self {
            flags: BUILTIN_SECRET_FLAGS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create a masker with custom secret flags only.
    pub fn new(flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Register an additional secret flag.
    pub fn add_flag(&mut self, flag: impl Into<String>) {
        self.flags.push(flag.into());
    }

    /// Render an argv as a single loggable line with secret values masked.
    pub fn mask_args<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut out = Vec::with_capacity(args.len());
        let mut mask_next = false;
        for arg in args {
            let arg = arg.as_ref();
            if mask_next {
                out.push(MASK.to_string());
                mask_next = false;
                continue;
            }
            match self.matching_flag(arg) {
                Some(flag) if arg == flag => {
                    out.push(arg.to_string());
                    mask_next = true;
                }
                Some(flag) => out.push(format!("{flag}={MASK}")),
                None => out.push(arg.to_string()),
            }
        }
        out.join(" ")
    }

    fn matching_flag(&self, arg: &str) -> Option<&str> {
        self.flags
            .iter()
            .map(String::as_str)
            .find(|flag| arg == *flag || (arg.starts_with(flag) && arg.as_bytes().get(flag.len()) == Some(&b'=')))
    }
}

impl Default for ArgMasker {
    fn default() -> Self {
        Self::with_builtins()
    }
}

//! Lenient semantic-version handling for pre-run checks.
//!
//! Build tools report their versions in many shapes (`v1.2.3`,
//! `helm version 3.14`, `ruby 3.2.1 (2023-02-08 ...)`). This module parses
//! the dotted numeric core of such strings and compares versions
//! component-wise, with missing components treated as zero.

use anyhow::{bail, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// A parsed dotted version.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
    text: String,
}

impl Version {
    /// Parse a version string, tolerating a leading non-numeric prefix
    /// (so `v1.2.3` and `version 1.2.3` both work) and trailing
    /// non-numeric suffixes on the last component (`1.2.3-rc1`).
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let Some(start) = trimmed.find(|c: char| c.is_ascii_digit()) else {
            bail!("no numeric component in version '{raw}'");
        };
        let text = &trimmed[start..];

        let mut components = Vec::new();
        for part in text.split('.') {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                break;
            }
            components.push(digits.parse::<u64>()?);
            // Stop at a component with a suffix, as in "1.2.3-rc1".
            if digits.len() != part.len() {
                break;
            }
        }
        if components.is_empty() {
            bail!("no numeric component in version '{raw}'");
        }

        let text = components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Ok(Self { components, text })
    }

    /// The numeric components, most significant first.
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Pull a dotted version number out of `tool --version` style output.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [
        r"(\d+\.\d+(?:\.\d+)+)",
        r"[vV](\d+\.\d+(?:\.\d+)*)",
        r"(\d+\.\d+)",
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

//! Step tags and the wildcard sentinel.
//!
//! Tags are the vocabulary used to select subsets of steps at invocation
//! time. Every step declares the tags it answers to; the reserved
//! [`StepTag::all`] sentinel matches every step regardless of its declared
//! tags.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of the reserved tag matching every step.
pub const ALL_TAG: &str = "all";

/// Opaque identifier a step answers to.
///
/// Tags compare and hash by value and are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTag(String);

impl StepTag {
    /// Create a tag from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reserved wildcard tag.
    pub fn all() -> Self {
        Self(ALL_TAG.to_string())
    }

    /// Whether this is the wildcard tag.
    pub fn is_all(&self) -> bool {
        self.0 == ALL_TAG
    }

    /// The tag's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StepTag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Set of tags, as provided by steps and requested by users.
pub type TagSet = HashSet<StepTag>;

/// Build a tag set from string names.
pub fn tag_set<I, S>(names: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(StepTag::new).collect()
}

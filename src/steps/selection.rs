//! Per-invocation step selection.

use crate::config::Config;
use crate::tags::{StepTag, TagSet};

/// Which tags were requested and which were skipped for one invocation.
///
/// Derived from the reserved `--steps`/`--skip-steps` options. The two are
/// mutually exclusive at the configuration layer; this type does not enforce
/// that and simply evaluates the predicate it is given.
#[derive(Debug, Clone)]
pub struct Selection {
    requested: TagSet,
    skipped: TagSet,
}

impl Selection {
    /// Build a selection from explicit tag sets.
    ///
    /// An empty `requested` set is treated as the wildcard.
    pub fn new(requested: TagSet, skipped: TagSet) -> Self {
        let requested = if requested.is_empty() {
            TagSet::from([StepTag::all()])
        } else {
            requested
        };
        Self { requested, skipped }
    }

    /// Derive the selection from parsed configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.requested_tags(), config.skipped_tags())
    }

    /// Whether a step providing `tags` participates in this invocation.
    ///
    /// A step is included when the wildcard was requested or any of its tags
    /// was, and none of its tags was skipped. A skip match always wins, even
    /// over the wildcard.
    pub fn includes(&self, tags: &TagSet) -> bool {
        let requested =
            self.requested.contains(&StepTag::all()) || !self.requested.is_disjoint(tags);
        requested && self.skipped.is_disjoint(tags)
    }

    /// The requested tags.
    pub fn requested(&self) -> &TagSet {
        &self.requested
    }

    /// The skipped tags.
    pub fn skipped(&self) -> &TagSet {
        &self.skipped
    }
}

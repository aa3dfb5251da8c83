//! Shared execution context passed through run and cleanup.
//!
//! The context is a string-keyed map of JSON-style values, created fresh for
//! every runner invocation and handed to each step's `run` and `cleanup` by
//! mutable reference. Steps use it to leave artifacts for later steps or for
//! their own cleanup logic. Execution is strictly sequential, so the map
//! needs no internal synchronization.

use serde_json::Value;
use std::collections::HashMap;

/// Mutable key-value store shared by the steps of one invocation.
#[derive(Debug, Default)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a value for in-place mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Look up an integer value.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// Remove a value, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

//! Variable storage scheme of the generated test class.
//!
//! Recorded variables live in a `$this->vars` array on the Cest instance,
//! so they survive across the test methods a `run` step calls into.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use super::literal::php_string;

/// Name of the class property holding recorded variables
pub const STORAGE_PROPERTY: &str = "vars";

/// Reserved slot holding the window handles known before a window-opening step
pub const WINDOW_HANDLES_SLOT: &str = "windowHandles";

/// Per-export mapping from recorded variable names to read/write expressions
#[derive(Debug, Default)]
pub struct VariableScope {
    bound: Mutex<BTreeSet<String>>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression reading `name`
    pub fn read(&self, name: &str) -> String {
        format!("$this->{}[{}]", STORAGE_PROPERTY, php_string(name))
    }

    /// Statement assigning `value` (a PHP expression) to `name`
    pub fn write(&self, name: &str, value: &str) -> String {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
        format!("{} = {};", self.read(name), value)
    }

    /// Whether a step earlier in this export has written `name`
    pub fn is_bound(&self, name: &str) -> bool {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    /// Every name written so far, sorted
    pub fn bound_names(&self) -> Vec<String> {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

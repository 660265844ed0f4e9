use serde::{Deserialize, Serialize};

use crate::error::{EmitError, Result};

/// A recorded project holding one or more tests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    /// Base URL the tests were recorded against
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub tests: Vec<RecordedTest>,
}

/// One recorded test: an ordered list of steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTest {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, alias = "steps")]
    pub commands: Vec<Step>,
}

/// A single recorded action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub id: Option<String>,

    /// Action kind, e.g. "click" or "storeText"
    #[serde(alias = "command")]
    pub name: String,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// The step is expected to open a new browser window
    #[serde(default)]
    pub opens_window: bool,

    /// Variable the newly opened window handle is bound to
    #[serde(default)]
    pub window_handle_name: Option<String>,

    /// How long to wait for the new window (ms)
    #[serde(default)]
    pub window_timeout: Option<u64>,
}

impl Step {
    pub fn new(name: &str, target: &str, value: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: name.to_string(),
            target: non_empty(target),
            value: non_empty(value),
            ..Default::default()
        }
    }

    /// Disabled steps are recorded with a leading `//`
    pub fn is_disabled(&self) -> bool {
        self.name.starts_with("//")
    }

    /// Target, treating an empty string as absent
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn require_target(&self) -> Result<&str> {
        self.target().ok_or_else(|| EmitError::MissingField {
            command: self.name.clone(),
            field: "target",
        })
    }

    pub fn require_value(&self) -> Result<&str> {
        self.value().ok_or_else(|| EmitError::MissingField {
            command: self.name.clone(),
            field: "value",
        })
    }
}

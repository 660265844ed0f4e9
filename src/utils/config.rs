use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Prefixed onto relative `open` targets
    pub base_url: String,

    /// One indentation step in the generated source
    pub indent: String,

    /// Timeout used by waits that were recorded without one (ms)
    pub default_wait_timeout_ms: u64,

    /// Timeout for `waitForText`, which carries no timeout of its own (ms)
    pub wait_for_text_timeout_ms: u64,

    /// How long generated code waits for a new window to appear (seconds)
    pub window_timeout_secs: u64,

    /// Appended to the sanitized project name to form the class name
    pub class_suffix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            indent: "    ".to_string(),
            default_wait_timeout_ms: 30000,
            wait_for_text_timeout_ms: 30000,
            window_timeout_secs: 2,
            class_suffix: "Cest".to_string(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from a YAML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
